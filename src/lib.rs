//! Typed async client for the TorBox remote download service.
//!
//! ```no_run
//! # async fn run() -> torbox::Result<()> {
//! let client = torbox::TorboxClient::new("my-api-key")?;
//! for torrent in client.general.active_torrents().await? {
//!     println!("{} {}", torrent.id, torrent.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod commands;
pub mod constants;
pub mod error;
pub mod general;
pub mod http;
pub mod logging;
pub mod magnet;
pub mod models;
pub mod search;

pub use client::{ClientBuilder, TorboxClient};
pub use error::{Error, Result};
pub use general::GeneralService;
pub use logging::Logger;
pub use magnet::Magnet;
pub use search::SearchService;
