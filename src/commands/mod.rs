//! Subcommands of the `torbox` binary.

mod add;
mod control;
mod demo;
mod format;
mod list;
mod magnet;

pub use add::add;
pub use control::control;
pub use demo::demo;
pub use list::{active, queued};
pub use magnet::magnet;
