use anyhow::{Context, Result};

use crate::client::TorboxClient;
use crate::constants::ControlOperation;

/// Send a control operation to an active or queued torrent
pub async fn control(client: &TorboxClient, id: i64, operation: ControlOperation) -> Result<()> {
    client
        .general
        .control_any_torrent(id, operation)
        .await
        .with_context(|| format!("Failed to {} torrent {}", operation, id))?;
    println!("Sent '{}' to torrent {}.", operation, id);
    Ok(())
}
