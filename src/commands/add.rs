use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;

use crate::client::TorboxClient;
use crate::magnet::Magnet;
use crate::models::CreateTorrentRequest;

/// Add a torrent from a magnet link or a `.torrent` file path
pub async fn add(client: &TorboxClient, source: &str, name: Option<String>) -> Result<()> {
    let request = request_for(source).await?;
    let request = match name {
        Some(name) => request.name(name),
        None => request,
    };

    let torrent = client
        .general
        .create_torrent(&request)
        .await
        .with_context(|| format!("Failed to add torrent from {}", source))?;

    info!("Created torrent {} ({})", torrent.id, torrent.hash);
    println!("Added torrent {}: {}", torrent.id, torrent.name);
    Ok(())
}

async fn request_for(source: &str) -> Result<CreateTorrentRequest> {
    if source.starts_with("magnet:") {
        let magnet = Magnet::parse(source)?;
        debug!("Adding magnet {} ({})", magnet.hash, magnet.display_name);
        return Ok(CreateTorrentRequest::from_magnet(magnet));
    }

    let path = Path::new(source);
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read torrent file {:?}", path))?;
    debug!("Adding torrent file {:?} ({} bytes)", path, content.len());
    Ok(CreateTorrentRequest::from_file(content))
}
