use anyhow::{Context, Result};
use log::debug;
use prettytable::{Cell, Row, Table};

use super::format::format_bytes;
use crate::client::TorboxClient;
use crate::models::{QueuedDownload, Torrent};

const ACTIVE_HEADERS: [&str; 8] = [
    "ID",
    "Name",
    "Status",
    "Size",
    "Progress",
    "Download Speed",
    "Upload Speed",
    "Ratio",
];

const QUEUED_HEADERS: [&str; 4] = ["ID", "Name", "Hash", "Type"];

/// Print the account's active torrents
pub async fn active(client: &TorboxClient) -> Result<()> {
    let torrents = client
        .general
        .active_torrents()
        .await
        .context("Failed to list active torrents")?;
    debug!("Found {} active torrent(s)", torrents.len());

    if torrents.is_empty() {
        println!("No active torrents.");
        return Ok(());
    }
    active_table(&torrents).printstd();
    Ok(())
}

/// Print torrents waiting in the queue
pub async fn queued(client: &TorboxClient) -> Result<()> {
    let queued = client
        .general
        .queued_torrents()
        .await
        .context("Failed to list queued torrents")?;

    if queued.is_empty() {
        println!("No queued torrents.");
        return Ok(());
    }
    queued_table(&queued).printstd();
    Ok(())
}

fn header_row(headers: &[&str]) -> Row {
    Row::new(headers.iter().map(|header| Cell::new(header)).collect())
}

pub(crate) fn active_table(torrents: &[Torrent]) -> Table {
    let mut table = Table::new();
    table.set_titles(header_row(&ACTIVE_HEADERS));
    for torrent in torrents {
        table.add_row(Row::new(vec![
            Cell::new(&torrent.id.to_string()),
            Cell::new(&torrent.name),
            Cell::new(torrent.progress.download_state.as_str()),
            Cell::new(&format_bytes(torrent.size)),
            Cell::new(&format!("{:.1}%", torrent.progress.progress * 100.0)),
            Cell::new(&format!("{}/s", format_bytes(torrent.progress.download_speed))),
            Cell::new(&format!("{}/s", format_bytes(torrent.progress.upload_speed))),
            Cell::new(&format!("{:.2}", torrent.tracker.ratio)),
        ]));
    }
    table
}

pub(crate) fn queued_table(queued: &[QueuedDownload]) -> Table {
    let mut table = Table::new();
    table.set_titles(header_row(&QUEUED_HEADERS));
    for item in queued {
        table.add_row(Row::new(vec![
            Cell::new(&item.id.to_string()),
            Cell::new(&item.name),
            Cell::new(&item.hash),
            Cell::new(&item.kind),
        ]));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_table_columns() {
        let torrent: Torrent = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "debian.iso",
            "size": 2048,
            "download_state": "downloading",
            "progress": 0.5,
            "download_speed": 1024,
            "upload_speed": 0,
            "ratio": 0.25
        }))
        .unwrap();

        let table = active_table(&[torrent]);
        assert_eq!(table.len(), 1);

        let row = table.get_row(0).unwrap();
        let cells: Vec<String> = row.iter().map(|cell| cell.get_content()).collect();
        assert_eq!(
            cells,
            vec![
                "42",
                "debian.iso",
                "downloading",
                "2.0 KiB",
                "50.0%",
                "1.0 KiB/s",
                "0 B/s",
                "0.25"
            ]
        );

        let rendered = table.to_string();
        for column in ACTIVE_HEADERS {
            assert!(rendered.contains(column), "missing column {}", column);
        }
    }

    #[test]
    fn test_queued_table() {
        let queued = QueuedDownload {
            id: 7,
            name: "waiting".to_string(),
            hash: "abc".to_string(),
            kind: "torrent".to_string(),
            ..Default::default()
        };

        let table = queued_table(&[queued]);
        let cells: Vec<String> = table
            .get_row(0)
            .unwrap()
            .iter()
            .map(|cell| cell.get_content())
            .collect();
        assert_eq!(cells, vec!["7", "waiting", "abc", "torrent"]);
        assert!(table.to_string().contains("Hash"));
    }
}
