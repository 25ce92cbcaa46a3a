use super::GeneralService;
use crate::constants::{PATH_TORRENTS_CONTROL_QUEUED, PATH_TORRENTS_GET_QUEUED, QueuedOperation};
use crate::error::Result;
use crate::models::{ControlQueuedTorrentRequest, QueuedDownload};

impl GeneralService {
    /// Lists downloads waiting for a slot, bypassing the server-side cache.
    pub async fn queued_torrents(&self) -> Result<Vec<QueuedDownload>> {
        const OP: &str = "get queued torrents";
        self.send(self.get(PATH_TORRENTS_GET_QUEUED).query("bypass_cache", true), OP)
            .await?
            .into_list(OP)
    }

    pub async fn control_queued_torrent(
        &self,
        queued_id: i64,
        operation: QueuedOperation,
    ) -> Result<()> {
        const OP: &str = "control queued torrent";
        let body = ControlQueuedTorrentRequest {
            queued_id,
            operation,
        };
        self.send::<serde_json::Value>(self.post(PATH_TORRENTS_CONTROL_QUEUED).json(&body), OP)
            .await?
            .check(OP)
    }
}
