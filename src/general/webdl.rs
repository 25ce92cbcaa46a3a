use super::GeneralService;
use crate::constants::{PATH_WEBDL_CONTROL, PATH_WEBDL_CREATE, WebDownloadOperation};
use crate::error::Result;
use crate::models::{ControlWebDownloadRequest, CreateWebDownloadRequest, WebDownload};

impl GeneralService {
    /// Queues a download from a file hoster or plain HTTP link.
    pub async fn create_web_download(
        &self,
        request: &CreateWebDownloadRequest,
    ) -> Result<WebDownload> {
        const OP: &str = "create web download";
        self.send(self.post(PATH_WEBDL_CREATE).json(request), OP)
            .await?
            .require(OP)
    }

    pub async fn control_web_download(
        &self,
        web_id: i64,
        operation: WebDownloadOperation,
    ) -> Result<()> {
        const OP: &str = "control web download";
        let body = ControlWebDownloadRequest { web_id, operation };
        self.send::<serde_json::Value>(self.post(PATH_WEBDL_CONTROL).json(&body), OP)
            .await?
            .check(OP)
    }
}
