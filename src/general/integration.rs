//! Cloud-storage integrations.

use super::GeneralService;
use crate::constants::{
    PATH_INTEGRATION_1FICHIER, PATH_INTEGRATION_DROPBOX, PATH_INTEGRATION_GOFILE,
    PATH_INTEGRATION_GOOGLEDRIVE, PATH_INTEGRATION_JOBS, PATH_INTEGRATION_ONEDRIVE,
};
use crate::error::Result;
use crate::models::{IntegrationAuthRequest, IntegrationJob};

impl GeneralService {
    pub async fn authorize_google_drive(&self, request: &IntegrationAuthRequest) -> Result<()> {
        self.authorize(PATH_INTEGRATION_GOOGLEDRIVE, request, "authorize Google Drive")
            .await
    }

    pub async fn authorize_dropbox(&self, request: &IntegrationAuthRequest) -> Result<()> {
        self.authorize(PATH_INTEGRATION_DROPBOX, request, "authorize Dropbox")
            .await
    }

    pub async fn authorize_onedrive(&self, request: &IntegrationAuthRequest) -> Result<()> {
        self.authorize(PATH_INTEGRATION_ONEDRIVE, request, "authorize OneDrive")
            .await
    }

    pub async fn authorize_gofile(&self, request: &IntegrationAuthRequest) -> Result<()> {
        self.authorize(PATH_INTEGRATION_GOFILE, request, "authorize GoFile")
            .await
    }

    pub async fn authorize_1fichier(&self, request: &IntegrationAuthRequest) -> Result<()> {
        self.authorize(PATH_INTEGRATION_1FICHIER, request, "authorize 1Fichier")
            .await
    }

    /// Transfer jobs pushing downloads to connected storage providers.
    pub async fn integration_jobs(&self) -> Result<Vec<IntegrationJob>> {
        const OP: &str = "get integration jobs";
        self.send(self.get(PATH_INTEGRATION_JOBS), OP)
            .await?
            .into_list(OP)
    }

    async fn authorize(
        &self,
        path: &str,
        request: &IntegrationAuthRequest,
        operation: &'static str,
    ) -> Result<()> {
        self.send::<serde_json::Value>(self.post(path).json(request), operation)
            .await?
            .check(operation)
    }
}
