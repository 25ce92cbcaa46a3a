use super::GeneralService;
use crate::constants::{PATH_NOTIFICATIONS_CLEAR, PATH_NOTIFICATIONS_LIST, PATH_NOTIFICATIONS_RSS};
use crate::error::Result;
use crate::models::Notification;

impl GeneralService {
    /// The notification feed as RSS XML, authorized through the `token` query parameter.
    pub async fn rss_notifications(&self) -> Result<String> {
        const OP: &str = "get RSS notifications";
        self.send(self.get(PATH_NOTIFICATIONS_RSS).token_query(), OP)
            .await?
            .require(OP)
    }

    pub async fn notifications(&self) -> Result<Vec<Notification>> {
        const OP: &str = "get notifications";
        self.send(self.get(PATH_NOTIFICATIONS_LIST), OP)
            .await?
            .into_list(OP)
    }

    pub async fn clear_notifications(&self) -> Result<()> {
        const OP: &str = "clear notifications";
        self.send::<serde_json::Value>(self.post(PATH_NOTIFICATIONS_CLEAR), OP)
            .await?
            .check(OP)
    }
}
