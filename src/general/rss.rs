use super::GeneralService;
use crate::constants::{PATH_RSS_ADD, PATH_RSS_CONTROL, PATH_RSS_MODIFY, RssOperation};
use crate::error::Result;
use crate::models::{AddRssRequest, ControlRssRequest, ModifyRssRequest, RssFeed};

impl GeneralService {
    pub async fn add_rss(&self, request: &AddRssRequest) -> Result<RssFeed> {
        const OP: &str = "add RSS feed";
        self.send(self.post(PATH_RSS_ADD).json(request), OP)
            .await?
            .require(OP)
    }

    pub async fn control_rss(&self, rss_id: i64, operation: RssOperation) -> Result<()> {
        const OP: &str = "control RSS feed";
        let body = ControlRssRequest { rss_id, operation };
        self.send::<serde_json::Value>(self.post(PATH_RSS_CONTROL).json(&body), OP)
            .await?
            .check(OP)
    }

    pub async fn modify_rss(&self, request: &ModifyRssRequest) -> Result<RssFeed> {
        const OP: &str = "modify RSS feed";
        self.send(self.post(PATH_RSS_MODIFY).json(request), OP)
            .await?
            .require(OP)
    }
}
