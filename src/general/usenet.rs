use super::GeneralService;
use crate::constants::{
    PATH_USENET_CHECK_CACHED, PATH_USENET_CONTROL, PATH_USENET_CREATE, PATH_USENET_GET_DOWNLOAD,
    PATH_USENET_GET_LIST, UsenetOperation,
};
use crate::error::Result;
use crate::models::{CachedItem, ControlUsenetRequest, CreateUsenetRequest, UsenetDownload};

impl GeneralService {
    pub async fn create_usenet_download(
        &self,
        request: &CreateUsenetRequest,
    ) -> Result<UsenetDownload> {
        const OP: &str = "create usenet download";
        self.send(self.post(PATH_USENET_CREATE).json(request), OP)
            .await?
            .require(OP)
    }

    pub async fn usenet_list(&self) -> Result<Vec<UsenetDownload>> {
        const OP: &str = "get usenet list";
        self.send(self.get(PATH_USENET_GET_LIST).query("bypass_cache", true), OP)
            .await?
            .into_list(OP)
    }

    pub async fn control_usenet_download(
        &self,
        usenet_id: i64,
        operation: UsenetOperation,
    ) -> Result<()> {
        const OP: &str = "control usenet download";
        let body = ControlUsenetRequest {
            usenet_id,
            operation,
        };
        self.send::<serde_json::Value>(self.post(PATH_USENET_CONTROL).json(&body), OP)
            .await?
            .check(OP)
    }

    pub async fn usenet_download_url(&self, usenet_id: i64, file_id: i64) -> Result<String> {
        const OP: &str = "get usenet download URL";
        let builder = self
            .get(PATH_USENET_GET_DOWNLOAD)
            .query("usenet_id", usenet_id)
            .query("file_id", file_id)
            .token_query();
        self.send(builder, OP).await?.require(OP)
    }

    pub async fn check_usenet_cached(&self, hash: &str) -> Result<Vec<CachedItem>> {
        const OP: &str = "check usenet cache";
        let builder = self
            .get(PATH_USENET_CHECK_CACHED)
            .query("hash", hash)
            .query("format", "list");
        self.send(builder, OP).await?.into_list(OP)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{API_KEY, ok, service};
    use crate::constants::UsenetOperation;
    use crate::models::CreateUsenetRequest;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_usenet_download() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/usenet/createusenetdownload")
            .match_body(Matcher::Json(json!({"link": "https://nzb.example.test/a.nzb"})))
            .with_status(200)
            .with_body(ok(json!({"id": 11, "name": "a", "hash": "h"})))
            .create_async()
            .await;

        let request = CreateUsenetRequest {
            link: "https://nzb.example.test/a.nzb".to_string(),
            ..Default::default()
        };
        let download = service(&server.url())
            .create_usenet_download(&request)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(download.id, 11);
    }

    #[tokio::test]
    async fn test_usenet_list_and_control() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/usenet/mylist")
            .match_query(Matcher::UrlEncoded("bypass_cache".into(), "true".into()))
            .with_status(200)
            .with_body(ok(json!([{"id": 1}, {"id": 2}])))
            .create_async()
            .await;
        let control = server
            .mock("POST", "/api/usenet/controlusenetdownload")
            .match_body(Matcher::Json(json!({"usenet_id": 2, "operation": "delete"})))
            .with_status(200)
            .with_body(ok(json!(null)))
            .create_async()
            .await;

        let service = service(&server.url());
        let list = service.usenet_list().await.unwrap();
        service
            .control_usenet_download(list[1].id, UsenetOperation::Delete)
            .await
            .unwrap();

        control.assert_async().await;
    }

    #[tokio::test]
    async fn test_usenet_download_url_and_cache() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/usenet/requestdl")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("usenet_id".into(), "5".into()),
                Matcher::UrlEncoded("file_id".into(), "0".into()),
                Matcher::UrlEncoded("token".into(), API_KEY.into()),
            ]))
            .with_status(200)
            .with_body(ok(json!("https://cdn.example.test/u")))
            .create_async()
            .await;
        server
            .mock("GET", "/api/usenet/checkcached")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("hash".into(), "nzbhash".into()),
                Matcher::UrlEncoded("format".into(), "list".into()),
            ]))
            .with_status(200)
            .with_body(ok(json!(null)))
            .create_async()
            .await;

        let service = service(&server.url());
        assert_eq!(
            service.usenet_download_url(5, 0).await.unwrap(),
            "https://cdn.example.test/u"
        );
        assert!(service.check_usenet_cached("nzbhash").await.unwrap().is_empty());
    }
}
