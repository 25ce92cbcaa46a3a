use super::GeneralService;
use crate::constants::PATH_STATS;
use crate::error::Result;
use crate::models::Stats;

impl GeneralService {
    pub async fn stats(&self) -> Result<Stats> {
        const OP: &str = "get stats";
        self.send(self.get(PATH_STATS), OP).await?.require(OP)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ok, service};
    use mockito::Server;
    use serde_json::json;

    #[tokio::test]
    async fn test_stats() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/stats")
            .with_status(200)
            .with_body(ok(json!({"total_torrents": 12, "active_torrents": 2, "plan": "pro"})))
            .create_async()
            .await;

        let stats = service(&server.url()).stats().await.unwrap();
        assert_eq!(stats.total_torrents, 12);
        assert_eq!(stats.active_torrents, 2);
    }

    #[tokio::test]
    async fn test_stats_retries_server_errors() {
        let mut server = Server::new_async().await;
        let unavailable = server
            .mock("GET", "/api/stats")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;
        let recovered = server
            .mock("GET", "/api/stats")
            .with_status(200)
            .with_body(ok(json!({"total_torrents": 1})))
            .expect(1)
            .create_async()
            .await;

        let stats = service(&server.url()).stats().await.unwrap();

        unavailable.assert_async().await;
        recovered.assert_async().await;
        assert_eq!(stats.total_torrents, 1);
    }
}
