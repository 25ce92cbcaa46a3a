//! Control of a torrent whose category is only known by looking it up.

use async_trait::async_trait;
use tracing::debug;

use super::GeneralService;
use crate::constants::{ActiveOperation, ControlOperation, QueuedOperation};
use crate::error::{Error, Result};

/// The lookups and control calls [`control_any`] is built from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DownloadLookup: Send + Sync {
    /// Ids of the account's active torrents.
    async fn active_ids(&self) -> Result<Vec<i64>>;

    /// Ids of the account's queued torrents.
    async fn queued_ids(&self) -> Result<Vec<i64>>;

    async fn control_active(&self, id: i64, operation: ActiveOperation) -> Result<()>;

    async fn control_queued(&self, id: i64, operation: QueuedOperation) -> Result<()>;
}

#[async_trait]
impl DownloadLookup for GeneralService {
    async fn active_ids(&self) -> Result<Vec<i64>> {
        Ok(self
            .active_torrents()
            .await?
            .iter()
            .map(|torrent| torrent.id)
            .collect())
    }

    async fn queued_ids(&self) -> Result<Vec<i64>> {
        Ok(self
            .queued_torrents()
            .await?
            .iter()
            .map(|queued| queued.id)
            .collect())
    }

    async fn control_active(&self, id: i64, operation: ActiveOperation) -> Result<()> {
        self.control_active_torrent(id, operation).await
    }

    async fn control_queued(&self, id: i64, operation: QueuedOperation) -> Result<()> {
        self.control_queued_torrent(id, operation).await
    }
}

/// Sends `operation` to torrent `id`, checking the active list first and the queued list second.
///
/// Not atomic: a torrent that moves between lists after the lookup gets the
/// control call for its old category, and the server rejects it.
pub async fn control_any<L>(lookup: &L, id: i64, operation: ControlOperation) -> Result<()>
where
    L: DownloadLookup + ?Sized,
{
    if lookup.active_ids().await?.contains(&id) {
        let active = operation
            .for_active()
            .ok_or_else(|| Error::UnsupportedOperation {
                operation: operation.to_string(),
                category: "active",
            })?;
        debug!(id, operation = %operation, "torrent is active");
        return lookup.control_active(id, active).await;
    }

    if lookup.queued_ids().await?.contains(&id) {
        let queued = operation
            .for_queued()
            .ok_or_else(|| Error::UnsupportedOperation {
                operation: operation.to_string(),
                category: "queued",
            })?;
        debug!(id, operation = %operation, "torrent is queued");
        return lookup.control_queued(id, queued).await;
    }

    Err(Error::NotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_active_torrent_gets_active_operation() {
        let mut lookup = MockDownloadLookup::new();
        lookup.expect_active_ids().returning(|| Ok(vec![1, 2]));
        lookup.expect_queued_ids().never();
        lookup
            .expect_control_active()
            .with(eq(2), eq(ActiveOperation::Pause))
            .times(1)
            .returning(|_, _| Ok(()));
        lookup.expect_control_queued().never();

        control_any(&lookup, 2, ControlOperation::Pause)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_queued_torrent_gets_queued_operation() {
        let mut lookup = MockDownloadLookup::new();
        lookup.expect_active_ids().returning(|| Ok(vec![1]));
        lookup.expect_queued_ids().returning(|| Ok(vec![9]));
        lookup
            .expect_control_queued()
            .with(eq(9), eq(QueuedOperation::Start))
            .times(1)
            .returning(|_, _| Ok(()));
        lookup.expect_control_active().never();

        control_any(&lookup, 9, ControlOperation::Start)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_operation_invalid_for_category() {
        let mut lookup = MockDownloadLookup::new();
        lookup.expect_active_ids().returning(|| Ok(vec![]));
        lookup.expect_queued_ids().returning(|| Ok(vec![9]));
        lookup.expect_control_queued().never();

        let err = control_any(&lookup, 9, ControlOperation::Pause)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedOperation {
                category: "queued",
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Operation 'pause' is not supported for queued torrents"
        );
    }

    #[tokio::test]
    async fn test_start_is_invalid_for_active() {
        let mut lookup = MockDownloadLookup::new();
        lookup.expect_active_ids().returning(|| Ok(vec![4]));
        lookup.expect_control_active().never();

        let err = control_any(&lookup, 4, ControlOperation::Start)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedOperation {
                category: "active",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let mut lookup = MockDownloadLookup::new();
        lookup.expect_active_ids().returning(|| Ok(vec![1]));
        lookup.expect_queued_ids().returning(|| Ok(vec![2]));

        let err = control_any(&lookup, 3, ControlOperation::Delete)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(3)));
        assert_eq!(err.to_string(), "Torrent with ID 3 is neither active nor queued");
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let mut lookup = MockDownloadLookup::new();
        lookup
            .expect_active_ids()
            .returning(|| Err(Error::MissingData("get active torrents")));
        lookup.expect_queued_ids().never();

        let err = control_any(&lookup, 1, ControlOperation::Delete)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingData(_)));
    }

    #[tokio::test]
    async fn test_service_dispatches_over_http() {
        use super::super::test_support::{ok, service};
        use mockito::{Matcher, Server};
        use serde_json::json;

        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/torrents/mylist")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(ok(json!([{"id": 1}])))
            .create_async()
            .await;
        server
            .mock("GET", "/api/queued/getqueued")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(ok(json!([{"id": 8, "name": "waiting"}])))
            .create_async()
            .await;
        let control = server
            .mock("POST", "/api/queued/controlqueued")
            .match_body(Matcher::Json(json!({"queued_id": 8, "operation": "delete"})))
            .with_status(200)
            .with_body(ok(json!(null)))
            .create_async()
            .await;

        service(&server.url())
            .control_any_torrent(8, ControlOperation::Delete)
            .await
            .unwrap();
        control.assert_async().await;
    }
}
