use super::GeneralService;
use crate::constants::{
    ActiveOperation, ControlOperation, PATH_TORRENTS_CHECK_CACHED, PATH_TORRENTS_CONTROL_ACTIVE,
    PATH_TORRENTS_CREATE, PATH_TORRENTS_EXPORT_DATA, PATH_TORRENTS_GET_ACTIVE,
    PATH_TORRENTS_GET_DOWNLOAD_URL, PATH_TORRENTS_INFO, PATH_TORRENTS_SEARCH,
    PATH_TORRENTS_STORE_SEARCH,
};
use crate::error::{Error, Result};
use crate::http::{BodyType, FormEncode, MultipartForm, url_encoded};
use crate::models::{
    CachedItem, ControlActiveTorrentRequest, CreateTorrentRequest, SearchResult,
    StoreSearchRequest, Torrent, TorrentInfo,
};

/// File name given to uploaded `.torrent` payloads.
const TORRENT_UPLOAD_NAME: &str = "torrent.torrent";

impl GeneralService {
    /// Lists the account's active torrents, bypassing the server-side cache.
    pub async fn active_torrents(&self) -> Result<Vec<Torrent>> {
        const OP: &str = "get active torrents";
        self.send(self.get(PATH_TORRENTS_GET_ACTIVE).query("bypass_cache", true), OP)
            .await?
            .into_list(OP)
    }

    pub async fn control_active_torrent(
        &self,
        torrent_id: i64,
        operation: ActiveOperation,
    ) -> Result<()> {
        const OP: &str = "control active torrent";
        let body = ControlActiveTorrentRequest {
            torrent_id,
            operation,
        };
        self.send::<serde_json::Value>(self.post(PATH_TORRENTS_CONTROL_ACTIVE).json(&body), OP)
            .await?
            .check(OP)
    }

    /// Adds a torrent from a magnet link or a `.torrent` file.
    ///
    /// A file is uploaded as `multipart/form-data`; a magnet is sent as a URL-encoded form.
    pub async fn create_torrent(&self, request: &CreateTorrentRequest) -> Result<Torrent> {
        const OP: &str = "create torrent";
        let fields = request.form_fields();

        let builder = match &request.file {
            Some(content) => {
                let (content_type, body) = MultipartForm::new()
                    .fields(&fields)
                    .file("file", TORRENT_UPLOAD_NAME, content)
                    .finish();
                self.post(PATH_TORRENTS_CREATE)
                    .bytes(body)
                    .body_type(BodyType::File { content_type })
            }
            None if request.magnet.is_some() => self
                .post(PATH_TORRENTS_CREATE)
                .bytes(url_encoded(&fields))
                .body_type(BodyType::Form),
            None => {
                return Err(Error::Build(
                    "a magnet link or a torrent file is required".to_string(),
                )
                .during(OP));
            }
        };

        self.send(builder, OP).await?.require(OP)
    }

    /// Requests a download link for one file of a torrent.
    pub async fn download_url(&self, torrent_id: i64, file_id: i64) -> Result<String> {
        const OP: &str = "get download URL";
        let builder = self
            .get(PATH_TORRENTS_GET_DOWNLOAD_URL)
            .query("torrent_id", torrent_id)
            .query("file_id", file_id)
            .token_query();
        self.send(builder, OP).await?.require(OP)
    }

    /// Checks whether a hash is in TorBox's cache. An empty list means "not cached".
    pub async fn check_cached(&self, hash: &str) -> Result<Vec<CachedItem>> {
        const OP: &str = "check cached torrent";
        let builder = self
            .get(PATH_TORRENTS_CHECK_CACHED)
            .query("hash", hash)
            .query("format", "list");
        self.send(builder, OP).await?.into_list(OP)
    }

    pub async fn torrent_info(&self, hash: &str) -> Result<TorrentInfo> {
        const OP: &str = "get torrent info";
        self.send(self.get(PATH_TORRENTS_INFO).query("hash", hash), OP)
            .await?
            .require(OP)
    }

    /// Exports a torrent as a magnet link.
    pub async fn export_data(&self, torrent_id: i64) -> Result<String> {
        const OP: &str = "export torrent data";
        let builder = self
            .get(PATH_TORRENTS_EXPORT_DATA)
            .query("torrent_id", torrent_id)
            .query("type", "magnet");
        self.send(builder, OP).await?.require(OP)
    }

    pub async fn search_torrents(&self, query: &str) -> Result<Vec<SearchResult>> {
        const OP: &str = "search torrents";
        self.send(self.get(PATH_TORRENTS_SEARCH).query("query", query), OP)
            .await?
            .into_list(OP)
    }

    pub async fn store_search(&self, query: &str) -> Result<()> {
        const OP: &str = "store search";
        let body = StoreSearchRequest {
            query: query.to_string(),
        };
        self.send::<serde_json::Value>(self.post(PATH_TORRENTS_STORE_SEARCH).json(&body), OP)
            .await?
            .check(OP)
    }

    /// Controls a torrent without knowing whether it is active or queued.
    ///
    /// Looks the id up in the active list, then in the queued list, and sends
    /// the operation to whichever one holds it. The state can change between
    /// the lookup and the control call; use [`control_active_torrent`] or
    /// [`control_queued_torrent`] when the category is known.
    ///
    /// [`control_active_torrent`]: Self::control_active_torrent
    /// [`control_queued_torrent`]: Self::control_queued_torrent
    pub async fn control_any_torrent(&self, id: i64, operation: ControlOperation) -> Result<()> {
        super::control_any(self, id, operation).await
    }
}
