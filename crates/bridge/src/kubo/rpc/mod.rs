mod client;
mod error;
pub mod requests;

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tokio::fs::File;
use url::Url;

use common::prelude::IpfsPath;

pub use client::KuboClient;
pub use error::RpcError;
pub use requests::{AddedFile, Identity};

/// Deadline for the liveness probe.
pub const IDENTITY_TIMEOUT: Duration = Duration::from_secs(10);
/// Deadline for a recursive pin.
pub const PIN_TIMEOUT: Duration = Duration::from_secs(60);
/// Deadline for a single-file ingestion.
pub const ADD_TIMEOUT: Duration = Duration::from_secs(120);

/// One endpoint of the daemon's HTTP RPC surface.
pub trait ApiRequest {
    type Response: DeserializeOwned;

    /// Path below the API base, e.g. `/api/v0/id`
    const ENDPOINT: &'static str;
    const TIMEOUT: Duration;

    fn build_request(self, url: Url, client: &Client) -> RequestBuilder;

    /// Decode a successful response body.
    fn decode(body: &[u8]) -> Result<Self::Response, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

/// The structured operations the bridge performs over RPC. Handlers only
/// see this trait, so tests can hand them a fake daemon.
#[async_trait::async_trait]
pub trait KuboApi: Send + Sync {
    /// Identity query used as the liveness probe.
    async fn id(&self) -> Result<Identity, RpcError>;

    /// Recursively pin a path.
    async fn pin_add(&self, path: &IpfsPath) -> Result<(), RpcError>;

    /// Ingest a single file node, unpinned, with default chunking.
    async fn add_file(&self, file_name: &str, file: File, len: u64) -> Result<AddedFile, RpcError>;
}
