use reqwest::Client;
use tokio::fs::File;
use url::Url;

use common::prelude::IpfsPath;

use super::error::RpcError;
use super::requests::{AddRequest, AddedFile, IdRequest, Identity, PinAddRequest};
use super::{ApiRequest, KuboApi};

/// HTTP client for the daemon's `/api/v0` RPC surface.
#[derive(Debug, Clone)]
pub struct KuboClient {
    pub remote: Url,
    client: Client,
}

impl KuboClient {
    pub fn new(remote: &Url) -> Result<Self, RpcError> {
        let client = Client::builder().build()?;

        Ok(Self {
            remote: remote.clone(),
            client,
        })
    }

    pub async fn call<T: ApiRequest>(&self, request: T) -> Result<T::Response, RpcError> {
        let url = self.remote.join(T::ENDPOINT)?;
        tracing::debug!(endpoint = T::ENDPOINT, "rpc call");

        let response = request
            .build_request(url, &self.client)
            .timeout(T::TIMEOUT)
            .send()
            .await
            .map_err(timeout_aware::<T>)?;

        let status = response.status();
        let body = response.bytes().await.map_err(timeout_aware::<T>)?;

        if !status.is_success() {
            return Err(RpcError::HttpStatus(
                status,
                String::from_utf8_lossy(&body).trim().to_string(),
            ));
        }

        T::decode(&body).map_err(|e| RpcError::Decode {
            endpoint: T::ENDPOINT,
            reason: e.to_string(),
        })
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> &Url {
        &self.remote
    }
}

fn timeout_aware<T: ApiRequest>(err: reqwest::Error) -> RpcError {
    if err.is_timeout() {
        RpcError::Timeout {
            endpoint: T::ENDPOINT,
            after: T::TIMEOUT,
        }
    } else {
        RpcError::Reqwest(err)
    }
}

#[async_trait::async_trait]
impl KuboApi for KuboClient {
    async fn id(&self) -> Result<Identity, RpcError> {
        self.call(IdRequest).await
    }

    async fn pin_add(&self, path: &IpfsPath) -> Result<(), RpcError> {
        let response = self
            .call(PinAddRequest {
                path: path.to_string(),
            })
            .await?;
        tracing::debug!(pins = ?response.pins, "pin added");
        Ok(())
    }

    async fn add_file(&self, file_name: &str, file: File, len: u64) -> Result<AddedFile, RpcError> {
        self.call(AddRequest {
            file_name: file_name.to_string(),
            file,
            len,
        })
        .await
    }
}
