use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, RequestBuilder};
use tokio::fs::File;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use super::{ApiRequest, ADD_TIMEOUT, IDENTITY_TIMEOUT, PIN_TIMEOUT};

/// Identity record of the connected daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "AgentVersion", default)]
    pub agent_version: String,
    #[serde(rename = "ProtocolVersion", default)]
    pub protocol_version: String,
    #[serde(rename = "Addresses", default, deserialize_with = "null_as_empty")]
    pub addresses: Vec<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default)]
pub struct IdRequest;

impl ApiRequest for IdRequest {
    type Response = Identity;

    const ENDPOINT: &'static str = "/api/v0/id";
    const TIMEOUT: Duration = IDENTITY_TIMEOUT;

    fn build_request(self, url: Url, client: &Client) -> RequestBuilder {
        client.post(url)
    }
}

#[derive(Debug, Clone)]
pub struct PinAddRequest {
    /// Namespaced path, `/ipfs/<cid>`
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PinAddResponse {
    #[serde(rename = "Pins", default, deserialize_with = "null_as_empty")]
    pub pins: Vec<String>,
}

impl ApiRequest for PinAddRequest {
    type Response = PinAddResponse;

    const ENDPOINT: &'static str = "/api/v0/pin/add";
    const TIMEOUT: Duration = PIN_TIMEOUT;

    fn build_request(self, url: Url, client: &Client) -> RequestBuilder {
        client
            .post(url)
            .query(&[("arg", self.path.as_str()), ("recursive", "true")])
    }
}

/// Single-file upload. The file is streamed into the multipart body rather
/// than buffered.
#[derive(Debug)]
pub struct AddRequest {
    pub file_name: String,
    pub file: File,
    /// size of `file` in bytes, sent as the part length
    pub len: u64,
}

/// One entry of the ingestion stream. `hash` is the root CID of the
/// added node; it is optional so an undefined root can be detected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddedFile {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Hash", default)]
    pub hash: Option<String>,
}

impl ApiRequest for AddRequest {
    type Response = AddedFile;

    const ENDPOINT: &'static str = "/api/v0/add";
    const TIMEOUT: Duration = ADD_TIMEOUT;

    fn build_request(self, url: Url, client: &Client) -> RequestBuilder {
        let part =
            Part::stream_with_length(Body::from(self.file), self.len).file_name(self.file_name);
        let form = Form::new().part("file", part);
        client
            .post(url)
            .query(&[("pin", "false")])
            .multipart(form)
    }

    /// The endpoint answers with newline-delimited JSON; the last
    /// object describes the root node.
    fn decode(body: &[u8]) -> Result<Self::Response, serde_json::Error> {
        let text = String::from_utf8_lossy(body);
        let last = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .unwrap_or("");
        serde_json::from_str(last)
    }
}
