use clap::Args;
use serde::Serialize;

use common::prelude::{parse_cid, CidError, ErrorKind, IpfsPath};
use scipfs_bridge::kubo::RpcError;

use crate::cli::op::{Classify, NotConnected};

/// Recursively pin a CID on the daemon
#[derive(Args, Debug, Clone)]
pub struct Pin {
    /// CID to pin
    pub cid: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PinOutput {
    pub cid: String,
    pub path: String,
    pub status: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum PinError {
    #[error("CID argument required for pin command")]
    MissingCid,
    #[error(transparent)]
    InvalidCid(#[from] CidError),
    #[error(transparent)]
    NotConnected(#[from] NotConnected),
    #[error("Failed to pin IPFS path '{path}': {source}")]
    Rpc {
        path: String,
        #[source]
        source: RpcError,
    },
}

impl Classify for PinError {
    fn kind(&self) -> ErrorKind {
        match self {
            PinError::MissingCid | PinError::InvalidCid(_) => ErrorKind::Validation,
            PinError::NotConnected(e) => e.kind(),
            PinError::Rpc { source, .. } => source.kind(),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Pin {
    type Error = PinError;
    type Output = PinOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let raw = self.cid.as_deref().ok_or(PinError::MissingCid)?;
        let cid = parse_cid(raw)?;
        let path = IpfsPath::from_cid(cid);

        let daemon = ctx.daemon()?;
        daemon
            .api
            .pin_add(&path)
            .await
            .map_err(|source| PinError::Rpc {
                path: path.to_string(),
                source,
            })?;

        tracing::info!(%path, "pinned");
        Ok(PinOutput {
            cid: cid.to_string(),
            path: path.to_string(),
            status: "pinned",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::op::Op;
    use crate::cli::testkit::{FakeKubo, FakeTool, CID_V0};

    fn pin(cid: &str) -> Pin {
        Pin {
            cid: Some(cid.to_string()),
        }
    }

    #[tokio::test]
    async fn test_pin_twice_succeeds() {
        let kubo = FakeKubo::new();
        let ctx = FakeTool::new().connected_context(&kubo);

        let first = pin(CID_V0).execute(&ctx).await.unwrap();
        let second = pin(CID_V0).execute(&ctx).await.unwrap();

        assert_eq!(first.cid, CID_V0);
        assert_eq!(first.path, format!("/ipfs/{}", CID_V0));
        assert_eq!(first.status, "pinned");
        assert_eq!(second.path, first.path);
        assert_eq!(kubo.pinned(), vec![first.path.clone(), first.path]);
    }

    #[tokio::test]
    async fn test_invalid_cid_never_reaches_daemon() {
        let kubo = FakeKubo::new();
        let ctx = FakeTool::new().connected_context(&kubo);

        let err = pin("not-a-cid").execute(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().starts_with("Invalid CID format for 'not-a-cid'"));
        assert!(kubo.pinned().is_empty());
    }

    #[tokio::test]
    async fn test_missing_cid() {
        let ctx = FakeTool::new().connected_context(&FakeKubo::new());
        let err = Pin { cid: None }.execute(&ctx).await.unwrap_err();
        assert!(matches!(err, PinError::MissingCid));
    }

    #[tokio::test]
    async fn test_daemon_failure_is_reported() {
        let kubo = FakeKubo::new().failing_pin();
        let ctx = FakeTool::new().connected_context(&kubo);

        let err = pin(CID_V0).execute(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert!(err
            .to_string()
            .starts_with(&format!("Failed to pin IPFS path '/ipfs/{}'", CID_V0)));
    }
}
