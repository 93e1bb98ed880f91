use clap::Args;

use common::prelude::ErrorKind;
use scipfs_bridge::kubo::Identity;

use crate::cli::op::{Classify, NotConnected};

/// Identity of the connected daemon (peer id, agent, protocol, addresses)
#[derive(Args, Debug, Clone)]
pub struct DaemonInfo;

#[derive(Debug, thiserror::Error)]
pub enum DaemonInfoError {
    #[error(transparent)]
    NotConnected(#[from] NotConnected),
}

impl Classify for DaemonInfoError {
    fn kind(&self) -> ErrorKind {
        match self {
            DaemonInfoError::NotConnected(e) => e.kind(),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for DaemonInfo {
    type Error = DaemonInfoError;
    type Output = Identity;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // the probe already fetched it
        Ok(ctx.daemon()?.identity.clone())
    }
}
