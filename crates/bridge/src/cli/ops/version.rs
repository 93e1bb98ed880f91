use std::convert::Infallible;

use clap::Args;
use serde::Serialize;

/// Report the bridge's own version (skips the daemon version gate)
#[derive(Args, Debug, Clone)]
pub struct Version;

#[derive(Debug, Serialize)]
pub struct VersionOutput {
    pub version: &'static str,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Version {
    type Error = Infallible;
    type Output = VersionOutput;

    const CHECKS_DAEMON_VERSION: bool = false;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        Ok(VersionOutput {
            version: env!("CARGO_PKG_VERSION"),
        })
    }
}
