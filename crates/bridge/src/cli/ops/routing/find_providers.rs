use clap::Args;
use serde::Serialize;

use common::prelude::{parse_cid, ErrorKind};
use scipfs_bridge::kubo::{parse, ToolError};

use crate::cli::op::Classify;
use crate::cli::ops::tool_args;

/// Ask the routing layer which peers provide a CID
#[derive(Args, Debug, Clone)]
pub struct DhtFindProviders {
    /// CID to find providers for
    #[arg(long)]
    pub cid: Option<String>,

    /// Number of providers to find
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    pub num_providers: u32,
}

#[derive(Debug, Serialize)]
pub struct ProvidersOutput {
    pub providers: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FindProvidersError {
    #[error("Argument --cid is required")]
    MissingCid,
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl Classify for FindProvidersError {
    fn kind(&self) -> ErrorKind {
        match self {
            FindProvidersError::MissingCid => ErrorKind::Validation,
            FindProvidersError::Tool(e) => e.kind(),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for DhtFindProviders {
    type Error = FindProvidersError;
    type Output = ProvidersOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let raw = self
            .cid
            .as_deref()
            .filter(|cid| !cid.is_empty())
            .ok_or(FindProvidersError::MissingCid)?;

        // an undecodable CID has no providers
        let cid = match parse_cid(raw) {
            Ok(cid) => cid,
            Err(e) => {
                tracing::warn!("{}; reporting no providers", e);
                return Ok(ProvidersOutput {
                    providers: Vec::new(),
                });
            }
        };

        // no local deadline: the daemon bounds its own routing walk
        let args = tool_args([
            "routing".to_string(),
            "findprovs".to_string(),
            format!("--num-providers={}", self.num_providers),
            cid.to_string(),
        ]);
        let output = ctx.tool.run(&args, None).await?;

        Ok(ProvidersOutput {
            providers: parse::providers(&output.stdout),
        })
    }
}
