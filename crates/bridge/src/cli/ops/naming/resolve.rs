use clap::{ArgAction, Args};
use serde::Serialize;

use common::prelude::ErrorKind;
use scipfs_bridge::kubo::{parse, ToolError};

use crate::cli::op::Classify;
use crate::cli::ops::tool_args;

/// Resolve a naming record to the path it points at
#[derive(Args, Debug, Clone)]
pub struct ResolveIpns {
    /// IPNS name to resolve (e.g., k51... or /ipns/k51...)
    #[arg(long)]
    pub ipns_name: Option<String>,

    /// Resolve without using cached entries
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub nocache: bool,

    /// Resolve recursively until an IPFS path is found
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub recursive: bool,
}

#[derive(Debug, Serialize)]
pub struct ResolvedOutput {
    #[serde(rename = "Path")]
    pub path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Argument --ipns-name is required")]
    MissingName,
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl Classify for ResolveError {
    fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::MissingName => ErrorKind::Validation,
            ResolveError::Tool(e) => e.kind(),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for ResolveIpns {
    type Error = ResolveError;
    type Output = ResolvedOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let name = self
            .ipns_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(ResolveError::MissingName)?;

        // both flags are always spelled out; the daemon defaults recursive to true
        let args = tool_args([
            "name".to_string(),
            "resolve".to_string(),
            name.to_string(),
            format!("--nocache={}", self.nocache),
            format!("--recursive={}", self.recursive),
        ]);
        let output = ctx.tool.run(&args, None).await?;
        let path = parse::resolved_path(&output.stdout)
            .ok_or_else(|| ToolError::unexpected(&args, &output))?;

        tracing::debug!(%name, %path, "name resolved");
        Ok(ResolvedOutput { path })
    }
}
