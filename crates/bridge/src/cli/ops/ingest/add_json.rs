use clap::Args;
use tokio::io::AsyncReadExt;

use common::prelude::ErrorKind;
use scipfs_bridge::kubo::{parse, IpfsTool, ToolError};

use super::AddedOutput;
use crate::cli::op::Classify;
use crate::cli::ops::tool_args;

/// Add a JSON document read from stdin, without pinning it
#[derive(Args, Debug, Clone)]
pub struct AddJson;

#[derive(Debug, thiserror::Error)]
pub enum AddJsonError {
    #[error("Error reading JSON data from stdin: {0}")]
    ReadStdin(#[source] std::io::Error),
    #[error("No JSON data received from stdin")]
    EmptyInput,
    #[error("Invalid JSON data received from stdin: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("'ipfs add -Q' returned an invalid CID '{output}'. Stderr: {stderr}")]
    InvalidCid { output: String, stderr: String },
}

impl Classify for AddJsonError {
    fn kind(&self) -> ErrorKind {
        match self {
            AddJsonError::ReadStdin(_)
            | AddJsonError::EmptyInput
            | AddJsonError::InvalidJson(_) => ErrorKind::Validation,
            AddJsonError::Tool(e) => e.kind(),
            AddJsonError::InvalidCid { .. } => ErrorKind::Upstream,
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for AddJson {
    type Error = AddJsonError;
    type Output = AddedOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut input = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut input)
            .await
            .map_err(AddJsonError::ReadStdin)?;

        ingest_json(ctx.tool.as_ref(), &input).await
    }
}

/// Validate `input` as JSON and feed the raw bytes to `ipfs add`.
async fn ingest_json(tool: &dyn IpfsTool, input: &[u8]) -> Result<AddedOutput, AddJsonError> {
    if input.iter().all(u8::is_ascii_whitespace) {
        return Err(AddJsonError::EmptyInput);
    }
    serde_json::from_slice::<serde::de::IgnoredAny>(input)
        .map_err(AddJsonError::InvalidJson)?;

    let args = tool_args(["add", "-Q", "--cid-version", "1", "--pin=false"]);
    let output = tool.run(&args, Some(input)).await?;

    let cid = parse::quiet_added_cid(&output.stdout).ok_or_else(|| AddJsonError::InvalidCid {
        output: output.stdout.trim().to_string(),
        stderr: output.stderr.trim().to_string(),
    })?;

    tracing::info!(%cid, bytes = input.len(), "json document added");
    Ok(AddedOutput { cid })
}
