use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use common::prelude::{parse_cid, CidError, ErrorKind};
use scipfs_bridge::kubo::ToolError;

use crate::cli::op::Classify;
use crate::cli::ops::tool_args;

/// Stream the content behind a CID into a local file
#[derive(Args, Debug, Clone)]
pub struct GetCidToFile {
    /// CID of the content to get
    #[arg(long)]
    pub cid: Option<String>,

    /// Path to save the output file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct GetCidToFileOutput {
    pub message: String,
    pub cid: String,
    pub output_path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GetCidToFileError {
    #[error("Argument --cid <cid_string> is required")]
    MissingCid,
    #[error("Argument --output <output_path> is required")]
    MissingOutput,
    #[error(transparent)]
    InvalidCid(#[from] CidError),
    #[error("Error creating output file '{}': {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl Classify for GetCidToFileError {
    fn kind(&self) -> ErrorKind {
        match self {
            GetCidToFileError::MissingCid
            | GetCidToFileError::MissingOutput
            | GetCidToFileError::InvalidCid(_)
            | GetCidToFileError::CreateOutput { .. } => ErrorKind::Validation,
            GetCidToFileError::Tool(e) => e.kind(),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for GetCidToFile {
    type Error = GetCidToFileError;
    type Output = GetCidToFileOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let raw = self.cid.as_deref().ok_or(GetCidToFileError::MissingCid)?;
        let output_path = self
            .output
            .as_ref()
            .ok_or(GetCidToFileError::MissingOutput)?;
        let cid = parse_cid(raw)?.to_string();

        let file = std::fs::File::create(output_path).map_err(|source| {
            GetCidToFileError::CreateOutput {
                path: output_path.clone(),
                source,
            }
        })?;

        let args = tool_args(["cat".to_string(), cid.clone()]);
        if let Err(e) = ctx.tool.run_to_file(&args, file).await {
            // never leave truncated data behind a reported failure
            if let Err(rm) = tokio::fs::remove_file(output_path).await {
                tracing::warn!(
                    "failed to remove partial output {}: {}",
                    output_path.display(),
                    rm
                );
            }
            return Err(e.into());
        }

        let output_path = output_path.display().to_string();
        Ok(GetCidToFileOutput {
            message: format!("File downloaded successfully to {}", output_path),
            cid,
            output_path,
        })
    }
}
