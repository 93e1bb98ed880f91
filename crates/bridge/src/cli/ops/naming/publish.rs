use clap::Args;

use common::prelude::{ErrorKind, IpfsPath, PathError};
use scipfs_bridge::kubo::parse::{self, Published};
use scipfs_bridge::kubo::ToolError;

use crate::cli::op::Classify;
use crate::cli::ops::tool_args;

/// Point a naming record at a content or naming path
#[derive(Args, Debug, Clone)]
pub struct PublishIpns {
    /// Name of the IPNS key to publish to
    #[arg(long)]
    pub key_name: Option<String>,

    /// IPFS path to publish (e.g., /ipfs/CID)
    #[arg(long)]
    pub path: Option<String>,

    /// Lifetime of the IPNS record (e.g., 24h, 30m)
    #[arg(long, default_value = "24h")]
    pub lifetime: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Argument --key-name is required")]
    MissingKeyName,
    #[error("Argument --path (IPFS path) is required")]
    MissingPath,
    #[error("Argument --path must start with /ipfs/ or /ipns/")]
    NoNamespace,
    #[error(transparent)]
    InvalidPath(PathError),
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl From<PathError> for PublishError {
    fn from(e: PathError) -> Self {
        match e {
            PathError::MissingNamespace(_) => PublishError::NoNamespace,
            other => PublishError::InvalidPath(other),
        }
    }
}

impl Classify for PublishError {
    fn kind(&self) -> ErrorKind {
        match self {
            PublishError::MissingKeyName
            | PublishError::MissingPath
            | PublishError::NoNamespace
            | PublishError::InvalidPath(_) => ErrorKind::Validation,
            PublishError::Tool(e) => e.kind(),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for PublishIpns {
    type Error = PublishError;
    type Output = Published;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = required(&self.key_name).ok_or(PublishError::MissingKeyName)?;
        let raw_path = required(&self.path).ok_or(PublishError::MissingPath)?;
        let path = IpfsPath::parse(raw_path)?;

        let args = tool_args([
            "name".to_string(),
            "publish".to_string(),
            format!("--key={}", key),
            path.to_string(),
            format!("--lifetime={}", self.lifetime),
            "--allow-offline=true".to_string(),
        ]);
        let output = ctx.tool.run(&args, None).await?;
        let published =
            parse::published(&output.stdout).ok_or_else(|| ToolError::unexpected(&args, &output))?;

        tracing::info!(%key, name = %published.name, value = %published.value, "record published");
        Ok(published)
    }
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
