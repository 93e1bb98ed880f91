use clap::Args;
use serde::Serialize;

use common::prelude::ErrorKind;
use scipfs_bridge::kubo::{parse, ToolError};

use crate::cli::op::Classify;
use crate::cli::ops::tool_args;

/// Generate a named key in the daemon's key store
#[derive(Args, Debug, Clone)]
pub struct GenIpnsKey {
    /// Name for the new IPNS key
    #[arg(long)]
    pub key_name: Option<String>,

    /// Type of key to generate (e.g., rsa, ed25519)
    #[arg(long, default_value = "rsa")]
    pub key_type: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratedKey {
    /// always the requested name, whatever the tool echoes
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Id")]
    pub id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GenKeyError {
    #[error("Argument --key-name is required")]
    MissingKeyName,
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl Classify for GenKeyError {
    fn kind(&self) -> ErrorKind {
        match self {
            GenKeyError::MissingKeyName => ErrorKind::Validation,
            GenKeyError::Tool(e) => e.kind(),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for GenIpnsKey {
    type Error = GenKeyError;
    type Output = GeneratedKey;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let name = self
            .key_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(GenKeyError::MissingKeyName)?;

        let args = tool_args(["key", "gen", name, "--type", self.key_type.as_str()]);
        let output = ctx.tool.run(&args, None).await?;
        let id = parse::generated_key_id(&output.stdout)
            .ok_or_else(|| ToolError::unexpected(&args, &output))?;

        tracing::info!(key = name, %id, "key generated");
        Ok(GeneratedKey {
            name: name.to_string(),
            id,
        })
    }
}
