use clap::Args;
use serde_json::Value;

use common::prelude::{parse_cid, CidError, ErrorKind};
use scipfs_bridge::kubo::ToolError;

use crate::cli::op::Classify;
use crate::cli::ops::tool_args;

const EXCERPT_CHARS: usize = 120;

/// Fetch a CID and return its content as a JSON document
#[derive(Args, Debug, Clone)]
pub struct GetJsonCid {
    /// CID of the JSON content to get
    #[arg(long)]
    pub cid: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetJsonCidError {
    #[error("Argument --cid <cid_string> is required")]
    MissingCid,
    #[error(transparent)]
    InvalidCid(#[from] CidError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("Failed to unmarshal JSON from CID {cid}: {source}. Raw data: {excerpt}")]
    NotJson {
        cid: String,
        excerpt: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Classify for GetJsonCidError {
    fn kind(&self) -> ErrorKind {
        match self {
            GetJsonCidError::MissingCid
            | GetJsonCidError::InvalidCid(_)
            | GetJsonCidError::NotJson { .. } => ErrorKind::Validation,
            GetJsonCidError::Tool(e) => e.kind(),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for GetJsonCid {
    type Error = GetJsonCidError;
    type Output = Value;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let raw = self.cid.as_deref().ok_or(GetJsonCidError::MissingCid)?;
        let cid = parse_cid(raw)?.to_string();

        let args = tool_args(["cat".to_string(), cid.clone()]);
        let output = ctx.tool.run(&args, None).await?;

        serde_json::from_str(&output.stdout).map_err(|source| GetJsonCidError::NotJson {
            cid,
            excerpt: excerpt(&output.stdout),
            source,
        })
    }
}

/// First line of `raw`, cut to a bounded number of characters.
fn excerpt(raw: &str) -> String {
    let line = raw.lines().next().unwrap_or("");
    let mut cut: String = line.chars().take(EXCERPT_CHARS).collect();
    if cut.len() < line.len() || raw.lines().nth(1).is_some() {
        cut.push_str("...");
    }
    cut
}
