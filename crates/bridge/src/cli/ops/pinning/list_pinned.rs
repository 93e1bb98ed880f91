use std::collections::BTreeMap;

use clap::Args;

use common::prelude::{ErrorKind, PinType, PinTypeError};
use scipfs_bridge::kubo::{parse, ToolError};

use crate::cli::op::Classify;
use crate::cli::ops::tool_args;

/// List pinned CIDs and their pin type
#[derive(Args, Debug, Clone)]
pub struct ListPinnedCids {
    /// Type of pins to list (recursive, direct, indirect, all)
    #[arg(long, default_value = "recursive")]
    pub pin_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ListPinnedError {
    #[error(transparent)]
    InvalidPinType(#[from] PinTypeError),
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl Classify for ListPinnedError {
    fn kind(&self) -> ErrorKind {
        match self {
            ListPinnedError::InvalidPinType(_) => ErrorKind::Validation,
            ListPinnedError::Tool(e) => e.kind(),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for ListPinnedCids {
    type Error = ListPinnedError;
    type Output = BTreeMap<String, String>;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let pin_type: PinType = self.pin_type.parse()?;

        let args = tool_args(["pin".to_string(), "ls".to_string(), format!("--type={}", pin_type)]);
        let output = ctx.tool.run(&args, None).await?;

        let listing = parse::pin_listing(&output.stdout);
        for (line, reason) in &listing.skipped {
            tracing::warn!("'ipfs pin ls' output line skipped ({}): {}", reason, line);
        }

        Ok(listing.entries)
    }
}
