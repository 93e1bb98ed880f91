use clap::Args;

use scipfs_bridge::kubo::parse::{self, KeyEntry};
use scipfs_bridge::kubo::ToolError;

use crate::cli::ops::tool_args;

/// List the keys held in the daemon's key store
#[derive(Args, Debug, Clone)]
pub struct ListIpnsKeys;

#[async_trait::async_trait]
impl crate::cli::op::Op for ListIpnsKeys {
    type Error = ToolError;
    type Output = Vec<KeyEntry>;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let args = tool_args(["key", "list", "-l"]);
        let output = ctx.tool.run(&args, None).await?;

        let listing = parse::key_listing(&output.stdout);
        for (line, reason) in &listing.skipped {
            tracing::warn!("'ipfs key list -l' output line skipped ({}): {}", reason, line);
        }

        Ok(listing.entries)
    }
}
