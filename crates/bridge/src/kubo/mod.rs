/**
 * Daemon API address handling: multiaddr in,
 *  HTTP base URL out.
 */
pub mod addr;
/**
 * Text parsers for the tool's human-oriented output.
 */
pub mod parse;
/**
 * Typed HTTP RPC client for structured operations.
 */
pub mod rpc;
/**
 * Child-process access to the daemon's own
 *  command-line tool.
 */
pub mod tool;

pub use addr::{AddrError, ApiAddr, DEFAULT_API_ADDR};
pub use rpc::{Identity, KuboApi, KuboClient, RpcError};
pub use tool::{IpfsCommand, IpfsTool, ToolError, ToolOutput};
