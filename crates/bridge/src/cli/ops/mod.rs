pub mod daemon_info;
pub mod ingest;
pub mod naming;
pub mod pinning;
pub mod routing;
pub mod version;

pub use daemon_info::DaemonInfo;
pub use ingest::{AddFile, AddJson};
pub use naming::{GenIpnsKey, ListIpnsKeys, PublishIpns, ResolveIpns};
pub use pinning::{GetCidToFile, GetJsonCid, ListPinnedCids, Pin};
pub use routing::DhtFindProviders;
pub use version::Version;

/// Owned argument vector for a tool invocation.
pub(crate) fn tool_args<I, S>(parts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    parts.into_iter().map(Into::into).collect()
}
