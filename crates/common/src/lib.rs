/**
 * Version triples reported by the storage daemon and
 *  the minimum version the bridge will talk to.
 */
pub mod daemon_version;
/**
 * The single JSON envelope every invocation answers with,
 *  plus the error taxonomy it reports.
 */
pub mod envelope;
/**
 * Content and naming namespace paths
 *  (`/ipfs/<cid>` and `/ipns/<name>`).
 */
pub mod ipfs_path;
/**
 * Thin wrapper around the `cid` crate: validation
 *  and canonical string form of content identifiers.
 */
pub mod linked_data;
/**
 * Pin set filters understood by the daemon.
 */
pub mod pins;

pub mod prelude {
    pub use crate::daemon_version::{
        compare_versions, DaemonVersion, VersionError, MIN_DAEMON_VERSION,
    };
    pub use crate::envelope::{ErrorKind, Response};
    pub use crate::ipfs_path::{has_namespace_prefix, IpfsPath, Namespace, PathError};
    pub use crate::linked_data::{canonical_cid, parse_cid, Cid, CidError};
    pub use crate::pins::{PinType, PinTypeError};
}
