use std::fmt;

use crate::linked_data::{parse_cid, Cid, CidError};

pub const IPFS_PREFIX: &str = "/ipfs/";
pub const IPNS_PREFIX: &str = "/ipns/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Ipfs,
    Ipns,
}

impl Namespace {
    pub fn prefix(&self) -> &'static str {
        match self {
            Namespace::Ipfs => IPFS_PREFIX,
            Namespace::Ipns => IPNS_PREFIX,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("path '{0}' must start with /ipfs/ or /ipns/")]
    MissingNamespace(String),
    #[error("path '{0}' has an empty namespace segment")]
    EmptySegment(String),
    #[error(transparent)]
    InvalidCid(#[from] CidError),
}

/// A path the daemon can pin, publish or resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpfsPath {
    /// `/ipfs/<cid>[/<rest>]`, the root CID already validated
    Content { root: Cid, rest: String },
    /// `/ipns/<name>[/<rest>]`, the name is not interpreted
    Name(String),
}

impl IpfsPath {
    /// Content path for a validated CID.
    pub fn from_cid(cid: Cid) -> Self {
        IpfsPath::Content {
            root: cid,
            rest: String::new(),
        }
    }

    /// Parse a namespaced path. A content path must carry a decodable
    /// root CID; a naming path only needs a non-empty name segment.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if let Some(tail) = input.strip_prefix(IPFS_PREFIX) {
            let (root, rest) = split_segment(tail);
            if root.is_empty() {
                return Err(PathError::EmptySegment(input.to_string()));
            }
            let root = parse_cid(root)?;
            return Ok(IpfsPath::Content {
                root,
                rest: rest.to_string(),
            });
        }

        if let Some(tail) = input.strip_prefix(IPNS_PREFIX) {
            if split_segment(tail).0.is_empty() {
                return Err(PathError::EmptySegment(input.to_string()));
            }
            return Ok(IpfsPath::Name(tail.to_string()));
        }

        Err(PathError::MissingNamespace(input.to_string()))
    }

    pub fn namespace(&self) -> Namespace {
        match self {
            IpfsPath::Content { .. } => Namespace::Ipfs,
            IpfsPath::Name(_) => Namespace::Ipns,
        }
    }
}

impl fmt::Display for IpfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpfsPath::Content { root, rest } => write!(f, "{}{}{}", IPFS_PREFIX, root, rest),
            IpfsPath::Name(name) => write!(f, "{}{}", IPNS_PREFIX, name),
        }
    }
}

/// Whether a string starts with one of the two namespace prefixes.
pub fn has_namespace_prefix(input: &str) -> bool {
    input.starts_with(IPFS_PREFIX) || input.starts_with(IPNS_PREFIX)
}

fn split_segment(tail: &str) -> (&str, &str) {
    match tail.find('/') {
        Some(idx) => tail.split_at(idx),
        None => (tail, ""),
    }
}
