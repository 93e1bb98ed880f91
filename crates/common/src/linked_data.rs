pub use cid::Cid;

/// A string that failed to decode as a content identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid CID format for '{input}': {reason}")]
pub struct CidError {
    pub input: String,
    pub reason: String,
}

/// Decode a CID string under the multibase / multicodec / multihash grammar.
///
/// Both v0 (`Qm...`, base58btc) and v1 (any multibase) forms are accepted.
/// Surrounding whitespace is not trimmed: callers that read identifiers out
/// of tool output are expected to trim first.
pub fn parse_cid(input: &str) -> Result<Cid, CidError> {
    if input.is_empty() {
        return Err(CidError {
            input: String::new(),
            reason: "empty identifier".to_string(),
        });
    }

    Cid::try_from(input).map_err(|e| CidError {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Validate a CID string and return its canonical textual form.
///
/// v0 identifiers stay base58btc, v1 identifiers are re-encoded as
/// lower-case base32. Feeding the result back in yields the same string.
pub fn canonical_cid(input: &str) -> Result<String, CidError> {
    parse_cid(input).map(|cid| cid.to_string())
}
