//! Parsers for the human-oriented text the daemon's tool prints.
//!
//! All of the fragile column splitting and sentence matching lives here so
//! the handlers only deal in typed results. Listing parsers are best-effort:
//! malformed lines are returned in `skipped` instead of failing the parse.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use common::prelude::{has_namespace_prefix, parse_cid};

/// Result of a best-effort listing parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    pub entries: T,
    /// lines that were ignored, with the reason
    pub skipped: Vec<(String, &'static str)>,
}

/// `ipfs pin ls --type=<t>` prints `<cid> <type>` per line.
pub fn pin_listing(stdout: &str) -> Listing<BTreeMap<String, String>> {
    let mut entries = BTreeMap::new();
    let mut skipped = Vec::new();

    for line in non_empty_lines(stdout) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            skipped.push((line.to_string(), "unexpected format (not enough parts)"));
            continue;
        }
        match parse_cid(fields[0]) {
            Ok(cid) => {
                entries.insert(cid.to_string(), fields[1].to_string());
            }
            Err(_) => skipped.push((line.to_string(), "non-CID in first part")),
        }
    }

    Listing { entries, skipped }
}

/// `ipfs key gen <name>` prints the key identifier, sometimes followed by
/// the name. Only the identifier is taken.
pub fn generated_key_id(stdout: &str) -> Option<String> {
    stdout.split_whitespace().next().map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyEntry {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
}

/// `ipfs key list -l` prints `<id> <name>` per line.
///
/// Names containing whitespace are cut at the first blank; the tool does
/// not quote them in this mode.
pub fn key_listing(stdout: &str) -> Listing<Vec<KeyEntry>> {
    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for line in non_empty_lines(stdout) {
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(id), Some(name)) => entries.push(KeyEntry {
                id: id.to_string(),
                name: name.to_string(),
            }),
            _ => skipped.push((line.to_string(), "expected '<id> <name>'")),
        }
    }

    Listing { entries, skipped }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Published {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: String,
}

static PUBLISHED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Published to ([^:]+): (.*)$").unwrap());

/// `ipfs name publish` prints `Published to <name>: <value>`.
pub fn published(stdout: &str) -> Option<Published> {
    let captures = PUBLISHED_REGEX.captures(stdout.trim())?;
    Some(Published {
        name: captures.get(1)?.as_str().to_string(),
        value: captures.get(2)?.as_str().to_string(),
    })
}

/// `ipfs name resolve` prints a single namespaced path.
pub fn resolved_path(stdout: &str) -> Option<String> {
    let path = stdout.trim();
    has_namespace_prefix(path).then(|| path.to_string())
}

/// `ipfs routing findprovs` prints one peer identifier per line. The
/// identifiers are taken as-is.
pub fn providers(stdout: &str) -> Vec<String> {
    non_empty_lines(stdout).map(str::to_string).collect()
}

/// `ipfs add -Q` prints the root CID alone. Returns the canonical form, or
/// `None` if the output is not a valid CID.
pub fn quiet_added_cid(stdout: &str) -> Option<String> {
    parse_cid(stdout.trim()).ok().map(|cid| cid.to_string())
}

/// `ipfs version --number` prints the bare version string.
pub fn version_number(stdout: &str) -> Option<&str> {
    let version = stdout.trim();
    (!version.is_empty()).then_some(version)
}

fn non_empty_lines(stdout: &str) -> impl Iterator<Item = &str> {
    stdout.lines().map(str::trim).filter(|line| !line.is_empty())
}
