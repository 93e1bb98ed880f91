pub mod add_file;
pub mod add_json;

pub use add_file::AddFile;
pub use add_json::AddJson;

use serde::Serialize;

/// Payload of both ingestion commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedOutput {
    pub cid: String,
}
