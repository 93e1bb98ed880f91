pub mod get_cid_to_file;
pub mod get_json_cid;
pub mod list_pinned;
pub mod pin;

pub use get_cid_to_file::GetCidToFile;
pub use get_json_cid::GetJsonCid;
pub use list_pinned::ListPinnedCids;
pub use pin::Pin;
