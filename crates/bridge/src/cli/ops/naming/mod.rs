pub mod gen_key;
pub mod list_keys;
pub mod publish;
pub mod resolve;

pub use gen_key::GenIpnsKey;
pub use list_keys::ListIpnsKeys;
pub use publish::PublishIpns;
pub use resolve::ResolveIpns;
