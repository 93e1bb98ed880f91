pub mod args;
pub mod dispatch;
pub mod op;
pub mod ops;

#[cfg(test)]
pub mod testkit;

pub use ops::{
    AddFile, AddJson, DaemonInfo, DhtFindProviders, GenIpnsKey, GetCidToFile, GetJsonCid,
    ListIpnsKeys, ListPinnedCids, Pin, PublishIpns, ResolveIpns, Version,
};
