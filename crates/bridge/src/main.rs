// CLI modules
mod cli;

use clap::Subcommand;
use cli::{
    args::{Args, Parser},
    dispatch,
    op::Op, AddFile, AddJson, DaemonInfo, DhtFindProviders, GenIpnsKey, GetCidToFile,
    GetJsonCid, ListIpnsKeys, ListPinnedCids, Pin, PublishIpns, ResolveIpns, Version,
};

command_enum! {
    (Version, "version", Version),
    (DaemonInfo, "daemon_info", DaemonInfo),
    (Pin, "pin", Pin),
    (AddFile, "add_file", AddFile),
    (GetCidToFile, "get_cid_to_file", GetCidToFile),
    (GetJsonCid, "get_json_cid", GetJsonCid),
    (AddJson, "add_json", AddJson),
    (GenIpnsKey, "gen_ipns_key", GenIpnsKey),
    (ListIpnsKeys, "list_ipns_keys_cmd", ListIpnsKeys),
    (PublishIpns, "publish_ipns", PublishIpns),
    (ResolveIpns, "resolve_ipns", ResolveIpns),
    (ListPinnedCids, "list_pinned_cids", ListPinnedCids),
    (DhtFindProviders, "dht_find_providers", DhtFindProviders),
}

#[tokio::main]
async fn main() {
    let argv: Vec<String> = std::env::args().collect();

    let args = match Args::try_parse_from(&argv) {
        Ok(args) => args,
        Err(e) if dispatch::is_informational(&e) => {
            // help goes to stdout and is not a failure
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => dispatch::emit(common::prelude::Response::err(
            dispatch::parse_error_message(&e, &argv),
        )),
    };

    dispatch::emit(dispatch::run(args).await)
}
