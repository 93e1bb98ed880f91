// Bridge library: daemon access paths, version gate, settings.
pub mod config;
pub mod gate;
pub mod kubo;
pub mod logging;

pub use config::{BridgeConfig, Settings};
pub use gate::{check_daemon_version, GateError};
