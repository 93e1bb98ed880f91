use std::error::Error;
use std::fmt::Debug;
use std::sync::Arc;

use serde::Serialize;

use common::prelude::ErrorKind;
use scipfs_bridge::kubo::{Identity, IpfsTool, KuboApi, ToolError};

/// Everything a handler may touch. Built once per invocation and passed
/// down explicitly; tests build one around fakes.
#[derive(Clone)]
pub struct OpContext {
    /// The daemon's own command-line tool
    pub tool: Arc<dyn IpfsTool>,
    daemon: Option<Connected>,
}

/// A probed RPC handle and the identity it answered with.
#[derive(Clone)]
pub struct Connected {
    pub api: Arc<dyn KuboApi>,
    pub identity: Identity,
}

impl std::fmt::Debug for OpContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpContext")
            .field("connected", &self.daemon.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("not connected to an IPFS daemon")]
pub struct NotConnected;

impl OpContext {
    pub fn new(tool: Arc<dyn IpfsTool>) -> Self {
        Self { tool, daemon: None }
    }

    pub fn with_daemon(mut self, api: Arc<dyn KuboApi>, identity: Identity) -> Self {
        self.daemon = Some(Connected { api, identity });
        self
    }

    pub fn daemon(&self) -> Result<&Connected, NotConnected> {
        self.daemon.as_ref().ok_or(NotConnected)
    }
}

/// Errors that know where they sit in the failure taxonomy.
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}

impl Classify for std::convert::Infallible {
    fn kind(&self) -> ErrorKind {
        match *self {}
    }
}

impl Classify for ToolError {
    fn kind(&self) -> ErrorKind {
        ToolError::kind(self)
    }
}

impl Classify for NotConnected {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Connectivity
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Classify + Send + Sync + 'static;
    type Output: Serialize + Debug + Send;

    /// Whether the daemon version gate must pass first. The liveness probe
    /// runs for every op regardless.
    const CHECKS_DAEMON_VERSION: bool = true;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

/// Builds the subcommand registry: the clap `Command` enum, plus the
/// output and error enums that wrap every handler's own types.
#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $name:literal, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $(
                #[command(name = $name)]
                $variant($type),
            )*
        }

        #[derive(Debug, serde::Serialize)]
        #[serde(untagged)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        impl $crate::cli::op::Classify for OpError {
            fn kind(&self) -> ::common::prelude::ErrorKind {
                match self {
                    $(OpError::$variant(e) => $crate::cli::op::Classify::kind(e),)*
                }
            }
        }

        impl Command {
            /// Every registered subcommand name, in registration order.
            pub const NAMES: &'static [&'static str] = &[$($name),*];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Command::$variant(_) => $name,)*
                }
            }

            pub fn checks_daemon_version(&self) -> bool {
                match self {
                    $(Command::$variant(_) => <$type as $crate::cli::op::Op>::CHECKS_DAEMON_VERSION,)*
                }
            }
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }
    };
}
