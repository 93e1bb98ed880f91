use std::fmt::Display;
use std::sync::Arc;

use clap::error::{ContextKind, ErrorKind as ClapErrorKind};
use serde_json::Value;

use common::prelude::{ErrorKind, Response};
use scipfs_bridge::config::{self, BridgeConfig, Overrides};
use scipfs_bridge::kubo::{ApiAddr, IpfsCommand, IpfsTool, KuboApi, KuboClient};
use scipfs_bridge::logging::init_logging;
use scipfs_bridge::check_daemon_version;

use crate::cli::args::Args;
use crate::cli::op::{Classify, Op, OpContext};

/// A failed invocation, already rendered for the error envelope.
#[derive(Debug)]
struct Failure {
    kind: ErrorKind,
    message: String,
}

impl Failure {
    fn new(kind: ErrorKind, message: impl Display) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }
}

/// Whether clap is only asking to print help, which is not a failure.
pub fn is_informational(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion
    )
}

/// Render a command-line parse failure as a one-line envelope message.
pub fn parse_error_message(err: &clap::Error, argv: &[String]) -> String {
    match err.kind() {
        ClapErrorKind::MissingSubcommand
        | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            "Subcommand required after global flags (e.g., version, pin, add_file)".to_string()
        }
        ClapErrorKind::InvalidSubcommand => {
            let name = err
                .get(ContextKind::InvalidSubcommand)
                .map(|value| value.to_string())
                .unwrap_or_default();
            format!("Unknown subcommand: '{}'", name)
        }
        _ => {
            let detail = first_line(err);
            match subcommand_in(argv) {
                Some(name) => format!("Error parsing flags for '{}' subcommand: {}", name, detail),
                None => format!("Error parsing global flags: {}", detail),
            }
        }
    }
}

fn first_line(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

fn subcommand_in(argv: &[String]) -> Option<&'static str> {
    argv.iter()
        .skip(1)
        .find_map(|arg| crate::Command::NAMES.iter().find(|name| **name == arg.as_str()).copied())
}

/// Write the envelope to the right stream and terminate.
pub fn emit(response: Response) -> ! {
    let line = response.to_line();
    if response.success {
        println!("{}", line);
    } else {
        eprintln!("{}", line);
    }
    std::process::exit(response.exit_code())
}

/// Run one parsed invocation to completion.
pub async fn run(args: Args) -> Response {
    let name = args.command.name();
    match invoke(args).await {
        Ok(data) => Response::ok(data),
        Err(failure) => {
            tracing::debug!(command = name, kind = ?failure.kind, "invocation failed");
            Response::err(failure.message)
        }
    }
}

async fn invoke(args: Args) -> Result<Value, Failure> {
    let overrides = Overrides {
        api: args.api,
        ipfs_bin: args.ipfs_bin,
        log_level: args.log_level,
    };

    let loaded = match &args.config {
        Some(path) => BridgeConfig::load(path).map(Some),
        None => Ok(None),
    };
    let loaded = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            init_logging(overrides.log_level.as_deref().unwrap_or(config::DEFAULT_LOG_LEVEL));
            return Err(Failure::new(e.kind(), e));
        }
    };

    let settings = config::resolve(overrides, loaded);
    init_logging(&settings.log_level);
    tracing::debug!(?settings, command = args.command.name(), "starting");

    let tool: Arc<dyn IpfsTool> = Arc::new(
        IpfsCommand::new(settings.ipfs_bin.clone())
            .with_api(settings.api_explicit.then(|| settings.api.clone()))
            .with_timeout(settings.tool_timeout),
    );

    if args.command.checks_daemon_version() {
        check_daemon_version(tool.as_ref())
            .await
            .map_err(|e| Failure::new(e.kind(), e))?;
    }
    let ctx = connect(OpContext::new(tool), &settings.api).await?;

    let output = args
        .command
        .execute(&ctx)
        .await
        .map_err(|e| Failure::new(e.kind(), e))?;

    serde_json::to_value(output).map_err(|e| {
        Failure::new(
            ErrorKind::Upstream,
            format!("Failed to marshal JSON response: {}", e),
        )
    })
}

/// Parse the address, build the RPC handle and probe it with an identity
/// query.
async fn connect(ctx: OpContext, api: &str) -> Result<OpContext, Failure> {
    let addr = ApiAddr::parse(api).map_err(|e| Failure::new(ErrorKind::Configuration, e))?;

    let client = KuboClient::new(addr.base_url()).map_err(|e| {
        Failure::new(
            ErrorKind::Connectivity,
            format!("Failed to connect to IPFS node at {}: {}", api, e),
        )
    })?;

    let identity = client.id().await.map_err(|e| {
        Failure::new(
            ErrorKind::Connectivity,
            format!(
                "Failed to get ID from IPFS node at {} (connection check failed): {}",
                api, e
            ),
        )
    })?;

    tracing::debug!(peer = %identity.id, agent = %identity.agent_version, "daemon reachable");
    Ok(ctx.with_daemon(Arc::new(client), identity))
}
