use common::prelude::{DaemonVersion, ErrorKind, VersionError, MIN_DAEMON_VERSION};

use crate::kubo::parse;
use crate::kubo::{IpfsTool, ToolError, ToolOutput};

#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("IPFS Version Check Failed: {0}")]
    Tool(#[from] ToolError),
    #[error("IPFS Version Check Failed: 'ipfs version --number' returned empty output. Stderr: {0}")]
    EmptyOutput(String),
    #[error("IPFS Version Check Failed: failed to compare IPFS versions (installed: '{installed}', required: '{required}'): {source}")]
    Malformed {
        installed: String,
        required: &'static str,
        #[source]
        source: VersionError,
    },
    #[error("IPFS Version Check Failed: installed IPFS version '{installed}' is older than required version '{required}'. Please upgrade your IPFS (Kubo) daemon/CLI to {required} or newer")]
    TooOld {
        installed: DaemonVersion,
        required: DaemonVersion,
    },
}

impl GateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GateError::Tool(e) => e.kind(),
            GateError::EmptyOutput(_) => ErrorKind::Upstream,
            GateError::Malformed { .. } | GateError::TooOld { .. } => ErrorKind::Configuration,
        }
    }
}

/// Ask the daemon's tool for its version and refuse anything older than
/// [`MIN_DAEMON_VERSION`].
pub async fn check_daemon_version(tool: &dyn IpfsTool) -> Result<DaemonVersion, GateError> {
    let args = vec!["version".to_string(), "--number".to_string()];
    let output = tool.run(&args, None).await?;
    let installed = check_reported_version(&output)?;

    tracing::debug!(%installed, required = MIN_DAEMON_VERSION, "daemon version accepted");
    Ok(installed)
}

fn check_reported_version(output: &ToolOutput) -> Result<DaemonVersion, GateError> {
    let reported = parse::version_number(&output.stdout)
        .ok_or_else(|| GateError::EmptyOutput(output.stderr.trim().to_string()))?;

    let installed: DaemonVersion = reported.parse().map_err(|source| GateError::Malformed {
        installed: reported.to_string(),
        required: MIN_DAEMON_VERSION,
        source,
    })?;

    let required = DaemonVersion::minimum();
    if installed.is_older_than(&required) {
        return Err(GateError::TooOld {
            installed,
            required,
        });
    }

    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(stdout: &str) -> ToolOutput {
        ToolOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    #[test]
    fn test_accepts_current_and_newer() {
        assert_eq!(
            check_reported_version(&output("0.34.1\n")).unwrap(),
            DaemonVersion::new(0, 34, 1)
        );
        assert_eq!(
            check_reported_version(&output("v0.36.0\n")).unwrap(),
            DaemonVersion::new(0, 36, 0)
        );
        assert!(check_reported_version(&output("1.0.0")).is_ok());
    }

    #[test]
    fn test_rejects_older() {
        let err = check_reported_version(&output("0.33.0\n")).unwrap_err();
        assert!(matches!(err, GateError::TooOld { .. }));
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("'0.33.0' is older than required version '0.34.1'"));
    }

    #[test]
    fn test_malformed_is_fatal() {
        let err = check_reported_version(&output("0.34.1-dev")).unwrap_err();
        assert!(matches!(err, GateError::Malformed { .. }));
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = check_reported_version(&output("0.34")).unwrap_err();
        assert!(matches!(err, GateError::Malformed { .. }));
    }

    #[test]
    fn test_empty_output() {
        let err = check_reported_version(&output("  \n")).unwrap_err();
        assert!(matches!(err, GateError::EmptyOutput(_)));
    }
}
