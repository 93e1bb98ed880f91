use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use clap::Args;
use tokio::fs::File;

use common::prelude::{parse_cid, CidError, ErrorKind};
use scipfs_bridge::kubo::RpcError;

use super::AddedOutput;
use crate::cli::op::{Classify, NotConnected};

/// Add a single local file to the daemon, without pinning it
#[derive(Args, Debug, Clone)]
pub struct AddFile {
    /// Path to the file to add
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum AddFileError {
    #[error("Argument --file <path> is required for add_file command")]
    MissingFile,
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Error accessing file '{}': {source}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Path '{}' is a directory, please provide a file to add.", .0.display())]
    IsDirectory(PathBuf),
    #[error("Error reading file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    NotConnected(#[from] NotConnected),
    #[error("Failed to add file '{}' to IPFS: {source}", .path.display())]
    Rpc {
        path: PathBuf,
        #[source]
        source: RpcError,
    },
    #[error("Failed to get a defined CID for file '{}'", .0.display())]
    UndefinedCid(PathBuf),
    #[error("Daemon returned an invalid CID for file '{}': {source}", .path.display())]
    InvalidResult {
        path: PathBuf,
        #[source]
        source: CidError,
    },
}

impl Classify for AddFileError {
    fn kind(&self) -> ErrorKind {
        match self {
            AddFileError::MissingFile
            | AddFileError::NotFound(_)
            | AddFileError::Access { .. }
            | AddFileError::IsDirectory(_)
            | AddFileError::Read { .. } => ErrorKind::Validation,
            AddFileError::NotConnected(e) => e.kind(),
            AddFileError::Rpc { source, .. } => source.kind(),
            AddFileError::UndefinedCid(_) | AddFileError::InvalidResult { .. } => {
                ErrorKind::PostCondition
            }
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for AddFile {
    type Error = AddFileError;
    type Output = AddedOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let path = self.file.as_ref().ok_or(AddFileError::MissingFile)?;
        let (file, len) = open_regular_file(path).await?;

        let daemon = ctx.daemon()?;
        let added = daemon
            .api
            .add_file(&file_name(path), file, len)
            .await
            .map_err(|source| AddFileError::Rpc {
                path: path.clone(),
                source,
            })?;

        let hash = added
            .hash
            .filter(|hash| !hash.is_empty())
            .ok_or_else(|| AddFileError::UndefinedCid(path.clone()))?;
        let cid = parse_cid(&hash).map_err(|source| AddFileError::InvalidResult {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), %cid, "file added");
        Ok(AddedOutput {
            cid: cid.to_string(),
        })
    }
}

/// Open a regular file for upload, returning it with its size.
async fn open_regular_file(path: &Path) -> Result<(File, u64), AddFileError> {
    let metadata = tokio::fs::metadata(path).await.map_err(|source| {
        if source.kind() == IoErrorKind::NotFound {
            AddFileError::NotFound(path.to_path_buf())
        } else {
            AddFileError::Access {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    if metadata.is_dir() {
        return Err(AddFileError::IsDirectory(path.to_path_buf()));
    }

    let file = File::open(path).await.map_err(|source| AddFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((file, metadata.len()))
}

/// Name of the multipart part; the daemon echoes it back.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "file".to_string())
}
