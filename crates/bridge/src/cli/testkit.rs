/// In-process fakes for handler tests
///
/// `FakeTool` stands in for the daemon's command-line tool and `FakeKubo`
/// for its RPC surface. Both record what they were asked to do so tests can
/// assert on the exact invocations.
///
/// # Example
///
/// ```rust,ignore
/// let kubo = FakeKubo::new();
/// let tool = FakeTool::new().reply("12D3KooWa\n");
/// let ctx = tool.connected_context(&kubo);
/// ```
use std::fs::File;
use std::io::Write;
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use tokio::io::AsyncReadExt;

use common::prelude::IpfsPath;
use scipfs_bridge::kubo::rpc::AddedFile;
use scipfs_bridge::kubo::tool::display_command;
use scipfs_bridge::kubo::{Identity, IpfsTool, KuboApi, RpcError, ToolError, ToolOutput};

use crate::cli::op::OpContext;

pub const CID_V0: &str = "QmPZ9gcCEpqKTo6aq61g2nXGUhM4iCL3ewB6LDXZCtioEB";
pub const CID_V1: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";

#[derive(Debug, Clone)]
enum Script {
    Reply(String),
    Fail(String),
    /// stream `partial` into the sink, then fail
    FailAfter { partial: String, stderr: String },
}

#[derive(Debug, Default)]
struct ToolLog {
    calls: Vec<Vec<String>>,
    stdin: Vec<Vec<u8>>,
}

/// Scripted tool: every invocation gets the same canned answer.
#[derive(Debug, Clone)]
pub struct FakeTool {
    script: Script,
    log: Arc<Mutex<ToolLog>>,
}

impl FakeTool {
    pub fn new() -> Self {
        Self {
            script: Script::Reply(String::new()),
            log: Arc::default(),
        }
    }

    pub fn reply(mut self, stdout: &str) -> Self {
        self.script = Script::Reply(stdout.to_string());
        self
    }

    pub fn fail(mut self, stderr: &str) -> Self {
        self.script = Script::Fail(stderr.to_string());
        self
    }

    pub fn fail_after(mut self, partial: &str, stderr: &str) -> Self {
        self.script = Script::FailAfter {
            partial: partial.to_string(),
            stderr: stderr.to_string(),
        };
        self
    }

    /// Argument vectors of every invocation, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.log.lock().unwrap().calls.clone()
    }

    /// Bytes fed to the child on each invocation that had stdin.
    pub fn stdin(&self) -> Vec<Vec<u8>> {
        self.log.lock().unwrap().stdin.clone()
    }

    pub fn context(&self) -> OpContext {
        OpContext::new(Arc::new(self.clone()))
    }

    pub fn connected_context(&self, kubo: &FakeKubo) -> OpContext {
        self.context()
            .with_daemon(Arc::new(kubo.clone()), FakeKubo::identity())
    }

    fn record(&self, args: &[String], stdin: Option<&[u8]>) {
        let mut log = self.log.lock().unwrap();
        log.calls.push(args.to_vec());
        if let Some(input) = stdin {
            log.stdin.push(input.to_vec());
        }
    }

    fn exited(args: &[String], stderr: &str) -> ToolError {
        ToolError::Exited {
            command: display_command(args),
            status: "exit status: 1".to_string(),
            stderr: stderr.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl IpfsTool for FakeTool {
    async fn run(&self, args: &[String], stdin: Option<&[u8]>) -> Result<ToolOutput, ToolError> {
        self.record(args, stdin);
        match &self.script {
            Script::Reply(stdout) => Ok(ToolOutput {
                stdout: stdout.clone(),
                stderr: String::new(),
            }),
            Script::Fail(stderr) | Script::FailAfter { stderr, .. } => {
                Err(Self::exited(args, stderr))
            }
        }
    }

    async fn run_to_file(&self, args: &[String], mut sink: File) -> Result<(), ToolError> {
        self.record(args, None);
        match &self.script {
            Script::Reply(stdout) => {
                sink.write_all(stdout.as_bytes()).unwrap();
                Ok(())
            }
            Script::Fail(stderr) => Err(Self::exited(args, stderr)),
            Script::FailAfter { partial, stderr } => {
                sink.write_all(partial.as_bytes()).unwrap();
                Err(Self::exited(args, stderr))
            }
        }
    }
}

#[derive(Debug, Default)]
struct KuboLog {
    pinned: Vec<String>,
    added: Vec<(String, Vec<u8>)>,
    id_calls: usize,
}

/// Daemon RPC fake that accepts everything unless told otherwise.
#[derive(Debug, Clone)]
pub struct FakeKubo {
    fail_pin: bool,
    added_hash: Option<String>,
    log: Arc<Mutex<KuboLog>>,
}

impl FakeKubo {
    pub fn new() -> Self {
        Self {
            fail_pin: false,
            added_hash: Some(CID_V1.to_string()),
            log: Arc::default(),
        }
    }

    pub fn identity() -> Identity {
        Identity {
            id: "12D3KooWFakePeer".to_string(),
            agent_version: "kubo/0.34.1/".to_string(),
            protocol_version: "ipfs/0.1.0".to_string(),
            addresses: vec!["/ip4/127.0.0.1/tcp/4001".to_string()],
        }
    }

    pub fn failing_pin(mut self) -> Self {
        self.fail_pin = true;
        self
    }

    /// Hash reported for every added file; `None` leaves it undefined.
    pub fn with_added_hash(mut self, hash: Option<&str>) -> Self {
        self.added_hash = hash.map(str::to_string);
        self
    }

    pub fn pinned(&self) -> Vec<String> {
        self.log.lock().unwrap().pinned.clone()
    }

    pub fn added(&self) -> Vec<(String, Vec<u8>)> {
        self.log.lock().unwrap().added.clone()
    }

    pub fn id_calls(&self) -> usize {
        self.log.lock().unwrap().id_calls
    }
}

#[async_trait::async_trait]
impl KuboApi for FakeKubo {
    async fn id(&self) -> Result<Identity, RpcError> {
        self.log.lock().unwrap().id_calls += 1;
        Ok(Self::identity())
    }

    async fn pin_add(&self, path: &IpfsPath) -> Result<(), RpcError> {
        if self.fail_pin {
            return Err(RpcError::HttpStatus(
                StatusCode::INTERNAL_SERVER_ERROR,
                "pin: block was not found locally (offline)".to_string(),
            ));
        }
        self.log.lock().unwrap().pinned.push(path.to_string());
        Ok(())
    }

    async fn add_file(
        &self,
        file_name: &str,
        mut file: tokio::fs::File,
        len: u64,
    ) -> Result<AddedFile, RpcError> {
        let mut data = Vec::new();
        file.read_to_end(&mut data).await.unwrap();
        assert_eq!(data.len() as u64, len, "declared length disagrees with the file");
        self.log
            .lock()
            .unwrap()
            .added
            .push((file_name.to_string(), data));
        Ok(AddedFile {
            name: file_name.to_string(),
            hash: self.added_hash.clone(),
        })
    }
}
