//! Shared fixtures: a shell-script stand-in for the `ipfs` tool and a
//! minimal HTTP responder for the daemon's RPC endpoints.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

pub const CID_V0: &str = "QmPZ9gcCEpqKTo6aq61g2nXGUhM4iCL3ewB6LDXZCtioEB";
pub const CID_V1: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";
pub const PEER_ID: &str = "12D3KooWFakeDaemonPeer";

/// A fake `ipfs` executable in its own temp directory. Every invocation
/// appends its full argument list to `calls.log`.
///
/// `cat` of `CID_V0` prints a partial payload and then fails, every other
/// `cat` prints a small JSON document.
pub struct FakeIpfs {
    pub dir: TempDir,
    pub bin: PathBuf,
    log: PathBuf,
}

impl FakeIpfs {
    pub fn new(version: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("ipfs");
        let log = dir.path().join("calls.log");

        let script = format!(
            r#"#!/bin/sh
echo "$*" >> "{log}"
case "$1" in
  --api=*) shift ;;
esac
case "$1 $2" in
  "version --number") echo "{version}" ;;
  "pin ls")
    echo "{v0} recursive"
    echo "not-a-cid recursive"
    echo "{v1} direct"
    ;;
  "cat {v0}") printf 'partial bytes'; echo "Error: block not found" >&2; exit 1 ;;
  "cat "*) printf '{{"title":"On Pins","year":2024}}' ;;
  "add -Q") cat > /dev/null; echo "{v1}" ;;
  "key gen") echo "k51fakekey $3" ;;
  "key list")
    echo "{peer} self"
    echo "k51fakekey library"
    ;;
  "name publish") echo "Published to k51fakekey: $4" ;;
  "name resolve") echo "/ipfs/{v1}" ;;
  "routing findprovs")
    echo "{peer}"
    echo "12D3KooWOtherPeer"
    ;;
  "sleep "*) sleep "$2" ;;
  "echo-stdin "*) cat ;;
  *) echo "Error: unknown command '$*'" >&2; exit 1 ;;
esac
"#,
            log = log.display(),
            version = version,
            v0 = CID_V0,
            v1 = CID_V1,
            peer = PEER_ID,
        );

        std::fs::write(&bin, script).unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir, bin, log }
    }

    /// Recorded invocations, one space-joined argument list per line.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// One request as the fake daemon saw it.
#[derive(Debug, Clone)]
pub struct Seen {
    /// path and query, e.g. `/api/v0/pin/add?arg=...`
    pub target: String,
    pub body: Vec<u8>,
}

/// Answers `/api/v0/id`, `/api/v0/pin/add` and `/api/v0/add` on a loopback
/// port and records every request it served.
pub struct FakeDaemon {
    pub api: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl FakeDaemon {
    pub fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = seen.clone();
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                match stream {
                    Ok(stream) => {
                        let _ = respond(stream, &log);
                    }
                    Err(_) => break,
                }
            }
        });

        Self {
            api: format!("/ip4/127.0.0.1/tcp/{}", port),
            seen,
        }
    }

    pub fn requests(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    /// Requests whose target starts with `endpoint`.
    pub fn requests_to(&self, endpoint: &str) -> Vec<Seen> {
        self.requests()
            .into_iter()
            .filter(|seen| seen.target.starts_with(endpoint))
            .collect()
    }
}

fn read_body(reader: &mut impl BufRead, content_length: usize, chunked: bool) -> std::io::Result<Vec<u8>> {
    if !chunked {
        let mut body = vec![0; content_length];
        reader.read_exact(&mut body)?;
        return Ok(body);
    }

    let mut body = Vec::new();
    loop {
        let mut size = String::new();
        reader.read_line(&mut size)?;
        let size = usize::from_str_radix(size.trim().split(';').next().unwrap_or(""), 16)
            .unwrap_or(0);
        if size == 0 {
            reader.read_line(&mut String::new())?;
            return Ok(body);
        }
        let mut chunk = vec![0; size + 2];
        reader.read_exact(&mut chunk)?;
        body.extend_from_slice(&chunk[..size]);
    }
}

fn respond(mut stream: TcpStream, seen: &Mutex<Vec<Seen>>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut content_length = 0usize;
    let mut chunked = false;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("transfer-encoding") {
                chunked = value.trim().eq_ignore_ascii_case("chunked");
            }
        }
    }
    let body = read_body(&mut reader, content_length, chunked)?;

    let target = request_line.split_whitespace().nth(1).unwrap_or("").to_string();
    let identity = format!(
        r#"{{"ID":"{}","AgentVersion":"kubo/0.34.1/","ProtocolVersion":"ipfs/0.1.0","Addresses":["/ip4/127.0.0.1/tcp/4001"]}}"#,
        PEER_ID
    );
    let (status, payload) = if target.starts_with("/api/v0/id") {
        ("200 OK", identity)
    } else if target.starts_with("/api/v0/pin/add") {
        ("200 OK", format!(r#"{{"Pins":["{}"]}}"#, CID_V0))
    } else if target.starts_with("/api/v0/add") {
        (
            "200 OK",
            format!(
                "{{\"Name\":\"upload\",\"Bytes\":{}}}\n{{\"Name\":\"upload\",\"Hash\":\"{}\",\"Size\":\"{}\"}}\n",
                body.len(),
                CID_V0,
                body.len()
            ),
        )
    } else {
        ("404 Not Found", "404 page not found".to_string())
    };
    seen.lock().unwrap().push(Seen { target, body });

    write!(
        stream,
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        payload.len(),
        payload
    )?;
    stream.flush()
}

/// Run the bridge binary with the fake tool and the given daemon address.
pub fn bridge(ipfs: &FakeIpfs, api: &str, args: &[&str]) -> Output {
    bridge_with_stdin(ipfs, api, args, None)
}

pub fn bridge_with_stdin(ipfs: &FakeIpfs, api: &str, args: &[&str], stdin: Option<&[u8]>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scipfs-bridge"));
    cmd.arg("--ipfs-bin")
        .arg(&ipfs.bin)
        .arg("--api")
        .arg(api)
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .stdin(std::process::Stdio::piped());

    let mut child = cmd.spawn().unwrap();
    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            pipe.write_all(input).unwrap();
        }
    }
    child.wait_with_output().unwrap()
}

/// Parse the single envelope line from a stream.
pub fn envelope(stream: &[u8]) -> serde_json::Value {
    let text = String::from_utf8_lossy(stream);
    let line = text
        .lines()
        .rev()
        .find(|line| line.starts_with('{'))
        .unwrap_or_else(|| panic!("no envelope in output: {:?}", text));
    serde_json::from_str(line).unwrap()
}
