#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tempfile::TempDir;

pub const USERS_JSON: &str = r#"[
    {"id": "u01", "name": "alice", "password": "secret1"},
    {"id": "u02", "name": "bob", "password": "secret2"}
]"#;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub prefix: String,
    pub data_dir: TempDir,
    child: Child,
}

impl TestServer {
    fn spawn(prefix: &str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let data_dir = TempDir::new().context("failed to create data dir")?;
        let users_file = data_dir.path().join("users.json");
        std::fs::write(&users_file, USERS_JSON).context("failed to write users file")?;
        let store_dir = data_dir.path().join("store");

        let child = Command::new(env!("CARGO_BIN_EXE_todo-api"))
            .arg("--address")
            .arg(format!("127.0.0.1:{}", port))
            .arg("--path-prefix")
            .arg(prefix)
            .arg("--storage-directory")
            .arg(&store_dir)
            .arg("--users")
            .arg(&users_file)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            prefix: prefix.to_string(),
            data_dir,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            // Every route answers (403 without credentials) once the listener is up
            if client.get(&self.base_url).send().await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    /// Absolute URL for a path below the route prefix
    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.prefix, path)
    }

    pub fn store_dir(&self) -> std::path::PathBuf {
        self.data_dir.path().join("store")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn start_server() -> Result<TestServer> {
    start_server_with_prefix("/v1").await
}

pub async fn start_server_with_prefix(prefix: &str) -> Result<TestServer> {
    let server = TestServer::spawn(prefix)?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
