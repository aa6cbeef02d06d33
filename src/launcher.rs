//! Development process launcher
//!
//! Starts the API server and the frontend dev server as child processes,
//! forwards their output with a name prefix, and stops when either exits or
//! on Ctrl-C.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Launcher errors
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Failed to start {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{name} exited during startup ({status})")]
    EarlyExit { name: String, status: ExitStatus },

    #[error("Missing {0}")]
    MissingFile(PathBuf),

    #[error("Empty command for {0}")]
    EmptyCommand(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A child process to supervise
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSpec {
    /// Prefix for forwarded output lines
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl ProcessSpec {
    pub fn new(name: &str, program: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            working_dir: None,
        }
    }

    /// Parse a whitespace-separated command line
    pub fn from_command_line(name: &str, command: &str) -> Result<Self, LaunchError> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| LaunchError::EmptyCommand(name.to_string()))?;
        Ok(Self {
            name: name.to_string(),
            program: program.to_string(),
            args: parts.map(String::from).collect(),
            working_dir: None,
        })
    }

    pub fn in_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

/// Launcher configuration
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub backend: ProcessSpec,
    pub frontend: ProcessSpec,
    /// The backend must stay up this long before the frontend starts
    pub startup_grace: Duration,
    /// Interval between liveness checks
    pub poll_interval: Duration,
    /// File that must exist in the frontend directory
    pub frontend_manifest: Option<PathBuf>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            backend: ProcessSpec::new("BACKEND", "fitcoach-api", &[]),
            frontend: ProcessSpec::new("FRONTEND", "npm", &["run", "dev"]),
            startup_grace: Duration::from_secs(2),
            poll_interval: Duration::from_secs(1),
            frontend_manifest: Some(PathBuf::from("package.json")),
        }
    }
}

/// Why supervision ended
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchOutcome {
    /// A child process exited on its own
    Exited { name: String, status: ExitStatus },
    /// Ctrl-C was received
    Interrupted,
}

/// A running child and its output forwarders
pub struct Supervised {
    pub name: String,
    child: Child,
    forwarders: Vec<JoinHandle<()>>,
}

impl Supervised {
    /// Spawn a process and start forwarding its stdout and stderr
    pub fn spawn(spec: &ProcessSpec) -> Result<Self, LaunchError> {
        let mut child = spec.command().spawn().map_err(|source| LaunchError::Spawn {
            name: spec.name.clone(),
            source,
        })?;
        info!("Started {} (pid {:?})", spec.name, child.id());

        let mut forwarders = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            forwarders.push(forward_lines(spec.name.clone(), stdout));
        }
        if let Some(stderr) = child.stderr.take() {
            forwarders.push(forward_lines(spec.name.clone(), stderr));
        }

        Ok(Self {
            name: spec.name.clone(),
            child,
            forwarders,
        })
    }

    /// Exit status if the process has finished
    pub fn try_status(&mut self) -> Result<Option<ExitStatus>, LaunchError> {
        Ok(self.child.try_wait()?)
    }

    /// Kill the process if it is still running and stop forwarding
    pub async fn shutdown(mut self) {
        match self.child.try_wait() {
            Ok(Some(_)) => {}
            _ => {
                if let Err(e) = self.child.kill().await {
                    warn!("Failed to stop {}: {}", self.name, e);
                }
            }
        }
        for handle in self.forwarders {
            handle.abort();
        }
        debug!("{} stopped", self.name);
    }
}

/// Copy lines from a child stream to stdout until the stream closes
fn forward_lines<R>(name: String, stream: R) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        pump_lines(stream, |line| println!("{}", prefix_line(&name, &line))).await;
    })
}

/// Read newline-terminated lines until EOF or a read error
///
/// Invalid UTF-8 is replaced rather than ending the stream, so the pipe keeps
/// draining. Returns the number of lines delivered.
pub async fn pump_lines<R, F>(stream: R, mut on_line: F) -> usize
where
    R: AsyncRead + Unpin,
    F: FnMut(String),
{
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                on_line(line.trim_end_matches(['\n', '\r']).to_string());
                count += 1;
            }
            Err(e) => {
                debug!("Stopped reading child output: {}", e);
                break;
            }
        }
    }
    count
}

pub fn prefix_line(name: &str, line: &str) -> String {
    format!("[{}] {}", name, line.trim_end())
}

/// Process supervisor for the backend and frontend
pub struct Launcher {
    config: LaunchConfig,
}

impl Launcher {
    pub fn new(config: LaunchConfig) -> Self {
        Self { config }
    }

    /// Start the backend, confirm it survives startup, then start the frontend
    pub async fn start(&self) -> Result<(Supervised, Supervised), LaunchError> {
        let mut backend = Supervised::spawn(&self.config.backend)?;

        tokio::time::sleep(self.config.startup_grace).await;
        if let Some(status) = backend.try_status()? {
            backend.shutdown().await;
            return Err(LaunchError::EarlyExit {
                name: self.config.backend.name.clone(),
                status,
            });
        }

        let frontend = match self.check_frontend_manifest() {
            Ok(()) => Supervised::spawn(&self.config.frontend),
            Err(e) => Err(e),
        };
        match frontend {
            Ok(frontend) => Ok((backend, frontend)),
            Err(e) => {
                warn!("Frontend failed to start, stopping backend");
                backend.shutdown().await;
                Err(e)
            }
        }
    }

    fn check_frontend_manifest(&self) -> Result<(), LaunchError> {
        let Some(manifest) = &self.config.frontend_manifest else {
            return Ok(());
        };
        let path = match &self.config.frontend.working_dir {
            Some(dir) => dir.join(manifest),
            None => manifest.clone(),
        };
        if path.exists() {
            Ok(())
        } else {
            Err(LaunchError::MissingFile(path))
        }
    }

    /// Poll both children until one exits or Ctrl-C arrives, then stop both
    pub async fn supervise(
        &self,
        mut backend: Supervised,
        mut frontend: Supervised,
    ) -> Result<LaunchOutcome, LaunchError> {
        let mut interval = tokio::time::interval(self.config.poll_interval);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let outcome = loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    info!("Interrupt received, shutting down");
                    break LaunchOutcome::Interrupted;
                }
                _ = interval.tick() => {
                    if let Some(status) = backend.try_status()? {
                        break LaunchOutcome::Exited { name: backend.name.clone(), status };
                    }
                    if let Some(status) = frontend.try_status()? {
                        break LaunchOutcome::Exited { name: frontend.name.clone(), status };
                    }
                }
            }
        };

        backend.shutdown().await;
        frontend.shutdown().await;
        Ok(outcome)
    }

    /// Start both processes and supervise them
    pub async fn run(&self) -> Result<LaunchOutcome, LaunchError> {
        let (backend, frontend) = self.start().await?;
        self.supervise(backend, frontend).await
    }
}
