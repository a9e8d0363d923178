use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum DoxygenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Doxygen executable not found: {0}")]
    NotFound(String),
    #[error("Doxygen exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("Doxygen timed out after {0:?}")]
    Timeout(Duration),
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("No C/C++ source files found in the given inputs")]
    NoSources,
    #[error("Doxygen produced no XML index at {}", .0.display())]
    MissingIndex(PathBuf),
}

pub type Result<T> = std::result::Result<T, DoxygenError>;

/// Doxygen 单次运行结果
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// stderr 中的警告行
    pub warnings: Vec<String>,
    pub stdout: String,
}

/// Doxygen 进程管理
pub struct DoxygenRunner {
    program: String,
    timeout: Duration,
}

impl DoxygenRunner {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            timeout: Duration::from_secs(300),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// 查询 doxygen 版本
    pub async fn version(&self) -> Result<String> {
        let output = self.spawn(&["--version"], None).await?;
        Ok(output.stdout.trim().to_string())
    }

    /// 在 workdir 中以给定 Doxyfile 运行 doxygen
    pub async fn run(&self, doxyfile: &Path, workdir: &Path) -> Result<RunOutput> {
        let doxyfile = doxyfile.to_string_lossy().to_string();
        tracing::info!("Running {} {} in {}", self.program, doxyfile, workdir.display());

        let output = self.spawn(&[doxyfile.as_str()], Some(workdir)).await?;
        for warning in &output.warnings {
            tracing::warn!("doxygen: {}", warning);
        }
        Ok(output)
    }

    async fn spawn(&self, args: &[&str], workdir: Option<&Path>) -> Result<RunOutput> {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = workdir {
            command.current_dir(dir);
        }

        let child = command.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DoxygenError::NotFound(self.program.clone()),
            _ => DoxygenError::Io(e),
        })?;

        // 超时后 future 被丢弃, kill_on_drop 负责结束子进程
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| DoxygenError::Timeout(self.timeout))??;

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if !output.status.success() {
            return Err(DoxygenError::Failed {
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(RunOutput {
            warnings: parse_warnings(&stderr),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        })
    }
}

impl Default for DoxygenRunner {
    fn default() -> Self {
        Self::new("doxygen")
    }
}

#[doc(hidden)]
pub fn parse_warnings(stderr: &str) -> Vec<String> {
    stderr
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
