//! External commands run in the generated package

use crate::logger::Logger;
use crate::options::PackageManager;
use anyhow::Result;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::time::timeout;

/// Timeout for installing dependencies (10 minutes)
const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Timeout for `git init`
const GIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Install the package's dependencies with `<package manager> install`
pub async fn install_dependencies(
    dir: &Path,
    package_manager: PackageManager,
    logger: &dyn Logger,
) -> Result<()> {
    logger.process("Installing dependencies... It takes a while.");
    run_command(
        package_manager.command(),
        &["install"],
        dir,
        INSTALL_TIMEOUT,
        logger,
    )
    .await
}

/// Create an empty git repository in the package directory
pub async fn init_git_repository(dir: &Path, logger: &dyn Logger) -> Result<()> {
    logger.process("Initializing Git repository...");
    run_command("git", &["init"], dir, GIT_TIMEOUT, logger).await
}

/// Run `program` in `dir`, forwarding its output as verbose messages
pub(crate) async fn run_command(
    program: &str,
    args: &[&str],
    dir: &Path,
    limit: Duration,
    logger: &dyn Logger,
) -> Result<()> {
    let command_line = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");

    let mut child = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| anyhow::anyhow!("Failed to run '{}': {}", command_line, e))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow::anyhow!("Failed to capture stdout of '{}'", command_line))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow::anyhow!("Failed to capture stderr of '{}'", command_line))?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    let output_task = async {
        let mut stdout_open = true;
        let mut stderr_open = true;
        while stdout_open || stderr_open {
            tokio::select! {
                line = stdout_reader.next_line(), if stdout_open => match line {
                    Ok(Some(line)) => logger.verbose_info(&line),
                    _ => stdout_open = false,
                },
                line = stderr_reader.next_line(), if stderr_open => match line {
                    Ok(Some(line)) => logger.verbose_info(&line),
                    _ => stderr_open = false,
                },
            }
        }
        child.wait().await
    };

    match timeout(limit, output_task).await {
        Ok(Ok(status)) if status.success() => Ok(()),
        Ok(Ok(status)) => anyhow::bail!(
            "'{}' failed with exit code: {}",
            command_line,
            status.code().unwrap_or(-1)
        ),
        Ok(Err(e)) => anyhow::bail!("Failed to wait for '{}': {}", command_line, e),
        Err(_) => anyhow::bail!(
            "'{}' timed out after {} seconds",
            command_line,
            limit.as_secs()
        ),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::testing::RecordingLogger;

    #[tokio::test]
    async fn test_forwards_output() {
        let dir = tempfile::tempdir().unwrap();
        let logger = RecordingLogger::default();

        run_command(
            "sh",
            &["-c", "echo hello; echo oops >&2"],
            dir.path(),
            Duration::from_secs(10),
            &logger,
        )
        .await
        .unwrap();

        let mut lines = logger.verbose_messages();
        lines.sort();
        assert_eq!(lines, vec!["hello".to_string(), "oops".to_string()]);
    }

    #[tokio::test]
    async fn test_runs_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logger = RecordingLogger::default();

        run_command("sh", &["-c", "touch marker"], dir.path(), Duration::from_secs(10), &logger)
            .await
            .unwrap();

        assert!(dir.path().join("marker").exists());
    }

    #[tokio::test]
    async fn test_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let logger = RecordingLogger::default();

        let err = run_command("sh", &["-c", "exit 3"], dir.path(), Duration::from_secs(10), &logger)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("exit code: 3"));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let logger = RecordingLogger::default();

        let err = run_command(
            "definitely-not-a-real-program",
            &[],
            dir.path(),
            Duration::from_secs(10),
            &logger,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Failed to run"));
    }

    #[tokio::test]
    async fn test_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let logger = RecordingLogger::default();

        let err = run_command("sh", &["-c", "sleep 5"], dir.path(), Duration::from_millis(100), &logger)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("timed out"));
    }
}
