use std::path::PathBuf;

use crate::config::Settings;
use crate::error::InventoryError;
use crate::provider::Provider;

/// Runs the `vagrant` CLI, one blocking call at a time.
#[derive(Debug, Clone)]
pub struct VagrantCli {
    bin: String,
    working_dir: Option<PathBuf>,
}

impl VagrantCli {
    pub fn new(settings: &Settings) -> Self {
        Self {
            bin: settings.vagrant_bin.clone(),
            working_dir: settings.working_dir().map(|p| p.to_path_buf()),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String, InventoryError> {
        let command_line = format!("{} {}", self.bin, args.join(" "));
        tracing::debug!(command = %command_line, "running");

        let mut cmd = tokio::process::Command::new(&self.bin);
        cmd.args(args);
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|e| InventoryError::Io {
            context: format!("running {command_line}"),
            source: e,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(InventoryError::ExternalCommand {
                command: command_line,
                message,
            });
        }

        String::from_utf8(output.stdout).map_err(|e| InventoryError::ExternalCommand {
            command: command_line,
            message: format!("output is not UTF-8: {e}"),
        })
    }
}

impl Provider for VagrantCli {
    async fn status(&self) -> Result<String, InventoryError> {
        self.run(&["status", "--machine-readable"]).await
    }

    async fn ssh_config(&self, host: &str) -> Result<String, InventoryError> {
        self.run(&["ssh-config", host]).await
    }
}
