pub mod vagrant;

use crate::config::Settings;
use crate::error::InventoryError;

/// Source of raw machine state. `VagrantCli` shells out; tests use a fake.
#[allow(async_fn_in_trait)] // trait is internal-only
pub trait Provider {
    /// Output of `status --machine-readable`.
    async fn status(&self) -> Result<String, InventoryError>;
    /// Output of `ssh-config <host>`.
    async fn ssh_config(&self, host: &str) -> Result<String, InventoryError>;
}

pub fn create_provider(settings: &Settings) -> vagrant::VagrantCli {
    vagrant::VagrantCli::new(settings)
}
