use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "vagrant-inventory",
    about = "Ansible dynamic inventory for running Vagrant machines"
)]
#[command(group(ArgGroup::new("mode").required(true).args(["list", "host"])))]
pub struct Cli {
    /// List every running machine as a grouped inventory
    #[arg(long)]
    pub list: bool,

    /// Show connection variables for a single machine
    #[arg(long, value_name = "NAME")]
    pub host: Option<String>,

    /// Path to settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Which document to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    List,
    Host(String),
}

impl Cli {
    pub fn mode(&self) -> Mode {
        match &self.host {
            Some(name) => Mode::Host(name.clone()),
            None => Mode::List,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_flag_selects_list_mode() {
        let cli = Cli::try_parse_from(["vagrant-inventory", "--list"]).unwrap();
        assert_eq!(cli.mode(), Mode::List);
    }

    #[test]
    fn host_flag_selects_host_mode() {
        let cli = Cli::try_parse_from(["vagrant-inventory", "--host", "minikube"]).unwrap();
        assert_eq!(cli.mode(), Mode::Host("minikube".into()));
    }

    #[test]
    fn list_and_host_conflict() {
        let err =
            Cli::try_parse_from(["vagrant-inventory", "--list", "--host", "minikube"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn one_mode_is_required() {
        let err = Cli::try_parse_from(["vagrant-inventory"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
