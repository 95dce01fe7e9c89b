use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum InventoryError {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config from {path}: {message}")]
    ConfigParse { path: String, message: String },

    #[error("I/O error while {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} failed: {message}")]
    #[diagnostic(help("is vagrant installed and run from the directory holding the Vagrantfile?"))]
    ExternalCommand { command: String, message: String },

    #[error("unparsable status line '{line}': {message}")]
    StatusParse { line: String, message: String },

    #[error("malformed ssh-config at line {line_no}: {message}")]
    SshConfigParse { line_no: usize, message: String },

    #[error("ssh-config for '{host}' has no {field}")]
    MissingField { host: String, field: String },

    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("failed to serialize output: {message}")]
    Serialize { message: String },
}
