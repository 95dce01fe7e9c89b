use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ── LogFile ──────────────────────────────────────────────

/// Target of the debug file layer.
///
/// `log_file` lives in the settings file, and loading settings already logs,
/// so the layer exists from the start and records are dropped until
/// `attach` names a file. Without `log_file` it never attaches.
#[derive(Clone, Default)]
pub struct LogFile {
    slot: Arc<Mutex<Option<File>>>,
}

impl LogFile {
    fn slot(&self) -> MutexGuard<'_, Option<File>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append subsequent records to `path`, creating parent dirs.
    pub fn attach(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        *self.slot() = Some(file);
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.slot().is_some()
    }
}

/// Per-event writer handed out to the fmt layer.
pub struct LogFileWriter {
    file: LogFile,
}

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.file.slot().as_mut() {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.file.slot().as_mut() {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter { file: self.clone() }
    }
}

// ── subscriber ───────────────────────────────────────────

/// Install the global subscriber. Call once, at process start.
///
/// Terminal output goes to stderr since stdout carries the inventory JSON.
pub fn init(verbose: bool) -> LogFile {
    let terminal_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("vagrant_inventory=warn"))
    };

    let terminal_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(terminal_filter);

    let log_file = LogFile::default();
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(log_file.clone())
        .with_filter(EnvFilter::new("vagrant_inventory=debug"));

    tracing_subscriber::registry()
        .with(terminal_layer)
        .with(file_layer)
        .init();

    log_file
}
