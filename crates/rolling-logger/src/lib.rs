//! Rolling Logger
//!
//! File logger for the desktop backend. Output goes to `<dir>/<app>.log`;
//! when the file would grow past `max_bytes` it is shifted to `<app>.log.1`,
//! older files move up by one and anything past `max_files` is dropped, so
//! disk usage is bounded like a circular buffer.
//!
//! `log` records are bridged into `tracing`, so both macro families end up in
//! the same file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[derive(Debug, Clone, Copy)]
pub struct RollingConfig {
    /// Size at which the active file is rotated
    pub max_bytes: u64,
    /// Rotated files kept besides the active one
    pub max_files: usize,
    pub level: tracing::Level,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            max_bytes: 2 * 1024 * 1024,
            max_files: 3,
            level: tracing::Level::INFO,
        }
    }
}

/// Size-capped log file with numbered backups
pub struct RollingFile {
    path: PathBuf,
    file: File,
    written: u64,
    max_bytes: u64,
    max_files: usize,
}

impl RollingFile {
    pub fn open(dir: &Path, app_name: &str, config: &RollingConfig) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.log", app_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            file,
            written,
            max_bytes: config.max_bytes.max(1),
            max_files: config.max_files,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.max_files == 0 {
            self.file = OpenOptions::new().create(true).write(true).truncate(true).open(&self.path)?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.backup_path(self.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.max_files).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))?;

        self.file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Local wall-clock timestamps
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Install the global subscriber with default limits
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    init_logger_with(log_dir, app_name, RollingConfig::default())
}

#[cfg(not(target_os = "android"))]
pub fn init_logger_with(log_dir: PathBuf, app_name: &str, config: RollingConfig) -> Result<(), String> {
    let file = RollingFile::open(&log_dir, app_name, &config)
        .map_err(|e| format!("Failed to open log file in {}: {}", log_dir.display(), e))?;
    let path = file.path().to_path_buf();

    tracing_subscriber::fmt()
        .with_writer(io::stderr.and(Mutex::new(file)))
        .with_timer(LocalTime)
        .with_ansi(false)
        .with_target(true)
        .with_max_level(config.level)
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    tracing::info!(path = %path.display(), "logging to file");
    Ok(())
}

#[cfg(target_os = "android")]
pub fn init_logger_with(_log_dir: PathBuf, app_name: &str, config: RollingConfig) -> Result<(), String> {
    let level = match config.level {
        tracing::Level::ERROR => log::LevelFilter::Error,
        tracing::Level::WARN => log::LevelFilter::Warn,
        tracing::Level::INFO => log::LevelFilter::Info,
        tracing::Level::DEBUG => log::LevelFilter::Debug,
        tracing::Level::TRACE => log::LevelFilter::Trace,
    };
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(level)
            .with_tag(app_name),
    );
    Ok(())
}

/// Plain-message helpers for callers that only have a string
pub fn info(msg: &str) -> Result<(), String> {
    log::info!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    log::error!("{}", msg);
    Ok(())
}
