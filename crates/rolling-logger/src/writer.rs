use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

/// Limits for the on-disk files and the in-memory tail.
#[derive(Debug, Clone)]
pub struct RollingConfig {
    /// A file is rotated before a write would push it past this size.
    pub max_file_bytes: u64,
    /// Number of files kept, the live one included.
    pub max_files: usize,
    /// Lines retained for `recent_lines`.
    pub ring_capacity: usize,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_files: 5,
            ring_capacity: 500,
        }
    }
}

struct RollingState {
    dir: PathBuf,
    app_name: String,
    config: RollingConfig,
    file: File,
    written: u64,
    recent: VecDeque<String>,
}

impl RollingState {
    fn path(&self, index: usize) -> PathBuf {
        file_path(&self.dir, &self.app_name, index)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let last = self.config.max_files.saturating_sub(1);
        if last == 0 {
            self.file = File::create(self.path(0))?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.path(last);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (0..last).rev() {
            let from = self.path(index);
            if from.exists() {
                fs::rename(&from, self.path(index + 1))?;
            }
        }

        self.file = open_append(&self.path(0))?;
        self.written = 0;
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        if self.config.ring_capacity == 0 {
            return;
        }
        for line in String::from_utf8_lossy(buf).lines() {
            if line.is_empty() {
                continue;
            }
            if self.recent.len() == self.config.ring_capacity {
                self.recent.pop_front();
            }
            self.recent.push_back(line.to_string());
        }
    }
}

/// Size-rotated log file shared between clones.
///
/// Files are named `<app>.log`, `<app>.1.log`, ... up to `max_files - 1`;
/// the oldest is dropped on each rotation.
#[derive(Clone)]
pub struct RollingWriter {
    state: Arc<Mutex<RollingState>>,
}

impl RollingWriter {
    pub fn open(dir: impl Into<PathBuf>, app_name: &str, config: RollingConfig) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let path = file_path(&dir, app_name, 0);
        let file = open_append(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            state: Arc::new(Mutex::new(RollingState {
                dir,
                app_name: app_name.to_string(),
                config,
                file,
                written,
                recent: VecDeque::new(),
            })),
        })
    }

    /// Path of the file currently being written.
    pub fn current_path(&self) -> PathBuf {
        self.lock().path(0)
    }

    /// Most recent lines, oldest first.
    pub fn recent_lines(&self) -> Vec<String> {
        self.lock().recent.iter().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, RollingState> {
        // A panic mid-write leaves the state usable; keep logging.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.lock();
        let incoming = buf.len() as u64;
        if state.written > 0 && state.written + incoming > state.config.max_file_bytes {
            state.rotate()?;
        }

        state.file.write_all(buf)?;
        state.written += incoming;
        state.remember(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn file_path(dir: &Path, app_name: &str, index: usize) -> PathBuf {
    if index == 0 {
        dir.join(format!("{}.log", app_name))
    } else {
        dir.join(format!("{}.{}.log", app_name, index))
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
