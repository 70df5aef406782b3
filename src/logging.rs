//! Debug logging behind an explicit handle.
//!
//! There is no global logger: whoever needs to log gets a `Logger` clone at
//! construction time. The default sink discards everything; `--log` swaps in
//! an append-only file under the first writable log directory.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const DEBUG_LOG_FILE_NAME: &str = "commit-pilot_debug.log";
pub const DEFAULT_LOG_DIRS: &[&str] = &["/tmp/", "/tmp/var/"];

#[derive(Clone)]
pub struct Logger {
    sink: Arc<Sink>,
}

enum Sink {
    Discard,
    File(Mutex<File>),
}

impl Logger {
    /// No-op sink. Logging calls are cheap and write nothing.
    pub fn discard() -> Self {
        Self { sink: Arc::new(Sink::Discard) }
    }

    /// Append to `commit-pilot_debug.log` under the first directory that
    /// accepts it.
    pub fn to_file(dirs: &[&str]) -> io::Result<Self> {
        let mut last_err: Option<io::Error> = None;
        for dir in dirs {
            let path = Path::new(dir).join(DEBUG_LOG_FILE_NAME);
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => return Ok(Self { sink: Arc::new(Sink::File(Mutex::new(file))) }),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no log directory available")))
    }

    pub fn debug(&self, msg: &str) {
        self.write("DEBUG", msg);
    }

    pub fn error(&self, msg: &str) {
        self.write("ERROR", msg);
    }

    fn write(&self, level: &str, msg: &str) {
        if let Sink::File(file) = &*self.sink
            && let Ok(mut file) = file.lock()
        {
            use io::Write;
            let ts = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f");
            let _ = writeln!(file, "{} {} {}", ts, level, msg);
        }
    }
}
