use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[cfg(unix)]
use std::ffi::CString;
#[cfg(unix)]
use std::os::unix::{ffi::OsStrExt, fs::FileTypeExt};

use crate::cliopt::CliOpt;
use crate::error::{Error, Result};

/// Settings resolved once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub fifo: PathBuf,
    pub prefix: String,
    pub ticks_per_chunk: NonZeroUsize,
    pub poll_interval: Duration,
    pub endpoint: String,
    pub port: u16,
    pub source: String,
}

impl Config {
    /// Resolves defaults without touching the filesystem.
    pub fn from_opt(opt: CliOpt) -> Result<Self> {
        let ticks_per_chunk = NonZeroUsize::new(opt.ticks_per_chunk)
            .ok_or_else(|| Error::startup("ticks per chunk must be greater than 0"))?;

        let prefix = match opt.prefix {
            Some(prefix) => prefix,
            None => opt
                .fifo
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    Error::startup(&format!(
                        "cannot derive metric prefix from '{}'",
                        opt.fifo.display()
                    ))
                })?,
        };
        validate_token("metric prefix", &prefix)?;

        let source = match opt.source {
            Some(source) => source,
            None => local_hostname(),
        };
        validate_token("source tag", &source)?;

        Ok(Self {
            fifo: opt.fifo,
            prefix,
            ticks_per_chunk,
            poll_interval: opt.poll_interval,
            endpoint: opt.endpoint,
            port: opt.port,
            source,
        })
    }

    /// The pipe must exist, be readable and actually be a FIFO.
    pub fn check_fifo(&self) -> Result<()> {
        check_fifo(&self.fifo)
    }
}

fn validate_token(what: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(Error::startup(&format!(
            "{} '{}' must be non-empty and contain no whitespace",
            what, value
        )));
    }
    Ok(())
}

#[cfg(unix)]
pub fn check_fifo(path: &Path) -> Result<()> {
    let cant_read = || Error::startup(&format!("can't read FIFO '{}'", path.display()));

    let meta = fs::metadata(path).map_err(|_| cant_read())?;
    if !meta.file_type().is_fifo() {
        return Err(cant_read());
    }
    if !readable(path) {
        return Err(cant_read());
    }
    Ok(())
}

/// Whether the effective user may open `path` for reading.
#[cfg(unix)]
fn readable(path: &Path) -> bool {
    let path = match CString::new(path.as_os_str().as_bytes()) {
        Ok(path) => path,
        Err(_) => return false,
    };

    // SAFETY: `path` is a valid NUL-terminated string that outlives the call.
    unsafe { libc::faccessat(libc::AT_FDCWD, path.as_ptr(), libc::R_OK, libc::AT_EACCESS) == 0 }
}

#[cfg(not(unix))]
pub fn check_fifo(path: &Path) -> Result<()> {
    Err(Error::startup(&format!(
        "can't read FIFO '{}': named pipes are only supported on unix",
        path.display()
    )))
}

/// Best effort; hostname resolution proper is the OS's business.
fn local_hostname() -> String {
    if let Ok(name) = std::env::var("HOSTNAME") {
        let name = name.trim().to_owned();
        if !name.is_empty() {
            return name;
        }
    }

    for path in &["/proc/sys/kernel/hostname", "/etc/hostname"] {
        if let Ok(name) = fs::read_to_string(path) {
            let name = name.trim().to_owned();
            if !name.is_empty() {
                return name;
            }
        }
    }

    "localhost".to_owned()
}
