//! Cross-process exclusive lock guarding the store.
//!
//! The monitor and any viewer/editor process share the same lock file next to
//! the database. `lock()` blocks without timeout; the returned guard releases
//! the lock when dropped, on every exit path.

use crate::errors::AppResult;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

pub struct FileMutex {
    path: PathBuf,
    #[cfg_attr(not(unix), allow(dead_code))]
    file: File,
}

pub struct FileMutexGuard<'a> {
    mutex: &'a FileMutex,
}

impl FileMutex {
    pub fn new(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        Ok(Self { path, file })
    }

    pub fn lock(&self) -> AppResult<FileMutexGuard<'_>> {
        self.acquire()?;
        Ok(FileMutexGuard { mutex: self })
    }

    #[cfg(unix)]
    fn acquire(&self) -> AppResult<()> {
        use std::os::unix::io::AsRawFd;

        loop {
            // SAFETY: the descriptor belongs to `self.file`, which stays open for the call.
            let rc = unsafe { libc::flock(self.file.as_raw_fd(), libc::LOCK_EX) };
            if rc == 0 {
                return Ok(());
            }
            let err = std::io::Error::last_os_error();
            if err.kind() != std::io::ErrorKind::Interrupted {
                return Err(err.into());
            }
        }
    }

    #[cfg(unix)]
    fn release(&self) {
        use std::os::unix::io::AsRawFd;

        // SAFETY: the descriptor belongs to `self.file`, which stays open for the call.
        let rc = unsafe { libc::flock(self.file.as_raw_fd(), libc::LOCK_UN) };
        if rc != 0 {
            tracing::warn!(
                error = %std::io::Error::last_os_error(),
                path = %self.path.display(),
                "Failed to release store lock"
            );
        }
    }

    // No flock: an exclusively created marker file plays the lock.
    #[cfg(not(unix))]
    fn marker(&self) -> PathBuf {
        self.path.with_extension("lock.held")
    }

    #[cfg(not(unix))]
    fn acquire(&self) -> AppResult<()> {
        loop {
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.marker())
            {
                Ok(_) => return Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    std::thread::sleep(std::time::Duration::from_millis(50));
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    #[cfg(not(unix))]
    fn release(&self) {
        if let Err(e) = std::fs::remove_file(self.marker()) {
            tracing::warn!(error = %e, path = %self.path.display(), "Failed to release store lock");
        }
    }
}

impl Drop for FileMutexGuard<'_> {
    fn drop(&mut self) {
        self.mutex.release();
    }
}
