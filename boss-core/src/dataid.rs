use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{BossError, Result};

/// File name of the durable counter, kept next to the plaintext sources.
pub const ID_STORE_FILE: &str = ".id";

/// Issues globally unique, strictly increasing data ids.
///
/// The store holds the next id to hand out, as decimal text. `next` persists
/// the incremented counter (with fsync) before the id is returned, so a crash
/// after return can never reissue it on the following run.
#[derive(Debug)]
pub struct DataIdAllocator {
    path: PathBuf,
    next: u64,
}

impl DataIdAllocator {
    /// Read the persisted counter. An absent or garbled store is refused:
    /// restarting from an assumed default would renumber ids already
    /// published in task sheets.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| BossError::StorageUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let next = text
            .trim()
            .parse::<u64>()
            .map_err(|e| BossError::StorageUnavailable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            next,
        })
    }

    /// Seed a fresh store. Refuses to clobber an existing one so `load` can
    /// stay strict.
    pub fn init(path: &Path, start: u64) -> Result<()> {
        if path.exists() {
            return Err(BossError::Format(format!(
                "id store already present at {}",
                path.display()
            )));
        }
        write_counter(path, start)
    }

    /// Allocate one id. The successor value is durable before this returns.
    pub fn next(&mut self) -> Result<u64> {
        let id = self.next;
        write_counter(&self.path, id + 1)?;
        self.next = id + 1;
        Ok(id)
    }

    /// Next id that would be allocated.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

fn write_counter(path: &Path, value: u64) -> Result<()> {
    let mut f = File::create(path)?;
    f.write_all(value.to_string().as_bytes())?;
    f.sync_all()?;
    Ok(())
}
