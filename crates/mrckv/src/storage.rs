//! Directory-backed store
//!
//! File layout:
//! - `<dir>/<key>.kv`: one framed record per key
//! - `<dir>/<key>.kv.tmp`: in-flight write, renamed over the record on success

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::parser::{encode_record, parse_record, validate_key, MAX_VALUE_SIZE};
use crate::store::KvStore;

/// Extension of record files
const RECORD_EXT: &str = "kv";

/// FileStore keeps each key in its own record file
pub struct FileStore {
    /// Path to the store directory
    path: PathBuf,

    /// Readers share, writers exclude
    lock: RwLock<()>,

    /// Is the store closed?
    closed: RwLock<bool>,
}

impl FileStore {
    /// Open or create a store at the given directory
    ///
    /// # Arguments
    /// * `path` - Directory holding the record files
    ///
    /// # Returns
    /// * `Result<FileStore>` - Store handle
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;

        Ok(FileStore {
            path: path.to_path_buf(),
            lock: RwLock::new(()),
            closed: RwLock::new(false),
        })
    }

    /// Get the store directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List stored keys in sorted order
    pub fn keys(&self) -> Result<Vec<String>> {
        self.ensure_open()?;
        let _guard = self.lock.read();

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();

        Ok(keys)
    }

    /// Close the store; later operations fail with [`Error::Closed`]
    pub fn close(&self) -> Result<()> {
        let mut closed = self.closed.write();
        if *closed {
            return Ok(());
        }

        // Wait for in-flight writes before refusing new ones
        let _guard = self.lock.write();
        *closed = true;

        Ok(())
    }

    /// Check if the store is closed
    pub fn is_closed(&self) -> bool {
        *self.closed.read()
    }

    fn ensure_open(&self) -> Result<()> {
        if *self.closed.read() {
            return Err(Error::Closed);
        }
        Ok(())
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.path.join(format!("{}.{}", key, RECORD_EXT))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.path.join(format!("{}.{}.tmp", key, RECORD_EXT))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.ensure_open()?;
        validate_key(key)?;

        let _guard = self.lock.read();
        let data = match fs::read(self.record_path(key)) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(parse_record(&data)?.to_vec()))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.ensure_open()?;
        validate_key(key)?;

        if value.len() > MAX_VALUE_SIZE {
            return Err(Error::ValueTooLarge(value.len()));
        }

        let _guard = self.lock.write();
        let temp_path = self.temp_path(key);

        let mut file: File = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(&encode_record(value))?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, self.record_path(key))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        self.ensure_open()?;
        validate_key(key)?;

        let _guard = self.lock.write();
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
