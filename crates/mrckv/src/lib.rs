//! # mrckv
//!
//! Durable namespaced key-value storage for the MRC assistant.
//!
//! ## Design
//! - One record file per key, framed with a magic header and length prefix
//! - Atomic replace on write (temp file + fsync + rename)
//! - Concurrent readers, exclusive writers
//! - 5 MiB max value, 128-byte max key

#![warn(missing_docs)]

mod error;
mod memory;
mod parser;
mod storage;
mod store;

pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use parser::{validate_key, MAX_KEY_LEN, MAX_VALUE_SIZE};
pub use storage::FileStore;
pub use store::KvStore;
