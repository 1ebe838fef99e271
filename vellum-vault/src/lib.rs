//! Vault path resolution & plain-text note mutation engine for vellum.

pub mod complete;
pub mod engine;
pub mod errors;
pub mod links;
pub mod locate;
pub mod models;
pub mod paths;
pub mod section;
pub mod storage;
pub mod tasks;

pub use vellum_core::config::{SlugStrategy, VaultSettings};

pub use complete::{CompletionBatch, CompletionItem};
pub use engine::{CaptureResult, VaultEngine};
pub use errors::{VaultError, VaultResult};
pub use links::LinkReference;
pub use models::{NoteHandle, VaultLocation};
pub use section::SectionInsertion;
pub use storage::{FsStore, MemoryStore, VaultStore};
pub use tasks::{OpenTask, TaskFile, TaskGroup, TaskOccurrence};
