//! Shared configuration types for vellum.

pub mod config;

pub use config::{SettingsError, SlugStrategy, VaultSettings};
