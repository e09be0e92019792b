//! Environment variable management for testing
//!
//! Tests that touch process-wide environment variables record the original
//! values and restore them on drop so they don't leak into other tests.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII guard that sets or removes environment variables and restores the
/// original values when dropped
#[derive(Default)]
pub struct EnvVarGuard {
  /// Original values, in the order they were first touched
  saved: Vec<(String, Option<String>)>,
}

impl EnvVarGuard {
  /// Create a guard that has not touched any variables yet
  pub fn new() -> Self {
    Self::default()
  }

  /// Set `name` to `value` for the lifetime of the guard
  pub fn set(&mut self, name: &str, value: &str) {
    self.remember(name);
    unsafe {
      env::set_var(name, value);
    }
  }

  /// Remove `name` for the lifetime of the guard
  pub fn remove(&mut self, name: &str) {
    self.remember(name);
    unsafe {
      env::remove_var(name);
    }
  }

  fn remember(&mut self, name: &str) {
    if !self.saved.iter().any(|(saved, _)| saved == name) {
      self.saved.push((name.to_string(), env::var(name).ok()));
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    // Restore in reverse order of first touch
    for (name, original) in self.saved.iter().rev() {
      match original {
        Some(val) => unsafe {
          env::set_var(name, val);
        },
        None => unsafe {
          env::remove_var(name);
        },
      }
    }
  }
}

/// RAII guard for a temporary `.env` file
///
/// The file lives in its own temporary directory, which is deleted when the
/// guard is dropped.
pub struct EnvFileGuard {
  temp_dir: TempDir,
  path: PathBuf,
}

impl EnvFileGuard {
  /// Create a `.env` file with the given content
  pub fn new(content: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join(".env");
    fs::write(&path, content).expect("Failed to write test .env file");

    Self { temp_dir, path }
  }

  /// Get the path to the `.env` file
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Get the directory containing the `.env` file
  pub fn dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
