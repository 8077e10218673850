//! Work directory registry
//!
//! A path-unique list of named entries. Nothing here touches the filesystem;
//! paths are compared as plain strings.

use crate::{ParleyError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Label used when a path has no usable final segment
pub const FALLBACK_DIRECTORY_NAME: &str = "New Directory";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkDirectory {
    pub id: Uuid,
    pub path: String,
    pub name: String,
    pub added_at: DateTime<Utc>,
}

/// Fields that may change after an entry is added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryUpdate {
    pub name: Option<String>,
    pub path: Option<String>,
}

impl DirectoryUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: None,
        }
    }

    pub fn path(path: impl Into<String>) -> Self {
        Self {
            name: None,
            path: Some(path.into()),
        }
    }
}

/// Display name derived from the last non-empty segment of `path`
pub fn default_name(path: &str) -> String {
    path.split(['/', '\\'])
        .rev()
        .find(|segment| !segment.is_empty())
        .unwrap_or(FALLBACK_DIRECTORY_NAME)
        .to_string()
}

#[derive(Debug, Clone, Default)]
pub struct DirectoryRegistry {
    directories: Vec<WorkDirectory>,
}

impl DirectoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from existing entries, dropping later duplicates of a path
    pub fn with_directories(entries: Vec<WorkDirectory>) -> Self {
        let mut registry = Self::new();
        for entry in entries {
            if registry.contains_path(&entry.path) {
                debug!(path = %entry.path, "Skipping duplicate seed directory");
                continue;
            }
            registry.directories.push(entry);
        }
        registry
    }

    pub fn directories(&self) -> &[WorkDirectory] {
        &self.directories
    }

    pub fn get(&self, id: Uuid) -> Option<&WorkDirectory> {
        self.directories.iter().find(|d| d.id == id)
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.directories.iter().any(|d| d.path == path)
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    /// Add a directory. An empty or missing `name` defaults to the last path segment.
    pub fn add_directory(&mut self, path: &str, name: Option<&str>) -> Result<&WorkDirectory> {
        if path.trim().is_empty() {
            return Err(ParleyError::EmptyPath);
        }
        if self.contains_path(path) {
            return Err(ParleyError::DuplicateDirectory(path.to_string()));
        }

        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default_name(path),
        };

        let entry = WorkDirectory {
            id: Uuid::new_v4(),
            path: path.to_string(),
            name,
            added_at: Utc::now(),
        };
        debug!(id = %entry.id, path = %entry.path, "Added work directory");
        self.directories.push(entry);

        Ok(&self.directories[self.directories.len() - 1])
    }

    /// Remove the entry with `id`; unknown ids are ignored
    pub fn remove_directory(&mut self, id: Uuid) -> Option<WorkDirectory> {
        let Some(pos) = self.directories.iter().position(|d| d.id == id) else {
            debug!(%id, "remove_directory ignored: unknown id");
            return None;
        };
        Some(self.directories.remove(pos))
    }

    /// Apply `update` to the entry with `id`.
    ///
    /// Returns `Ok(false)` when no entry matches. A new path must be non-empty
    /// and not already used by another entry.
    pub fn update_directory(&mut self, id: Uuid, update: DirectoryUpdate) -> Result<bool> {
        let Some(pos) = self.directories.iter().position(|d| d.id == id) else {
            debug!(%id, "update_directory ignored: unknown id");
            return Ok(false);
        };

        if let Some(path) = &update.path {
            if path.trim().is_empty() {
                return Err(ParleyError::EmptyPath);
            }
            if self.directories.iter().any(|d| d.id != id && d.path == *path) {
                return Err(ParleyError::DuplicateDirectory(path.clone()));
            }
        }

        let entry = &mut self.directories[pos];
        if let Some(path) = update.path {
            entry.path = path;
        }
        if let Some(name) = update.name {
            entry.name = name;
        }
        Ok(true)
    }
}
