//! This module provides the `TableLoader` struct, responsible for loading
//! quadruple rule tables from files and strings.

use crate::parser::parse;
use crate::types::{MachineError, Quadruple};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `TableLoader` is a utility struct for loading quadruple rule tables.
/// It provides methods to load a table from an individual file, from string
/// content, and to discover and load all `.quad` files within a directory.
pub struct TableLoader;

impl TableLoader {
    /// Loads a rule table from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the `.quad` file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Quadruple>)` if the file is read and parsed successfully.
    /// * `Err(MachineError::FileError)` if the file cannot be read.
    /// * `Err(MachineError::ParseError)` if the content is not a valid table.
    pub fn load_table(path: &Path) -> Result<Vec<Quadruple>, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let quadruples = parse(&content)?;
        debug!(path = %path.display(), count = quadruples.len(), "table loaded");
        Ok(quadruples)
    }

    /// Loads a rule table from the provided string content.
    ///
    /// This is useful for tables that are not stored in files, e.g. piped
    /// through stdin.
    pub fn load_table_from_string(content: &str) -> Result<Vec<Quadruple>, MachineError> {
        parse(content)
    }

    /// Loads all rule-table files (`.quad` extension) from a given directory.
    ///
    /// It iterates through the directory, attempts to load each `.quad`
    /// file, and collects the results. Directories and non-`.quad` files are
    /// skipped.
    ///
    /// # Arguments
    ///
    /// * `directory` - A reference to the `Path` of the directory to scan.
    ///
    /// # Returns
    ///
    /// * `Vec<Result<(PathBuf, Vec<Quadruple>), MachineError>>` - one entry
    ///   per `.quad` file, holding either its path and parsed table or the
    ///   error that loading it produced.
    pub fn load_tables(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, Vec<Quadruple>), MachineError>> {
        if !directory.exists() {
            return vec![Err(MachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(MachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(MachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and non-.quad files
                if path.is_dir() || path.extension().is_none_or(|ext| ext != "quad") {
                    return None;
                }

                match Self::load_table(&path) {
                    Ok(quadruples) => Some(Ok((path, quadruples))),
                    Err(e) => Some(Err(MachineError::FileError(format!(
                        "Failed to load table from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}
