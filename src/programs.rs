//! This module manages the collection of built-in example rule tables that
//! ship with the crate, embedded at compile time.

use crate::types::{MachineError, Quadruple};

use std::sync::RwLock;

// Default embedded tables
const TABLE_TEXTS: [(&str, &str); 3] = [
    ("successor", include_str!("../programs/successor.quad")),
    ("predecessor", include_str!("../programs/predecessor.quad")),
    ("eraser", include_str!("../programs/eraser.quad")),
];

lazy_static::lazy_static! {
    pub static ref TABLES: RwLock<Vec<(String, Vec<Quadruple>)>> = RwLock::new(Vec::new());
}

/// Accessor for the built-in rule tables, parsed once on first use.
pub struct TableRegistry;

impl TableRegistry {
    /// Parses the embedded tables into the registry.
    pub fn load() -> Result<(), MachineError> {
        let mut tables = Vec::new();

        for (name, text) in TABLE_TEXTS {
            if let Ok(quadruples) = crate::parser::parse(text) {
                tables.push((name.to_string(), quadruples));
            } else {
                eprintln!("Failed to parse built-in table {}", name);
            }
        }

        if let Ok(mut write_guard) = TABLES.write() {
            *write_guard = tables;
        } else {
            return Err(MachineError::FileError(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the number of built-in tables.
    pub fn count() -> usize {
        // Initialize with default tables if not already initialized
        let _ = Self::load();

        TABLES.read().map(|tables| tables.len()).unwrap_or(0)
    }

    /// Returns a built-in table by its index.
    pub fn get_by_index(index: usize) -> Result<Vec<Quadruple>, MachineError> {
        // Initialize with default tables if not already initialized
        let _ = Self::load();

        TABLES
            .read()
            .map_err(|_| MachineError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .map(|(_, quadruples)| quadruples.clone())
            .ok_or_else(|| {
                MachineError::InvalidInput(format!("Table index {} out of range", index))
            })
    }

    /// Returns a built-in table by its name.
    pub fn get(name: &str) -> Result<Vec<Quadruple>, MachineError> {
        // Initialize with default tables if not already initialized
        let _ = Self::load();

        TABLES
            .read()
            .map_err(|_| MachineError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|(table_name, _)| table_name == name)
            .map(|(_, quadruples)| quadruples.clone())
            .ok_or_else(|| MachineError::InvalidInput(format!("Table '{}' not found", name)))
    }

    /// Lists the names of all built-in tables.
    pub fn names() -> Vec<String> {
        // Initialize with default tables if not already initialized
        let _ = Self::load();

        TABLES
            .read()
            .map(|tables| tables.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_else(|_| Vec::new())
    }
}
