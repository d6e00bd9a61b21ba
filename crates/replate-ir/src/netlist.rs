//! Structural netlist representation
//!
//! A design is a table of modules keyed by module name; each module owns
//! a table of cells keyed by instance name. A cell refers to the module
//! it instantiates by name only, resolved against the design's module
//! table at use time. There are no ownership pointers between a cell and
//! the module it instantiates.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A structural hardware design: modules keyed by name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Netlist {
    /// Design name
    pub name: String,
    /// All modules, keyed by module name
    pub modules: IndexMap<String, Module>,
}

/// A named, reusable unit of structure owning its instances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Module name; must match its key in the design's module table
    pub name: String,
    /// Cells owned by this module, keyed by instance name
    pub cells: IndexMap<String, Cell>,
}

/// A named instance of a module or primitive within another module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Instance name; must match its key in the owning module's cell table
    pub name: String,
    /// Name of the instantiated module or primitive, resolved at use time
    pub module: String,
}

/// Structural violation of the netlist's table invariants.
///
/// Name tables are keyed by entity name, so a key that disagrees with the
/// entity's own name field means lookups no longer describe the design.
/// Dangling cell-to-module references are deliberately not checked here;
/// the engine trusts the builder for referential integrity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedDesignError {
    #[error("module table key '{key}' does not match module name '{name}'")]
    ModuleKeyMismatch { key: String, name: String },
    #[error("cell table key '{key}' in module '{module}' does not match cell name '{name}'")]
    CellKeyMismatch {
        module: String,
        key: String,
        name: String,
    },
}

impl Netlist {
    /// Create an empty design with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modules: IndexMap::new(),
        }
    }

    /// Add a module, keyed by its own name
    pub fn add_module(&mut self, module: Module) {
        self.modules.insert(module.name.clone(), module);
    }

    /// Resolve the module a cell instantiates, if it exists in this design
    pub fn module_of(&self, cell: &Cell) -> Option<&Module> {
        self.modules.get(&cell.module)
    }

    /// Check the table invariants every pass relies on
    pub fn validate(&self) -> Result<(), MalformedDesignError> {
        for (key, module) in &self.modules {
            if *key != module.name {
                return Err(MalformedDesignError::ModuleKeyMismatch {
                    key: key.clone(),
                    name: module.name.clone(),
                });
            }
            for (cell_key, cell) in &module.cells {
                if *cell_key != cell.name {
                    return Err(MalformedDesignError::CellKeyMismatch {
                        module: module.name.clone(),
                        key: cell_key.clone(),
                        name: cell.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Module {
    /// Create an empty module with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: IndexMap::new(),
        }
    }

    /// Add a cell, keyed by its own instance name
    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.insert(cell.name.clone(), cell);
    }
}

impl Cell {
    /// Create a cell instantiating `module` under the instance name `name`
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
        }
    }
}
