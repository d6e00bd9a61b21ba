//! In-place renaming over the structural netlist
//!
//! Modules and cells are renamed independently against the same rule set.
//! Because both tables are keyed by entity name, a rename removes the
//! entry, mutates the name field, and reinserts under the new key; a bare
//! field mutation would leave the table inconsistent with the entities it
//! holds.

use thiserror::Error;
use tracing::{debug, warn};

use crate::netlist::{MalformedDesignError, Module, Netlist};
use crate::rules::RuleSet;

/// A rename skipped because the resolved name already keys the
/// destination table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Collision {
    #[error("cannot rename module '{old}' to '{new}': name already in use")]
    Module { old: String, new: String },
    #[error("cannot rename cell '{old}' to '{new}' in module '{module}': name already in use")]
    Cell {
        module: String,
        old: String,
        new: String,
    },
}

/// Outcome of one rename pass
#[derive(Debug, Clone, Default)]
pub struct RenameReport {
    /// Whether any name changed
    pub changed: bool,
    /// Number of entities renamed
    pub renamed: usize,
    /// Renames skipped because the target name was taken
    pub collisions: Vec<Collision>,
}

impl RenameReport {
    /// Record one applied rename
    pub(crate) fn record_rename(&mut self) {
        self.renamed += 1;
        self.changed = true;
    }
}

/// Renames every module and cell in a netlist, in place
pub struct NetlistRenamer<'a> {
    rules: &'a RuleSet,
}

impl<'a> NetlistRenamer<'a> {
    /// Create a renamer for the given rule set
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Apply the rule set to every module and cell name in `netlist`.
    ///
    /// Colliding renames are skipped and reported; a malformed design is
    /// fatal, with no guarantee about how much was already mutated.
    pub fn rename(&self, netlist: &mut Netlist) -> Result<RenameReport, MalformedDesignError> {
        netlist.validate()?;

        let mut report = RenameReport::default();
        self.rename_modules(netlist, &mut report);
        for module in netlist.modules.values_mut() {
            self.rename_cells(module, &mut report);
        }
        Ok(report)
    }

    fn rename_modules(&self, netlist: &mut Netlist, report: &mut RenameReport) {
        let keys: Vec<String> = netlist.modules.keys().cloned().collect();
        for key in keys {
            let Some(new_name) = self.rules.resolve(&key) else {
                continue;
            };
            if new_name == key {
                continue;
            }
            if netlist.modules.contains_key(&new_name) {
                warn!("module '{}' not renamed to '{}': name already in use", key, new_name);
                report.collisions.push(Collision::Module {
                    old: key,
                    new: new_name,
                });
                continue;
            }
            if let Some(mut module) = netlist.modules.shift_remove(&key) {
                debug!("renaming module '{}' to '{}'", key, new_name);
                module.name = new_name.clone();
                netlist.modules.insert(new_name, module);
                report.record_rename();
            }
        }
    }

    fn rename_cells(&self, module: &mut Module, report: &mut RenameReport) {
        let keys: Vec<String> = module.cells.keys().cloned().collect();
        for key in keys {
            let Some(new_name) = self.rules.resolve(&key) else {
                continue;
            };
            if new_name == key {
                continue;
            }
            if module.cells.contains_key(&new_name) {
                warn!(
                    "cell '{}' in module '{}' not renamed to '{}': name already in use",
                    key, module.name, new_name
                );
                report.collisions.push(Collision::Cell {
                    module: module.name.clone(),
                    old: key,
                    new: new_name,
                });
                continue;
            }
            if let Some(mut cell) = module.cells.shift_remove(&key) {
                debug!(
                    "renaming cell '{}' to '{}' in module '{}'",
                    key, new_name, module.name
                );
                cell.name = new_name.clone();
                module.cells.insert(new_name, cell);
                report.record_rename();
            }
        }
    }
}
