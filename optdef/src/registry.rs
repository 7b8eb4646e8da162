//
// DHCP-RS - Option Definition
//   Copyright (C) 2024-2025, Toshiaki Takada
//
// Registry:
//  Definitions in insertion order, indexed by option code.  A container is
//  built once and shared read-only afterwards.
//

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::debug;

use common::DhcpError;

use crate::definition::{validate_name, OptionDefinition};

/// Option definition container.
#[derive(Debug, Default, Clone)]
pub struct OptionDefContainer {
    /// Definitions in insertion order.
    defs: Vec<Arc<OptionDefinition>>,

    /// Option code to positions in defs, in insertion order.
    by_code: HashMap<u16, Vec<usize>>,
}

impl OptionDefContainer {
    pub fn new() -> OptionDefContainer {
        OptionDefContainer::default()
    }

    /// Add definition.  The same code may be added more than once.
    pub fn insert(&mut self, def: OptionDefinition) -> Result<(), DhcpError> {
        self.insert_shared(Arc::new(def))
    }

    /// Add definition shared with another container.
    pub fn insert_shared(&mut self, def: Arc<OptionDefinition>) -> Result<(), DhcpError> {
        debug!("Insert option definition {}", def);

        self.by_code.entry(def.code()).or_default().push(self.defs.len());
        self.defs.push(def);
        Ok(())
    }

    /// Iterate definitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<OptionDefinition>> {
        self.defs.iter()
    }

    /// Return definitions with the code, in insertion order.
    pub fn find_by_code(&self, code: u16) -> Vec<Arc<OptionDefinition>> {
        match self.by_code.get(&code) {
            Some(indices) => indices.iter().map(|i| self.defs[*i].clone()).collect(),
            None => Vec::new(),
        }
    }

    /// Return first definition with the name.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<OptionDefinition>> {
        self.defs.iter().find(|def| def.name() == name).cloned()
    }

    /// Remove all definitions with the code, return the number removed.
    pub fn remove_by_code(&mut self, code: u16) -> usize {
        let before = self.defs.len();
        self.defs.retain(|def| def.code() != code);

        self.by_code.clear();
        for (i, def) in self.defs.iter().enumerate() {
            self.by_code.entry(def.code()).or_default().push(i);
        }

        let removed = before - self.defs.len();
        if removed > 0 {
            debug!("Removed {} option definitions with code {}", removed, code);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn clear(&mut self) {
        self.defs.clear();
        self.by_code.clear();
    }
}

/// Option definitions grouped by option space.
///
/// Within one space an option name or code is defined at most once.
#[derive(Debug, Default, Clone)]
pub struct OptionDefSpaceContainer {
    spaces: BTreeMap<String, OptionDefContainer>,
}

impl OptionDefSpaceContainer {
    pub fn new() -> OptionDefSpaceContainer {
        OptionDefSpaceContainer::default()
    }

    /// Add definition to the option space.
    pub fn add(&mut self, space: &str, def: OptionDefinition) -> Result<(), DhcpError> {
        if !validate_name(space) {
            return Err(DhcpError::MalformedDefinition(format!("invalid option space name '{}'", space)))
        }

        let container = self.spaces.entry(String::from(space)).or_default();
        if container.find_by_name(def.name()).is_some() {
            return Err(DhcpError::DuplicateDefinition(format!("option '{}' already defined in space {}", def.name(), space)))
        }
        if !container.find_by_code(def.code()).is_empty() {
            return Err(DhcpError::DuplicateDefinition(format!("option code {} already defined in space {}", def.code(), space)))
        }

        debug!("Store option definition {} in space {}", def, space);
        container.insert(def)
    }

    /// Return container of the option space.
    pub fn get(&self, space: &str) -> Option<&OptionDefContainer> {
        self.spaces.get(space)
    }

    /// Return definition with the code in the option space.
    pub fn find(&self, space: &str, code: u16) -> Option<Arc<OptionDefinition>> {
        self.spaces.get(space)?.find_by_code(code).into_iter().next()
    }

    /// Return definition with the name in the option space.
    pub fn find_by_name(&self, space: &str, name: &str) -> Option<Arc<OptionDefinition>> {
        self.spaces.get(space)?.find_by_name(name)
    }

    /// Iterate option spaces in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionDefContainer)> {
        self.spaces.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.values().all(|c| c.is_empty())
    }
}
