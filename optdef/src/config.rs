//
// DHCP-RS - Option Definition
//   Copyright (C) 2024-2025, Toshiaki Takada
//

use std::path::Path;
use std::str::FromStr;

use log::warn;
use serde::Deserialize;

use common::*;

use crate::data_type::ScalarType;
use crate::definition::OptionDefinition;
use crate::factory::factory_generic;
use crate::options::DhcpOption;
use crate::registry::OptionDefSpaceContainer;
use crate::std_defs::*;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub debug: Option<bool>,

    /// Universe of option spaces other than dhcp4 and dhcp6, and of the
    /// default option space.
    pub universe: Option<ConfigUniverse>,

    pub option_def: Option<Vec<ConfigOptionDef>>,
    pub option_data: Option<Vec<ConfigOptionData>>,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Copy, Clone)]
#[serde(rename_all = "lowercase")]
pub enum ConfigUniverse {
    V4,
    V6,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigOptionDef {
    pub name: String,
    pub code: u16,
    #[serde(rename = "type")]
    pub option_type: String,
    pub array: Option<bool>,

    /// Comma separated data types of the record fields.
    pub record_types: Option<String>,

    pub space: Option<String>,
    pub encapsulate: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigOptionData {
    pub name: Option<String>,
    pub code: Option<u16>,
    pub space: Option<String>,
    pub data: Option<String>,
    pub csv_format: Option<bool>,
}

impl Config {
    pub fn is_debug_enabled(&self) -> bool {
        match self.debug {
            Some(debug) => debug,
            None => false,
        }
    }

    /// Read configuration from JSON file.
    pub fn from_file(path: &Path) -> Result<Config, DhcpError> {
        let s = std::fs::read_to_string(path)?;
        s.parse()
    }

    /// Return configured universe, V4 unless set.
    pub fn universe(&self) -> Universe {
        match self.universe {
            Some(ConfigUniverse::V6) => Universe::V6,
            _ => Universe::V4,
        }
    }

    /// Return option space of entries without one, the standard space of
    /// the configured universe.
    pub fn default_space(&self) -> &'static str {
        std_option_space(self.universe())
    }

    /// Return universe of an option space.
    pub fn space_universe(&self, space: &str) -> Universe {
        match std_space_universe(space) {
            Some(universe) => universe,
            None => self.universe(),
        }
    }

    /// Build option definition storage from "option-def" entries.
    pub fn option_defs(&self) -> Result<OptionDefSpaceContainer, DhcpError> {
        let mut storage = OptionDefSpaceContainer::new();

        for entry in self.option_def.iter().flatten() {
            let space = entry.space.as_deref().unwrap_or(self.default_space());

            if let Err(e) = self.store_option_def(&mut storage, space, entry) {
                warn!("Option definition '{}' in space {} rejected: {}", entry.name, space, e);
                return Err(e)
            }
        }

        Ok(storage)
    }

    fn store_option_def(&self, storage: &mut OptionDefSpaceContainer, space: &str,
                        entry: &ConfigOptionDef) -> Result<(), DhcpError> {
        let option_type: ScalarType = entry.option_type.parse()?;
        let array = entry.array.unwrap_or(false);

        let mut def = match entry.encapsulate.as_deref() {
            Some(encapsulate) if !encapsulate.is_empty() => {
                if array {
                    return Err(DhcpError::MalformedDefinition(
                        format!("option '{}' ({}): array option can't encapsulate an option space", entry.name, entry.code)))
                }
                OptionDefinition::new_encapsulated(&entry.name, entry.code, option_type, encapsulate)
            }
            _ => OptionDefinition::new(&entry.name, entry.code, option_type, array),
        };

        if let Some(record_types) = &entry.record_types {
            for field in record_types.split(',').filter(|s| !s.trim().is_empty()) {
                def.add_record_field_str(field)?;
            }
        }

        def.validate()?;

        if let Some(universe) = std_space_universe(space) {
            let std_defs = std_option_defs(universe);
            if !std_defs.find_by_code(def.code()).is_empty() || std_defs.find_by_name(def.name()).is_some() {
                return Err(DhcpError::DuplicateDefinition(
                    format!("option '{}' ({}) overrides a standard option in space {}", def.name(), def.code(), space)))
            }
        }

        storage.add(space, def)
    }

    /// Build options from "option-data" entries.
    pub fn options(&self, storage: &OptionDefSpaceContainer) -> Result<Vec<DhcpOption>, DhcpError> {
        let mut options = Vec::new();

        for entry in self.option_data.iter().flatten() {
            match self.option_from_entry(storage, entry) {
                Ok(option) => options.push(option),
                Err(e) => {
                    warn!("Option data {:?} rejected: {}", entry, e);
                    return Err(e)
                }
            }
        }

        Ok(options)
    }

    fn option_from_entry(&self, storage: &OptionDefSpaceContainer, entry: &ConfigOptionData) -> Result<DhcpOption, DhcpError> {
        let space = entry.space.as_deref().unwrap_or(self.default_space());
        let universe = self.space_universe(space);
        let std_defs = std_space_universe(space).map(std_option_defs);

        let def = match (&entry.name, entry.code) {
            (Some(name), code) => {
                let def = match storage.find_by_name(space, name)
                    .or_else(|| std_defs.as_ref().and_then(|defs| defs.find_by_name(name))) {
                    Some(def) => def,
                    None => {
                        return Err(DhcpError::ConfigError(format!("no definition for option '{}' in space {}", name, space)))
                    }
                };
                if let Some(code) = code {
                    if def.code() != code {
                        return Err(DhcpError::ConfigError(
                            format!("option '{}' has code {} in space {}, not {}", name, def.code(), space, code)))
                    }
                }
                Some(def)
            }
            (None, Some(code)) => {
                storage.find(space, code)
                    .or_else(|| std_defs.as_ref().and_then(|defs| defs.find_by_code(code).into_iter().next()))
            }
            (None, None) => {
                return Err(DhcpError::ConfigError(String::from("option data needs a name or a code")))
            }
        };

        let data = entry.data.as_deref().unwrap_or("");
        let csv_format = entry.csv_format.unwrap_or(true);

        match (def, csv_format) {
            (Some(def), true) => {
                let values: Vec<&str> = if data.trim().is_empty() {
                    Vec::new()
                } else {
                    data.split(',').collect()
                };
                def.option_factory_values(universe, def.code(), &values)
            }
            (Some(def), false) => def.option_factory(universe, def.code(), &decode_hex(data)?),
            (None, false) => match entry.code {
                Some(code) => Ok(factory_generic(universe, code, &decode_hex(data)?)),
                None => Err(DhcpError::ConfigError(String::from("option data needs a code"))),
            },
            (None, true) => {
                Err(DhcpError::ConfigError(format!("no definition for option code {:?} in space {}, csv-format requires one",
                                                   entry.code, space)))
            }
        }
    }
}

impl FromStr for Config {
    type Err = DhcpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(|e| DhcpError::ConfigSyntax { line: e.line(), reason: e.to_string() })
    }
}

/// Decode hexadecimal option data, "0x" prefix and whitespace allowed.
fn decode_hex(data: &str) -> Result<Vec<u8>, DhcpError> {
    let s: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(&s);

    hex::decode(s).map_err(|e| DhcpError::InvalidValue(format!("invalid hex data '{}': {}", data, e)))
}
