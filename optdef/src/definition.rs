//
// DHCP-RS - Option Definition
//   Copyright (C) 2024-2025, Toshiaki Takada
//

use std::fmt;

use log::trace;

use common::*;

use crate::codec::*;
use crate::data_type::ScalarType;
use crate::factory::*;
use crate::options::*;

/// Check option or option space name.  Letters, digits, '-' and '_', not
/// starting or ending with '-' or '_'.
pub fn validate_name(name: &str) -> bool {
    !name.is_empty() &&
        name.bytes().all(|c| c.is_ascii_alphanumeric() || c == b'-' || c == b'_') &&
        !name.starts_with(['-', '_']) &&
        !name.ends_with(['-', '_'])
}

/// DHCP option definition.
///
/// Describes the format of an option: its name and code, the data type
/// it carries, whether the data is an array, the data fields of a record,
/// and the option space whose options may follow the data fields.
///
/// The definition is not validated on construction or mutation.  It is
/// the caller's responsibility to call `validate()` before using any of
/// the factories; building an option from an invalid definition gives
/// unspecified results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDefinition {
    /// Option name.
    name: String,

    /// Option code.
    code: u16,

    /// Option data type.
    option_type: ScalarType,

    /// Array indicator.
    array_type: bool,

    /// Name of the encapsulated option space.
    encapsulated_space: Option<String>,

    /// Data field types of a record.
    record_fields: Vec<ScalarType>,
}

impl OptionDefinition {

    /// Constructor.
    pub fn new(name: &str, code: u16, option_type: ScalarType, array_type: bool) -> OptionDefinition {
        OptionDefinition {
            name: String::from(name),
            code,
            option_type,
            array_type,
            encapsulated_space: None,
            record_fields: Vec::new(),
        }
    }

    /// Constructor with data type name.
    pub fn new_from_str(name: &str, code: u16, type_name: &str, array_type: bool) -> Result<OptionDefinition, DhcpError> {
        Ok(OptionDefinition::new(name, code, type_name.parse()?, array_type))
    }

    /// Constructor for an option encapsulating an option space.  Such an
    /// option is never an array.
    pub fn new_encapsulated(name: &str, code: u16, option_type: ScalarType, space: &str) -> OptionDefinition {
        let mut def = OptionDefinition::new(name, code, option_type, false);
        if !space.is_empty() {
            def.encapsulated_space = Some(String::from(space));
        }
        def
    }

    /// Append data field to the record.
    pub fn add_record_field(&mut self, field_type: ScalarType) {
        self.record_fields.push(field_type);
    }

    /// Append data field to the record by data type name.
    pub fn add_record_field_str(&mut self, type_name: &str) -> Result<(), DhcpError> {
        self.add_record_field(type_name.parse()?);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn option_type(&self) -> ScalarType {
        self.option_type
    }

    pub fn array_type(&self) -> bool {
        self.array_type
    }

    pub fn encapsulated_space(&self) -> Option<&str> {
        self.encapsulated_space.as_deref()
    }

    pub fn record_fields(&self) -> &[ScalarType] {
        &self.record_fields
    }

    /// Check the definition, report the first violation found.
    pub fn validate(&self) -> Result<(), DhcpError> {
        let malformed = |reason: String| {
            Err(DhcpError::MalformedDefinition(format!("option '{}' ({}): {}", self.name, self.code, reason)))
        };

        if self.option_type == ScalarType::Record {
            if self.record_fields.is_empty() {
                return malformed(String::from("no data fields specified for the record"))
            }
            let last = self.record_fields.len() - 1;
            for (i, field) in self.record_fields.iter().enumerate() {
                if field.is_variable_width() && i < last {
                    return malformed(format!("{} data field can't be laid before other data fields", field))
                }
            }
        } else if !self.record_fields.is_empty() {
            return malformed(format!("data fields specified for an option of type {}", self.option_type))
        }

        if self.array_type && self.option_type == ScalarType::Record {
            return malformed(String::from("array of records is not supported"))
        }

        if self.array_type && self.encapsulated_space.is_some() {
            return malformed(String::from("array option can't encapsulate an option space"))
        }

        if !validate_name(&self.name) {
            return malformed(String::from("invalid option name"))
        }

        if let Some(space) = &self.encapsulated_space {
            if !validate_name(space) {
                return malformed(format!("invalid encapsulated option space name '{}'", space))
            }
        }

        if self.array_type {
            match self.option_type {
                ScalarType::String => return malformed(String::from("array of strings is not supported")),
                ScalarType::Empty => return malformed(String::from("array of empty values is not supported")),
                _ => {}
            }
        }

        for field in &self.record_fields {
            if *field == ScalarType::Empty || *field == ScalarType::Record {
                return malformed(format!("{} can't be a data field of a record", field))
            }
        }

        Ok(())
    }

    /// Record of three data fields, first_type followed by two uint32.
    fn have_iax6_format(&self, first_type: ScalarType) -> bool {
        self.option_type == ScalarType::Record &&
            self.record_fields == [first_type, ScalarType::UInt32, ScalarType::UInt32]
    }

    /// Check if the format matches DHCPv6 IA_NA and IA_PD.
    pub fn have_ia6_format(&self) -> bool {
        self.have_iax6_format(ScalarType::UInt32)
    }

    /// Check if the format matches DHCPv6 IAADDR.
    pub fn have_iaaddr6_format(&self) -> bool {
        self.have_iax6_format(ScalarType::Ipv6Address)
    }

    /// Build an option from a wire buffer.
    ///
    /// Integers, integer arrays, address lists and empty options get their
    /// specialized factories, everything else is laid out by the definition.
    /// The definition must have passed `validate()`.
    pub fn option_factory(&self, universe: Universe, code: u16, data: &[u8]) -> Result<DhcpOption, DhcpError> {
        trace!("option_factory {} {:?} {} len {}", self.name, universe, code, data.len());

        if self.array_type {
            match (self.option_type, universe) {
                (ScalarType::UInt8, _) => factory_integer_array::<u8>(universe, code, data),
                (ScalarType::UInt16, _) => factory_integer_array::<u16>(universe, code, data),
                (ScalarType::UInt32, _) => factory_integer_array::<u32>(universe, code, data),
                (ScalarType::Int8, _) => factory_integer_array::<i8>(universe, code, data),
                (ScalarType::Int16, _) => factory_integer_array::<i16>(universe, code, data),
                (ScalarType::Int32, _) => factory_integer_array::<i32>(universe, code, data),
                (ScalarType::Ipv4Address, Universe::V4) => factory_addr_list4(universe, code, data),
                (ScalarType::Ipv6Address, Universe::V6) => factory_addr_list6(universe, code, data),
                _ => Ok(DhcpOption::Custom(OptionCustom::new_from(self, universe, code, data)?)),
            }
        } else if self.encapsulated_space.is_some() {
            Ok(DhcpOption::Custom(OptionCustom::new_from(self, universe, code, data)?))
        } else {
            match self.option_type {
                ScalarType::Empty => {
                    if data.is_empty() {
                        Ok(factory_empty(universe, code))
                    } else {
                        Err(DhcpError::SizeMismatch(format!("option {} carries no data but got {} bytes", code, data.len())))
                    }
                }
                ScalarType::UInt8 => factory_integer::<u8>(universe, code, data),
                ScalarType::UInt16 => factory_integer::<u16>(universe, code, data),
                ScalarType::UInt32 => factory_integer::<u32>(universe, code, data),
                ScalarType::Int8 => factory_integer::<i8>(universe, code, data),
                ScalarType::Int16 => factory_integer::<i16>(universe, code, data),
                ScalarType::Int32 => factory_integer::<i32>(universe, code, data),
                _ => Ok(DhcpOption::Custom(OptionCustom::new_from(self, universe, code, data)?)),
            }
        }
    }

    /// Build an option from textual values, one per data field.
    ///
    /// A scalar takes exactly one value, an array any number of values of
    /// the option type, and a record one value per data field.  Values are
    /// trimmed before encoding.  The definition must have passed
    /// `validate()`.
    pub fn option_factory_values<S: AsRef<str>>(&self, universe: Universe, code: u16, values: &[S]) -> Result<DhcpOption, DhcpError> {
        let mut buf = Vec::new();

        if self.option_type == ScalarType::Record {
            if values.len() != self.record_fields.len() {
                return Err(DhcpError::InvalidValue(format!("option {} expects {} values for its data fields, got {}",
                                                           code, self.record_fields.len(), values.len())))
            }
            for (value, field) in values.iter().zip(self.record_fields.iter()) {
                encode_value(&mut buf, value.as_ref().trim(), *field)?;
            }
        } else if self.array_type {
            for value in values {
                encode_value(&mut buf, value.as_ref().trim(), self.option_type)?;
            }
        } else if self.option_type == ScalarType::Empty {
            if !values.is_empty() {
                return Err(DhcpError::InvalidValue(format!("option {} carries no data, got {} values", code, values.len())))
            }
        } else {
            if values.len() != 1 {
                return Err(DhcpError::InvalidValue(format!("option {} expects a single value, got {}", code, values.len())))
            }
            encode_value(&mut buf, values[0].as_ref().trim(), self.option_type)?;
        }

        Ok(factory_generic(universe, code, &buf))
    }
}

impl fmt::Display for OptionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.code, self.option_type)?;
        if self.array_type {
            write!(f, "[]")?;
        }
        if !self.record_fields.is_empty() {
            write!(f, " {:?}", self.record_fields)?;
        }
        if let Some(space) = &self.encapsulated_space {
            write!(f, " encapsulate {}", space)?;
        }
        Ok(())
    }
}
