//
// DHCP-RS - Option Definition
//   Copyright (C) 2024-2025, Toshiaki Takada
//

pub mod data_type;
pub mod codec;
pub mod options;
pub mod factory;
pub mod definition;
pub mod registry;
pub mod std_defs;
pub mod config;

pub use data_type::ScalarType;
pub use definition::OptionDefinition;
pub use options::DhcpOption;
pub use registry::{OptionDefContainer, OptionDefSpaceContainer};
