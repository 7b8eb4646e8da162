//
// DHCP-RS - Option Definition
//   Copyright (C) 2024-2025, Toshiaki Takada
//
// Standard option definitions for the dhcp4 and dhcp6 option spaces.
//

use std::sync::{Arc, OnceLock};

use log::{debug, warn};

use common::Universe;

use crate::data_type::ScalarType;
use crate::definition::OptionDefinition;
use crate::registry::OptionDefContainer;

/// Option space of the standard DHCPv4 options.
pub const DHCP4_OPTION_SPACE: &str = "dhcp4";

/// Option space of the standard DHCPv6 options.
pub const DHCP6_OPTION_SPACE: &str = "dhcp6";

/// Option space of DHCPv4 vendor encapsulated options.
pub const VENDOR_ENCAPSULATED_OPTION_SPACE: &str = "vendor-encapsulated-options-space";

/// Table entry, an option definition in static form.
struct StdOptionDef {
    name: &'static str,
    code: u16,
    option_type: ScalarType,
    array: bool,
    records: &'static [ScalarType],
    encapsulates: &'static str,
}

macro_rules! std_def {
    ($name:expr, $code:expr, $t:ident) => {
        std_def!($name, $code, $t, false, &[], "")
    };
    ($name:expr, $code:expr, $t:ident, array) => {
        std_def!($name, $code, $t, true, &[], "")
    };
    ($name:expr, $code:expr, $t:ident, $array:expr, $records:expr, $encapsulates:expr) => {
        StdOptionDef {
            name: $name,
            code: $code,
            option_type: ScalarType::$t,
            array: $array,
            records: $records,
            encapsulates: $encapsulates,
        }
    };
}

/// DHCPv4 options, RFC 2132 and friends.
const STD_OPTION4_DEFS: &[StdOptionDef] = &[
    std_def!("subnet-mask", 1, Ipv4Address),
    std_def!("time-offset", 2, Int32),
    std_def!("routers", 3, Ipv4Address, array),
    std_def!("time-servers", 4, Ipv4Address, array),
    std_def!("name-servers", 5, Ipv4Address, array),
    std_def!("domain-name-servers", 6, Ipv4Address, array),
    std_def!("log-servers", 7, Ipv4Address, array),
    std_def!("lpr-servers", 9, Ipv4Address, array),
    std_def!("host-name", 12, String),
    std_def!("boot-size", 13, UInt16),
    std_def!("merit-dump", 14, String),
    std_def!("domain-name", 15, Fqdn),
    std_def!("swap-server", 16, Ipv4Address),
    std_def!("root-path", 17, String),
    std_def!("extensions-path", 18, String),
    std_def!("ip-forwarding", 19, Boolean),
    std_def!("non-local-source-routing", 20, Boolean),
    std_def!("max-dgram-reassembly", 22, UInt16),
    std_def!("default-ip-ttl", 23, UInt8),
    std_def!("path-mtu-aging-timeout", 24, UInt32),
    std_def!("path-mtu-plateau-table", 25, UInt16, array),
    std_def!("interface-mtu", 26, UInt16),
    std_def!("all-subnets-local", 27, Boolean),
    std_def!("broadcast-address", 28, Ipv4Address),
    std_def!("perform-mask-discovery", 29, Boolean),
    std_def!("mask-supplier", 30, Boolean),
    std_def!("router-discovery", 31, Boolean),
    std_def!("router-solicitation-address", 32, Ipv4Address),
    std_def!("trailer-encapsulation", 34, Boolean),
    std_def!("arp-cache-timeout", 35, UInt32),
    std_def!("ieee802-3-encapsulation", 36, Boolean),
    std_def!("default-tcp-ttl", 37, UInt8),
    std_def!("tcp-keepalive-interval", 38, UInt32),
    std_def!("tcp-keepalive-garbage", 39, Boolean),
    std_def!("nis-domain", 40, String),
    std_def!("nis-servers", 41, Ipv4Address, array),
    std_def!("ntp-servers", 42, Ipv4Address, array),
    std_def!("vendor-encapsulated-options", 43, Empty, false, &[], VENDOR_ENCAPSULATED_OPTION_SPACE),
    std_def!("netbios-name-servers", 44, Ipv4Address, array),
    std_def!("netbios-dd-server", 45, Ipv4Address, array),
    std_def!("netbios-node-type", 46, UInt8),
    std_def!("netbios-scope", 47, String),
    std_def!("font-servers", 48, Ipv4Address, array),
    std_def!("x-display-manager", 49, Ipv4Address, array),
    std_def!("dhcp-requested-address", 50, Ipv4Address),
    std_def!("dhcp-lease-time", 51, UInt32),
    std_def!("dhcp-option-overload", 52, UInt8),
    std_def!("dhcp-message-type", 53, UInt8),
    std_def!("dhcp-server-identifier", 54, Ipv4Address),
    std_def!("dhcp-parameter-request-list", 55, UInt8, array),
    std_def!("dhcp-message", 56, String),
    std_def!("dhcp-max-message-size", 57, UInt16),
    std_def!("dhcp-renewal-time", 58, UInt32),
    std_def!("dhcp-rebinding-time", 59, UInt32),
    std_def!("vendor-class-identifier", 60, String),
    std_def!("nwip-domain-name", 62, String),
    std_def!("nisplus-domain-name", 64, String),
    std_def!("nisplus-servers", 65, Ipv4Address, array),
    std_def!("tftp-server-name", 66, String),
    std_def!("boot-file-name", 67, String),
    std_def!("mobile-ip-home-agent", 68, Ipv4Address, array),
    std_def!("smtp-server", 69, Ipv4Address, array),
    std_def!("pop-server", 70, Ipv4Address, array),
    std_def!("nntp-server", 71, Ipv4Address, array),
    std_def!("www-server", 72, Ipv4Address, array),
    std_def!("finger-server", 73, Ipv4Address, array),
    std_def!("irc-server", 74, Ipv4Address, array),
    std_def!("streettalk-server", 75, Ipv4Address, array),
    std_def!("streettalk-directory-assistance-server", 76, Ipv4Address, array),
    std_def!("user-class", 77, String),
    std_def!("fqdn", 81, Record, false, &[ScalarType::UInt8, ScalarType::UInt8, ScalarType::UInt8, ScalarType::Fqdn], ""),
    std_def!("dhcp-agent-options", 82, Empty, false, &[], "dhcp-agent-options-space"),
    std_def!("authenticate", 90, String),
    std_def!("client-last-transaction-time", 91, UInt32),
    std_def!("associated-ip", 92, Ipv4Address, array),
    std_def!("subnet-selection", 118, Ipv4Address),
    std_def!("domain-search", 119, Fqdn, array),
];

/// DHCPv6 options, RFC 3315, 3319, 3633, 3646 and friends.
const STD_OPTION6_DEFS: &[StdOptionDef] = &[
    std_def!("clientid", 1, String),
    std_def!("serverid", 2, String),
    std_def!("ia-na", 3, Record, false, &[ScalarType::UInt32, ScalarType::UInt32, ScalarType::UInt32], DHCP6_OPTION_SPACE),
    std_def!("ia-ta", 4, UInt32, false, &[], DHCP6_OPTION_SPACE),
    std_def!("iaaddr", 5, Record, false, &[ScalarType::Ipv6Address, ScalarType::UInt32, ScalarType::UInt32], DHCP6_OPTION_SPACE),
    std_def!("oro", 6, UInt16, array),
    std_def!("preference", 7, UInt8),
    std_def!("elapsed-time", 8, UInt16),
    std_def!("relay-msg", 9, String),
    std_def!("unicast", 12, Ipv6Address),
    std_def!("status-code", 13, Record, false, &[ScalarType::UInt16, ScalarType::String], ""),
    std_def!("rapid-commit", 14, Empty),
    std_def!("user-class", 15, String),
    std_def!("vendor-class", 16, Record, false, &[ScalarType::UInt32, ScalarType::String], ""),
    std_def!("vendor-opts", 17, UInt32, false, &[], "vendor-opts-space"),
    std_def!("interface-id", 18, String),
    std_def!("reconf-msg", 19, UInt8),
    std_def!("reconf-accept", 20, Empty),
    std_def!("sip-server-dns", 21, Fqdn, array),
    std_def!("sip-server-addr", 22, Ipv6Address, array),
    std_def!("dns-servers", 23, Ipv6Address, array),
    std_def!("domain-search", 24, Fqdn, array),
    std_def!("ia-pd", 25, Record, false, &[ScalarType::UInt32, ScalarType::UInt32, ScalarType::UInt32], DHCP6_OPTION_SPACE),
    std_def!("iaprefix", 26, Record, false, &[ScalarType::UInt32, ScalarType::UInt32, ScalarType::UInt8, ScalarType::Ipv6Address], DHCP6_OPTION_SPACE),
    std_def!("nis-servers", 27, Ipv6Address, array),
    std_def!("nisp-servers", 28, Ipv6Address, array),
    std_def!("nis-domain-name", 29, Fqdn, array),
    std_def!("nisp-domain-name", 30, Fqdn, array),
    std_def!("sntp-servers", 31, Ipv6Address, array),
    std_def!("information-refresh-time", 32, UInt32),
    std_def!("bcmcs-server-dns", 33, Fqdn, array),
    std_def!("bcmcs-server-addr", 34, Ipv6Address, array),
    std_def!("remote-id", 37, Record, false, &[ScalarType::UInt32, ScalarType::String], ""),
    std_def!("subscriber-id", 38, String),
    std_def!("client-fqdn", 39, Record, false, &[ScalarType::UInt8, ScalarType::Fqdn], ""),
    std_def!("pana-agent", 40, Ipv6Address, array),
    std_def!("new-posix-timezone", 41, String),
    std_def!("new-tzdb-timezone", 42, String),
    std_def!("ero", 43, UInt16, array),
    std_def!("lq-query", 44, Record, false, &[ScalarType::UInt8, ScalarType::Ipv6Address], DHCP6_OPTION_SPACE),
    std_def!("client-data", 45, Empty, false, &[], DHCP6_OPTION_SPACE),
    std_def!("clt-time", 46, UInt32),
    std_def!("lq-relay-data", 47, Record, false, &[ScalarType::Ipv6Address, ScalarType::String], ""),
    std_def!("lq-client-link", 48, Ipv6Address, array),
];

fn build_defs(table: &[StdOptionDef]) -> OptionDefContainer {
    let mut container = OptionDefContainer::new();

    for entry in table {
        let mut def = if entry.encapsulates.is_empty() {
            OptionDefinition::new(entry.name, entry.code, entry.option_type, entry.array)
        } else {
            OptionDefinition::new_encapsulated(entry.name, entry.code, entry.option_type, entry.encapsulates)
        };
        for field in entry.records {
            def.add_record_field(*field);
        }

        match def.validate() {
            Ok(()) => {
                if let Err(e) = container.insert(def) {
                    warn!("Standard option definition {} not stored: {}", entry.name, e);
                }
            }
            Err(e) => warn!("Standard option definition {} rejected: {}", entry.name, e),
        }
    }

    debug!("Built {} standard option definitions", container.len());
    container
}

/// Return standard option definitions for the universe.
///
/// The tables are built and validated on first use and shared afterwards.
pub fn std_option_defs(universe: Universe) -> Arc<OptionDefContainer> {
    static STD_OPTION4: OnceLock<Arc<OptionDefContainer>> = OnceLock::new();
    static STD_OPTION6: OnceLock<Arc<OptionDefContainer>> = OnceLock::new();

    match universe {
        Universe::V4 => STD_OPTION4.get_or_init(|| Arc::new(build_defs(STD_OPTION4_DEFS))).clone(),
        Universe::V6 => STD_OPTION6.get_or_init(|| Arc::new(build_defs(STD_OPTION6_DEFS))).clone(),
    }
}

/// Return standard option space name for the universe.
pub fn std_option_space(universe: Universe) -> &'static str {
    match universe {
        Universe::V4 => DHCP4_OPTION_SPACE,
        Universe::V6 => DHCP6_OPTION_SPACE,
    }
}

/// Return universe of a standard option space.
pub fn std_space_universe(space: &str) -> Option<Universe> {
    match space {
        DHCP4_OPTION_SPACE => Some(Universe::V4),
        DHCP6_OPTION_SPACE => Some(Universe::V6),
        _ => None,
    }
}

///
/// Unit tests.
///
#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DhcpOption;

    #[test]
    pub fn test_std_defs_valid() {
        for (table, universe) in [(STD_OPTION4_DEFS, Universe::V4), (STD_OPTION6_DEFS, Universe::V6)] {
            assert_eq!(build_defs(table).len(), table.len());
            assert_eq!(std_option_defs(universe).len(), table.len());
        }
    }

    #[test]
    pub fn test_std_defs_unique() {
        for universe in [Universe::V4, Universe::V6] {
            let defs = std_option_defs(universe);
            for def in defs.iter() {
                assert_eq!(defs.find_by_code(def.code()).len(), 1, "{}", def);
                assert!(Arc::ptr_eq(&defs.find_by_name(def.name()).unwrap(), def));
            }
        }
    }

    #[test]
    pub fn test_std_defs_shared() {
        assert!(Arc::ptr_eq(&std_option_defs(Universe::V6), &std_option_defs(Universe::V6)));
    }

    #[test]
    pub fn test_std_defs_ia_shapes() {
        let defs = std_option_defs(Universe::V6);
        assert!(defs.find_by_name("ia-na").unwrap().have_ia6_format());
        assert!(defs.find_by_name("ia-pd").unwrap().have_ia6_format());
        assert!(defs.find_by_name("iaaddr").unwrap().have_iaaddr6_format());
        assert!(!defs.find_by_name("iaprefix").unwrap().have_iaaddr6_format());
    }

    #[test]
    pub fn test_std_defs_factory() {
        let defs = std_option_defs(Universe::V4);
        let routers = defs.find_by_code(3).pop().unwrap();
        match routers.option_factory(Universe::V4, 3, &[10, 0, 0, 1, 10, 0, 0, 2]) {
            Ok(DhcpOption::AddrList4(opt)) => assert_eq!(opt.addrs().len(), 2),
            res => assert!(false, "Unexpected: {:?}", res),
        }

        let prl = defs.find_by_code(55).pop().unwrap();
        let opt = prl.option_factory_values(Universe::V4, 55, &["1", "3", "6", "15"]).unwrap();
        assert_eq!(opt.data().unwrap(), [1, 3, 6, 15]);
    }

    #[test]
    pub fn test_std_space() {
        assert_eq!(std_option_space(Universe::V4), "dhcp4");
        assert_eq!(std_space_universe("dhcp6"), Some(Universe::V6));
        assert_eq!(std_space_universe("isc"), None);
    }
}
