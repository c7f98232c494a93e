//! Typed adapter records
//!
//! The wizard only ever builds `auto` + `inet` stanzas with either the `dhcp`
//! or `static` method. Static fields travel together in [`StaticParams`] so a
//! record can never carry a partial static configuration.

use crate::error::{FormValidationError, InvalidInterfaceName};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the loopback interface
pub const LOOPBACK: &str = "lo";

/// Address family written for every record
pub const FAMILY_INET: &str = "inet";

/// Kernel limit on interface name length (IFNAMSIZ - 1)
const MAX_NAME_LEN: usize = 15;

/// A validated network interface name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceName(String);

impl InterfaceName {
    /// Validate and wrap an interface name
    ///
    /// Accepts ASCII alphanumerics plus `.`, `-`, `_`, `:` and `@`, up to 15
    /// bytes. Names are spliced into shell commands, so the charset is strict.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidInterfaceName> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name.len() > MAX_NAME_LEN {
            Some("name is longer than 15 bytes")
        } else if !name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_' | b':' | b'@'))
        {
            Some("name contains unsupported characters")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(InvalidInterfaceName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the loopback interface
    pub fn is_loopback(&self) -> bool {
        self.0 == LOOPBACK
    }
}

impl fmt::Display for InterfaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for InterfaceName {
    type Err = InvalidInterfaceName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for InterfaceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How an interface obtains its address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressSource {
    Dhcp,
    Static,
}

impl AddressSource {
    /// Method keyword used in the interfaces file
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressSource::Dhcp => "dhcp",
            AddressSource::Static => "static",
        }
    }

    /// Human-readable label for menus
    pub fn label(&self) -> &'static str {
        match self {
            AddressSource::Dhcp => "Dynamic IP",
            AddressSource::Static => "Static IP",
        }
    }

    pub fn from_method(method: &str) -> Option<Self> {
        match method {
            "dhcp" => Some(AddressSource::Dhcp),
            "static" => Some(AddressSource::Static),
            _ => None,
        }
    }
}

impl fmt::Display for AddressSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static addressing parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticParams {
    pub address: String,
    pub netmask: String,
    pub gateway: String,
}

impl StaticParams {
    /// Field labels in form order
    pub const FIELDS: [&'static str; 3] = ["IP Address", "Netmask", "Gateway"];

    pub fn new(
        address: impl Into<String>,
        netmask: impl Into<String>,
        gateway: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            netmask: netmask.into(),
            gateway: gateway.into(),
        }
    }

    /// Build params from submitted form values (address, netmask, gateway)
    ///
    /// Values are trimmed. Empty values and values containing inner
    /// whitespace are rejected since either would corrupt the stanza.
    /// Address syntax itself is not checked.
    pub fn from_form(values: &[String]) -> Result<Self, FormValidationError> {
        if values.len() != Self::FIELDS.len() {
            return Err(FormValidationError::FieldCount {
                expected: Self::FIELDS.len(),
                actual: values.len(),
            });
        }

        let mut cleaned: [String; 3] = Default::default();
        for (slot, (field, value)) in cleaned.iter_mut().zip(Self::FIELDS.into_iter().zip(values)) {
            let value = value.trim();
            if value.is_empty() {
                return Err(FormValidationError::Empty { field });
            }
            if value.chars().any(char::is_whitespace) {
                return Err(FormValidationError::Whitespace { field });
            }
            *slot = value.to_string();
        }

        let [address, netmask, gateway] = cleaned;
        Ok(Self {
            address,
            netmask,
            gateway,
        })
    }

    /// Values in form order
    pub fn to_form_values(&self) -> [String; 3] {
        [
            self.address.clone(),
            self.netmask.clone(),
            self.gateway.clone(),
        ]
    }
}

/// Address configuration of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressConfig {
    Dhcp,
    Static(StaticParams),
}

impl AddressConfig {
    pub fn source(&self) -> AddressSource {
        match self {
            AddressConfig::Dhcp => AddressSource::Dhcp,
            AddressConfig::Static(_) => AddressSource::Static,
        }
    }
}

/// One interface's configuration as managed by the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterRecord {
    pub name: InterfaceName,
    pub auto: bool,
    pub family: String,
    pub config: AddressConfig,
}

impl AdapterRecord {
    /// A DHCP record brought up automatically at boot
    pub fn dhcp(name: InterfaceName) -> Self {
        Self {
            name,
            auto: true,
            family: FAMILY_INET.to_string(),
            config: AddressConfig::Dhcp,
        }
    }

    /// A static record brought up automatically at boot
    pub fn static_ip(name: InterfaceName, params: StaticParams) -> Self {
        Self {
            name,
            auto: true,
            family: FAMILY_INET.to_string(),
            config: AddressConfig::Static(params),
        }
    }

    pub fn source(&self) -> AddressSource {
        self.config.source()
    }

    pub fn static_params(&self) -> Option<&StaticParams> {
        match &self.config {
            AddressConfig::Static(params) => Some(params),
            AddressConfig::Dhcp => None,
        }
    }
}
