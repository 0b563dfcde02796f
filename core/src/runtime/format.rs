#![deny(missing_docs)]

//! # Value Formats
//!
//! Names of the string formats an attribute may declare. Only the names are
//! modelled here; checking values against them belongs to the decoding layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A declared string format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// RFC 3339 date time.
    DateTime,
    /// RFC 5322 email address.
    Email,
    /// RFC 1035 host name.
    Hostname,
    /// IPv4 address.
    Ipv4,
    /// IPv6 address.
    Ipv6,
    /// IPv4 or IPv6 address.
    Ip,
    /// RFC 3986 URI.
    Uri,
    /// IEEE 802 MAC address.
    Mac,
    /// CIDR notation network.
    Cidr,
    /// Regular expression.
    Regexp,
}

impl Format {
    /// The canonical name of the format.
    pub fn as_str(self) -> &'static str {
        match self {
            Format::DateTime => "date-time",
            Format::Email => "email",
            Format::Hostname => "hostname",
            Format::Ipv4 => "ipv4",
            Format::Ipv6 => "ipv6",
            Format::Ip => "ip",
            Format::Uri => "uri",
            Format::Mac => "mac",
            Format::Cidr => "cidr",
            Format::Regexp => "regexp",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_name_matches_display() {
        let json = serde_json::to_string(&Format::DateTime).unwrap();
        assert_eq!(json, "\"date-time\"");
        let back: Format = serde_json::from_str("\"ipv6\"").unwrap();
        assert_eq!(back.to_string(), "ipv6");
    }
}
