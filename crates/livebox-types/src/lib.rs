//! Livebox Types - Raw telemetry facets reported by the gateway
//!
//! A poll cycle fetches three independent facets from the device:
//!
//! - **DeviceInfo**: identity, firmware versions, uptime and reboot count
//! - **DslStats**: DSL error counters, errored seconds and block counters
//! - **DslMib**: DSL line characteristics (rates, margins, attenuation, power)
//!
//! Records mirror the device's JSON payloads. Every field is optional: the
//! firmware omits fields depending on line state and model, and deciding what
//! an absent field means belongs to the metrics mapper, not to decoding.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod device;
pub mod dsl;

pub use device::DeviceInfo;
pub use dsl::{DslMib, DslStats};

use serde::{Deserialize, Serialize};

/// One independently fetched category of device telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    DeviceInfo,
    DslStats,
    DslMib,
}

impl Facet {
    pub const ALL: [Facet; 3] = [Facet::DeviceInfo, Facet::DslStats, Facet::DslMib];

    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::DeviceInfo => "device_info",
            Facet::DslStats => "dsl_stats",
            Facet::DslMib => "dsl_mib",
        }
    }
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three facets fetched within one poll cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetSnapshot {
    pub device_info: DeviceInfo,
    pub dsl_stats: DslStats,
    pub dsl_mib: DslMib,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_names() {
        let names: Vec<_> = Facet::ALL.iter().map(|f| f.to_string()).collect();
        assert_eq!(names, vec!["device_info", "dsl_stats", "dsl_mib"]);
    }
}
