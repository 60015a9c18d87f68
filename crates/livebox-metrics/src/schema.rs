//! Fixed gauge schema
//!
//! Every gauge published for the device, with its help text and the exact
//! label names each sample must carry. Names keep the `_total` suffix of the
//! device-reported counters even though they are exposed as gauges: values
//! are overwritten each cycle, never accumulated locally.

/// Label names shared across gauges
pub mod label {
    pub const SERIAL_NUMBER: &str = "SerialNumber";
    pub const TYPE: &str = "type";
    pub const DIRECTION: &str = "direction";
    pub const EXTREMITY: &str = "extremity";
    pub const SEVERITY: &str = "severity";
}

use label::{DIRECTION, EXTREMITY, SERIAL_NUMBER, SEVERITY, TYPE};

/// Immutable description of one gauge
#[derive(Debug, PartialEq, Eq)]
pub struct GaugeDefinition {
    pub name: &'static str,
    pub help: &'static str,
    /// Ordered, duplicate-free label names
    pub labels: &'static [&'static str],
}

/// Handle naming one gauge of the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gauge {
    DeviceInfo,
    DslInfo,
    BitsPerSecond,
    DslErrors,
    ErroredSeconds,
    Blocks,
    LossOfFraming,
    Upbokle,
    Power,
    NoiseMargin,
    Attenuation,
    Reboots,
    Uptime,
}

impl Gauge {
    pub const ALL: [Gauge; 13] = [
        Gauge::DeviceInfo,
        Gauge::DslInfo,
        Gauge::BitsPerSecond,
        Gauge::DslErrors,
        Gauge::ErroredSeconds,
        Gauge::Blocks,
        Gauge::LossOfFraming,
        Gauge::Upbokle,
        Gauge::Power,
        Gauge::NoiseMargin,
        Gauge::Attenuation,
        Gauge::Reboots,
        Gauge::Uptime,
    ];

    pub fn definition(&self) -> &'static GaugeDefinition {
        match self {
            Gauge::DeviceInfo => &DEVICE_INFO,
            Gauge::DslInfo => &DSL_INFO,
            Gauge::BitsPerSecond => &BITS_PER_SECOND,
            Gauge::DslErrors => &DSL_ERRORS,
            Gauge::ErroredSeconds => &ERRORED_SECONDS,
            Gauge::Blocks => &BLOCKS,
            Gauge::LossOfFraming => &LOSS_OF_FRAMING,
            Gauge::Upbokle => &UPBOKLE,
            Gauge::Power => &POWER,
            Gauge::NoiseMargin => &NOISE_MARGIN,
            Gauge::Attenuation => &ATTENUATION,
            Gauge::Reboots => &REBOOTS,
            Gauge::Uptime => &UPTIME,
        }
    }

    pub fn name(&self) -> &'static str {
        self.definition().name
    }
}

impl std::fmt::Display for Gauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub static DEVICE_INFO: GaugeDefinition = GaugeDefinition {
    name: "livebox_device_info",
    help: "A metric with a constant '1' value labeled by several modem characteristics",
    labels: &[
        "Manufacturer",
        "ModelName",
        "ProductClass",
        SERIAL_NUMBER,
        "HardwareVersion",
        "SoftwareVersion",
        "AdditionalHardwareVersion",
        "AdditionalSoftwareVersion",
        "RescueVersion",
        "ProvisioningCode",
        "BaseMAC",
        "ExternalIPAddress",
        "Bootloader",
        "RescueBootloader",
        "DeviceStatus",
    ],
};

pub static DSL_INFO: GaugeDefinition = GaugeDefinition {
    name: "livebox_dsl_info",
    help: "A metric with a constant '1' value labeled by several DSL characteristics",
    labels: &[
        "StandardUsed",
        "StandardsSupported",
        "CurrentProfile",
        "ModulationHint",
        "ModulationType",
        "ChannelEncapsulationType",
        "DataPath",
        "LinkStatus",
    ],
};

pub static BITS_PER_SECOND: GaugeDefinition = GaugeDefinition {
    name: "livebox_mibs_dsl0_bitspersecond",
    help: "DSL synchronisation rate labeled by direction and type",
    labels: &[SERIAL_NUMBER, TYPE, DIRECTION],
};

pub static DSL_ERRORS: GaugeDefinition = GaugeDefinition {
    name: "livebox_dslstat_errors_total",
    help: "Total number of DSL errors observed labeled by type (FEC, CRC and HEC) and extremity (ATUC=Central and ATUR=remote, modem)",
    labels: &[SERIAL_NUMBER, TYPE, EXTREMITY],
};

pub static ERRORED_SECONDS: GaugeDefinition = GaugeDefinition {
    name: "livebox_dslstat_erroredseconds_total",
    help: "Total number of errored seconds labeled by severity",
    labels: &[SERIAL_NUMBER, SEVERITY],
};

pub static BLOCKS: GaugeDefinition = GaugeDefinition {
    name: "livebox_dslstat_blocks_total",
    help: "Total number of DSL blocks exchanged, labeled by type",
    labels: &[SERIAL_NUMBER, TYPE],
};

pub static LOSS_OF_FRAMING: GaugeDefinition = GaugeDefinition {
    name: "livebox_dslstat_loss_of_framing_total",
    help: "Total number of loss of framing observed",
    labels: &[SERIAL_NUMBER],
};

pub static UPBOKLE: GaugeDefinition = GaugeDefinition {
    name: "livebox_mibs_dsl0_upbokle_decibels",
    help: "Upstream power back-off electrical length (UPBOKLE) in decibels",
    labels: &[SERIAL_NUMBER],
};

pub static POWER: GaugeDefinition = GaugeDefinition {
    name: "livebox_mibs_dsl0_power_decibelmilliwatts",
    help: "The amount of power transmitted from the exchange and the modem.",
    labels: &[SERIAL_NUMBER, DIRECTION],
};

pub static NOISE_MARGIN: GaugeDefinition = GaugeDefinition {
    name: "livebox_mibs_dsl0_noisemargin_decibels",
    help: "Signal-to-noise margin of the DSL line in decibels, labeled by direction",
    labels: &[SERIAL_NUMBER, DIRECTION],
};

pub static ATTENUATION: GaugeDefinition = GaugeDefinition {
    name: "livebox_mibs_dsl0_attenuation_decibels",
    help: "The degradation of signal over distance",
    labels: &[SERIAL_NUMBER, TYPE, DIRECTION],
};

pub static REBOOTS: GaugeDefinition = GaugeDefinition {
    name: "livebox_reboot_total",
    help: "Total number of reboots since last reset",
    labels: &[SERIAL_NUMBER],
};

pub static UPTIME: GaugeDefinition = GaugeDefinition {
    name: "livebox_uptime_seconds_total",
    help: "Total seconds of device uptime",
    labels: &[SERIAL_NUMBER],
};
