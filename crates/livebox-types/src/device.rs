//! Device identity facet (`DeviceInfo:get`)

use serde::{Deserialize, Serialize};

/// Identity and lifetime counters of the gateway
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceInfo {
    pub manufacturer: Option<String>,
    pub model_name: Option<String>,
    pub product_class: Option<String>,

    /// Identifies "this device" across every published gauge
    pub serial_number: Option<String>,

    pub hardware_version: Option<String>,
    pub software_version: Option<String>,
    pub additional_hardware_version: Option<String>,
    pub additional_software_version: Option<String>,
    pub rescue_version: Option<String>,
    pub provisioning_code: Option<String>,

    #[serde(rename = "BaseMAC")]
    pub base_mac: Option<String>,

    #[serde(rename = "ExternalIPAddress")]
    pub external_ip_address: Option<String>,

    /// Vendor extension carrying the bootloader versions
    #[serde(rename = "X_SOFTATHOME-COM_AdditionalSoftwareVersions")]
    pub softathome_additional_software_versions: Option<String>,

    pub number_of_reboots: Option<u64>,

    /// Seconds since last boot
    pub up_time: Option<u64>,

    pub device_status: Option<String>,
}
