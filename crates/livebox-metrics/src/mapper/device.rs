//! Device identity mapping

use super::{keyed, Sample, WriteSet};
use crate::registry::Labels;
use crate::schema::{label, Gauge};
use livebox_types::DeviceInfo;

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

pub(super) fn map_device_info(writes: &mut WriteSet, serial: &str, info: &DeviceInfo) {
    let bootloader = text(&info.softathome_additional_software_versions);

    let labels = Labels::from([
        ("Manufacturer", text(&info.manufacturer)),
        ("ModelName", text(&info.model_name)),
        ("ProductClass", text(&info.product_class)),
        (label::SERIAL_NUMBER, serial.to_string()),
        ("HardwareVersion", text(&info.hardware_version)),
        ("SoftwareVersion", text(&info.software_version)),
        ("AdditionalHardwareVersion", text(&info.additional_hardware_version)),
        ("AdditionalSoftwareVersion", text(&info.additional_software_version)),
        ("RescueVersion", text(&info.rescue_version)),
        ("ProvisioningCode", text(&info.provisioning_code)),
        ("BaseMAC", text(&info.base_mac)),
        ("ExternalIPAddress", text(&info.external_ip_address)),
        ("Bootloader", bootloader.clone()),
        ("RescueBootloader", bootloader),
        ("DeviceStatus", text(&info.device_status)),
    ]);
    writes.push(Sample::new(Gauge::DeviceInfo, labels, 1.0));

    writes.push_value(
        Gauge::Reboots,
        keyed(serial, &[]),
        info.number_of_reboots,
        "NumberOfReboots",
    );
    writes.push_value(Gauge::Uptime, keyed(serial, &[]), info.up_time, "UpTime");
}
