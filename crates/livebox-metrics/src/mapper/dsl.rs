//! DSL line mapping
//!
//! Error counters keep the device's asymmetric naming: unprefixed fields are
//! the modem side (ATUR), `ATUC`-prefixed fields the central-office side.

use super::{keyed, Sample, Tenths, WriteSet};
use crate::registry::Labels;
use crate::schema::{label, Gauge};
use livebox_types::{DslMib, DslStats};

const UPSTREAM: &str = "upstream";
const DOWNSTREAM: &str = "downstream";

pub(super) fn map_dsl_info(writes: &mut WriteSet, mib: &DslMib) {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();

    let labels = Labels::from([
        ("StandardUsed", text(&mib.standard_used)),
        ("StandardsSupported", text(&mib.standards_supported)),
        ("CurrentProfile", text(&mib.current_profile)),
        ("ModulationHint", text(&mib.modulation_hint)),
        ("ModulationType", text(&mib.modulation_type)),
        ("ChannelEncapsulationType", text(&mib.channel_encapsulation_type)),
        ("DataPath", text(&mib.data_path)),
        ("LinkStatus", text(&mib.link_status)),
    ]);
    writes.push(Sample::new(Gauge::DslInfo, labels, 1.0));
}

pub(super) fn map_dsl_mib(writes: &mut WriteSet, serial: &str, mib: &DslMib) {
    let rates = [
        (UPSTREAM, "current", mib.upstream_curr_rate, "UpstreamCurrRate"),
        (DOWNSTREAM, "current", mib.downstream_curr_rate, "DownstreamCurrRate"),
        (UPSTREAM, "max", mib.upstream_max_rate, "UpstreamMaxRate"),
        (DOWNSTREAM, "max", mib.downstream_max_rate, "DownstreamMaxRate"),
    ];
    for (direction, kind, value, field) in rates {
        writes.push_value(
            Gauge::BitsPerSecond,
            keyed(serial, &[(label::DIRECTION, direction), (label::TYPE, kind)]),
            value,
            field,
        );
    }

    writes.push_value(
        Gauge::Upbokle,
        keyed(serial, &[]),
        mib.upbokle.map(Tenths),
        "UPBOKLE",
    );

    let powers = [
        (DOWNSTREAM, mib.downstream_power, "DownstreamPower"),
        (UPSTREAM, mib.upstream_power, "UpstreamPower"),
    ];
    for (direction, value, field) in powers {
        writes.push_value(
            Gauge::Power,
            keyed(serial, &[(label::DIRECTION, direction)]),
            value.map(Tenths),
            field,
        );
    }

    let margins = [
        (DOWNSTREAM, mib.downstream_noise_margin, "DownstreamNoiseMargin"),
        (UPSTREAM, mib.upstream_noise_margin, "UpstreamNoiseMargin"),
    ];
    for (direction, value, field) in margins {
        writes.push_value(
            Gauge::NoiseMargin,
            keyed(serial, &[(label::DIRECTION, direction)]),
            value.map(Tenths),
            field,
        );
    }

    let attenuations = [
        ("signal", DOWNSTREAM, mib.downstream_attenuation, "DownstreamAttenuation"),
        ("signal", UPSTREAM, mib.upstream_attenuation, "UpstreamAttenuation"),
        ("line", DOWNSTREAM, mib.downstream_line_attenuation, "DownstreamLineAttenuation"),
        ("line", UPSTREAM, mib.upstream_line_attenuation, "UpstreamLineAttenuation"),
    ];
    for (kind, direction, value, field) in attenuations {
        writes.push_value(
            Gauge::Attenuation,
            keyed(serial, &[(label::TYPE, kind), (label::DIRECTION, direction)]),
            value.map(Tenths),
            field,
        );
    }
}

pub(super) fn map_dsl_stats(writes: &mut WriteSet, serial: &str, stats: &DslStats) {
    let errors = [
        ("FEC", "ATUR", stats.fec_errors, "FECErrors"),
        ("FEC", "ATUC", stats.atuc_fec_errors, "ATUCFECErrors"),
        ("HEC", "ATUR", stats.hec_errors, "HECErrors"),
        ("HEC", "ATUC", stats.atuc_hec_errors, "ATUCHECErrors"),
        ("CRC", "ATUR", stats.crc_errors, "CRCErrors"),
        ("CRC", "ATUC", stats.atuc_crc_errors, "ATUCCRCErrors"),
    ];
    for (kind, extremity, value, field) in errors {
        writes.push_value(
            Gauge::DslErrors,
            keyed(serial, &[(label::TYPE, kind), (label::EXTREMITY, extremity)]),
            value,
            field,
        );
    }

    let errored_seconds = [
        ("severe", stats.severely_errored_secs, "SeverelyErroredSecs"),
        ("minor", stats.errored_secs, "ErroredSecs"),
    ];
    for (severity, value, field) in errored_seconds {
        writes.push_value(
            Gauge::ErroredSeconds,
            keyed(serial, &[(label::SEVERITY, severity)]),
            value,
            field,
        );
    }

    let blocks = [
        ("receive", stats.receive_blocks, "ReceiveBlocks"),
        ("transmit", stats.transmit_blocks, "TransmitBlocks"),
    ];
    for (kind, value, field) in blocks {
        writes.push_value(
            Gauge::Blocks,
            keyed(serial, &[(label::TYPE, kind)]),
            value,
            field,
        );
    }

    writes.push_value(
        Gauge::LossOfFraming,
        keyed(serial, &[]),
        stats.loss_of_framing,
        "LossOfFraming",
    );
}
