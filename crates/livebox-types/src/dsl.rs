//! DSL facets (`NeMo.Intf.dsl0:getDSLStats` and the `dsl0` entry of `getMIBs`)
//!
//! Decibel-scaled MIB fields are reported in tenths of a decibel and may be
//! negative (power, upstream margins on long lines), hence `i64`.

use serde::{Deserialize, Serialize};

/// DSL error and block counters
///
/// Unprefixed error fields count errors seen by the local modem (ATUR);
/// `ATUC`-prefixed fields are the central-office side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DslStats {
    pub receive_blocks: Option<u64>,
    pub transmit_blocks: Option<u64>,
    pub cell_delin: Option<u64>,
    pub link_retrain: Option<u64>,
    pub init_errors: Option<u64>,
    pub init_timeouts: Option<u64>,
    pub loss_of_framing: Option<u64>,
    pub errored_secs: Option<u64>,
    pub severely_errored_secs: Option<u64>,

    #[serde(rename = "FECErrors")]
    pub fec_errors: Option<u64>,
    #[serde(rename = "ATUCFECErrors")]
    pub atuc_fec_errors: Option<u64>,
    #[serde(rename = "HECErrors")]
    pub hec_errors: Option<u64>,
    #[serde(rename = "ATUCHECErrors")]
    pub atuc_hec_errors: Option<u64>,
    #[serde(rename = "CRCErrors")]
    pub crc_errors: Option<u64>,
    #[serde(rename = "ATUCCRCErrors")]
    pub atuc_crc_errors: Option<u64>,
}

/// DSL line characteristics of the `dsl0` interface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DslMib {
    pub link_status: Option<String>,
    pub standard_used: Option<String>,
    pub standards_supported: Option<String>,
    pub current_profile: Option<String>,
    pub modulation_type: Option<String>,
    pub modulation_hint: Option<String>,
    pub channel_encapsulation_type: Option<String>,
    pub data_path: Option<String>,
    pub interleave_depth: Option<i64>,

    /// Bits per second
    pub upstream_curr_rate: Option<u64>,
    pub downstream_curr_rate: Option<u64>,
    pub upstream_max_rate: Option<u64>,
    pub downstream_max_rate: Option<u64>,

    /// Tenths of a decibel
    pub upstream_noise_margin: Option<i64>,
    pub downstream_noise_margin: Option<i64>,
    pub upstream_attenuation: Option<i64>,
    pub downstream_attenuation: Option<i64>,
    pub upstream_line_attenuation: Option<i64>,
    pub downstream_line_attenuation: Option<i64>,

    /// Tenths of a dBm
    pub upstream_power: Option<i64>,
    pub downstream_power: Option<i64>,

    #[serde(rename = "UPBOKLE")]
    pub upbokle: Option<i64>,
}
