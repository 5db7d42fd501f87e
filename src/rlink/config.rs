use super::builtin::{
    BAND_PASS_ATTENUATION, BAND_PASS_PASS, BAND_PASS_RIPPLE, BAND_PASS_STOP, CARRIER_FREQUENCY,
    GUARD_LEN, LOW_PASS_ATTENUATION, LOW_PASS_PASS, LOW_PASS_RIPPLE, LOW_PASS_STOP, SAMPLE_RATE,
    SYMBOL_LEN, SYNC_FLOOR, SYNC_PROBABILITY, SYNC_WINDOW,
};
use crate::{
    rbase::{PhaseReference, SymbolMapping},
    rchannel::ChannelParams,
    rfilter::FilterTemplate,
    rmodem::{Normalization, SyncConfig},
};

#[derive(Debug, Clone, PartialEq)]
pub struct LinkConfig {
    /// Samples per bit.
    pub symbol_len: usize,
    pub sample_rate: f64,
    pub carrier_frequency: f64,
    pub mapping: SymbolMapping,
    /// Shared by the transmitter and the receiver.
    pub band_pass: FilterTemplate,
    pub low_pass: FilterTemplate,
    pub channel: ChannelParams,
    /// Silent samples on either side of the frame.
    pub guard_len: usize,
    pub sync: SyncConfig,
    pub reference: PhaseReference,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            symbol_len: SYMBOL_LEN,
            sample_rate: SAMPLE_RATE,
            carrier_frequency: CARRIER_FREQUENCY,
            mapping: SymbolMapping::default(),
            band_pass: FilterTemplate::band_pass(
                BAND_PASS_PASS,
                BAND_PASS_STOP,
                BAND_PASS_RIPPLE,
                BAND_PASS_ATTENUATION,
            ),
            low_pass: FilterTemplate::low_pass(
                LOW_PASS_PASS,
                LOW_PASS_STOP,
                LOW_PASS_RIPPLE,
                LOW_PASS_ATTENUATION,
            ),
            channel: ChannelParams::default(),
            guard_len: GUARD_LEN,
            sync: SyncConfig::new(SYNC_WINDOW, SYNC_PROBABILITY, Normalization::MeanPower)
                .with_floor(SYNC_FLOOR),
            reference: PhaseReference::Preamble,
        }
    }
}
