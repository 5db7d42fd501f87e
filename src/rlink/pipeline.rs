use super::{LinkConfig, LinkError};
use crate::{
    rbase::{decode_bits_to_text, encode_text_to_bits, BasebandDecoder, BasebandEncoder},
    rchannel::{ChannelSimulator, ChannelState},
    rfilter::{FilterDesigner, FilterSpec},
    rmodem::{signal, Carrier, Demodulator, Modulator, Synchronization, SynchronizationDetector},
};
use bitvec::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::sync::Arc;

/// Everything one round trip through the link produced.
#[derive(Debug, Clone)]
pub struct Transmission {
    pub bits: BitVec,
    pub text: String,
    pub channel: ChannelState,
    pub sync: Synchronization,
    pub passband: Vec<f64>,
    pub received: Vec<f64>,
}

pub struct LinkPipeline<R: Rng = SmallRng> {
    config: LinkConfig,
    encoder: BasebandEncoder,
    modulator: Modulator,
    channel: ChannelSimulator<R>,
    demodulator: Demodulator,
    detector: SynchronizationDetector,
    decoder: BasebandDecoder,
}

impl LinkPipeline<SmallRng> {
    pub fn new(config: LinkConfig) -> Result<Self, LinkError> {
        Self::with_rng(config, SmallRng::from_entropy())
    }
}

impl<R: Rng> LinkPipeline<R> {
    /// Designs the filters and checks the whole configuration once.
    pub fn with_rng(config: LinkConfig, rng: R) -> Result<Self, LinkError> {
        let window = &config.sync.window;
        if window.start >= window.end || window.end > config.guard_len {
            return Err(LinkError::InvalidSyncWindow {
                start: window.start,
                end: window.end,
                guard_len: config.guard_len,
            });
        }

        let designer = FilterDesigner::new(config.sample_rate)?;
        let band_pass = Arc::new(designer.chebyshev1(&config.band_pass)?);
        let low_pass = Arc::new(designer.chebyshev1(&config.low_pass)?);
        log::debug!(
            "Designed band pass of order {} and low pass of order {}",
            band_pass.order(),
            low_pass.order()
        );

        let carrier = Carrier::new(config.carrier_frequency, config.sample_rate)?;
        let encoder = BasebandEncoder::new(config.symbol_len, config.mapping)?;
        let decoder = BasebandDecoder::new(config.symbol_len, config.mapping)?
            .with_reference(config.reference);
        let channel = ChannelSimulator::new(config.channel, config.sample_rate, rng)?;

        Ok(Self {
            modulator: Modulator::new(carrier, band_pass.clone()),
            demodulator: Demodulator::new(carrier, band_pass, low_pass),
            detector: SynchronizationDetector::new(config.sync.clone()),
            encoder,
            decoder,
            channel,
            config,
        })
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn band_pass(&self) -> &Arc<FilterSpec> {
        self.modulator.band_pass()
    }

    pub fn low_pass(&self) -> &Arc<FilterSpec> {
        self.demodulator.low_pass()
    }

    pub fn modulator(&self) -> &Modulator {
        &self.modulator
    }

    pub fn demodulator(&self) -> &Demodulator {
        &self.demodulator
    }

    pub fn run_transmission(&mut self, bits: &BitSlice) -> Transmission {
        let guard = self.config.guard_len;
        let mut baseband = vec![0f64; guard];
        baseband.extend(self.encoder.encode(bits));
        baseband.extend(vec![0f64; guard]);

        let passband = self.modulator.modulate(&baseband);
        let (received, channel) = self.channel.transmit(&passband);
        log::debug!(
            "Channel drew distance {:.3} m, delay {} samples, attenuation {:.4}",
            channel.distance,
            channel.delay,
            channel.attenuation
        );

        let recovered = self.demodulator.demodulate(&received);
        let sync = self.detector.detect(&signal::magnitude(&recovered));
        if sync.reliable {
            log::debug!("Frame detected at sample {}", sync.index);
        } else {
            log::warn!(
                "No frame detected, decoding from the strongest sample {}",
                sync.index
            );
        }

        let bits = self.decoder.decode(&recovered, sync.index, Some(bits.len()));
        let text = decode_bits_to_text(&bits);
        Transmission {
            bits,
            text,
            channel,
            sync,
            passband,
            received,
        }
    }

    pub fn send_text(&mut self, text: &str) -> Transmission {
        self.run_transmission(&encode_text_to_bits(text))
    }
}
