use super::Carrier;
use crate::rfilter::{ApplyFilter, FilterSpec};
use num::complex::Complex64;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Modulator {
    carrier: Carrier,
    band_pass: Arc<FilterSpec>,
}

impl Modulator {
    pub fn new(carrier: Carrier, band_pass: Arc<FilterSpec>) -> Self {
        Self { carrier, band_pass }
    }

    pub fn carrier(&self) -> &Carrier {
        &self.carrier
    }

    pub fn band_pass(&self) -> &Arc<FilterSpec> {
        &self.band_pass
    }

    /// Mixes the baseband up to the carrier and limits it to the carrier band.
    pub fn modulate(&self, baseband: &[f64]) -> Vec<f64> {
        let mut passband = baseband
            .iter()
            .zip(self.carrier.cos(baseband.len()))
            .map(|(item, carrier)| item * carrier)
            .collect::<Vec<_>>();
        passband.apply_filter(&self.band_pass);
        passband
    }
}

/// Coherent IQ demodulator. The band pass filter is the one the transmitter uses.
#[derive(Debug, Clone)]
pub struct Demodulator {
    carrier: Carrier,
    band_pass: Arc<FilterSpec>,
    low_pass: Arc<FilterSpec>,
}

impl Demodulator {
    pub fn new(carrier: Carrier, band_pass: Arc<FilterSpec>, low_pass: Arc<FilterSpec>) -> Self {
        Self {
            carrier,
            band_pass,
            low_pass,
        }
    }

    pub fn carrier(&self) -> &Carrier {
        &self.carrier
    }

    pub fn band_pass(&self) -> &Arc<FilterSpec> {
        &self.band_pass
    }

    pub fn low_pass(&self) -> &Arc<FilterSpec> {
        &self.low_pass
    }

    pub fn demodulate(&self, received: &[f64]) -> Vec<Complex64> {
        let filtered = self.band_pass.filter(received);

        let mut in_phase = filtered
            .iter()
            .zip(self.carrier.cos(filtered.len()))
            .map(|(item, carrier)| item * carrier)
            .collect::<Vec<_>>();
        let mut quadrature = filtered
            .iter()
            .zip(self.carrier.sin(filtered.len()))
            .map(|(item, carrier)| -item * carrier)
            .collect::<Vec<_>>();
        in_phase.apply_filter(&self.low_pass);
        quadrature.apply_filter(&self.low_pass);

        in_phase
            .into_iter()
            .zip(quadrature)
            .map(|(re, im)| Complex64::new(re, im))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfilter::{FilterDesigner, FilterTemplate};

    fn modem() -> (Modulator, Demodulator) {
        let designer = FilterDesigner::new(16000.0).unwrap();
        let band_pass = designer
            .chebyshev1(&FilterTemplate::band_pass(
                (3900.0, 4100.0),
                (3850.0, 4150.0),
                3.0,
                20.0,
            ))
            .unwrap();
        let low_pass = designer
            .chebyshev1(&FilterTemplate::low_pass(100.0, 200.0, 3.0, 40.0))
            .unwrap();

        let carrier = Carrier::new(4000.0, 16000.0).unwrap();
        let band_pass = Arc::new(band_pass);
        (
            Modulator::new(carrier, band_pass.clone()),
            Demodulator::new(carrier, band_pass, Arc::new(low_pass)),
        )
    }

    #[test]
    fn test_shared_band_pass() {
        let (modulator, demodulator) = modem();
        assert!(Arc::ptr_eq(modulator.band_pass(), demodulator.band_pass()));
    }

    #[test]
    fn test_length_is_preserved() {
        let (modulator, demodulator) = modem();
        for len in [0, 1, 320, 4000] {
            let passband = modulator.modulate(&vec![1.0; len]);
            assert_eq!(passband.len(), len);
            assert_eq!(demodulator.demodulate(&passband).len(), len);
        }
    }

    #[test]
    fn test_silence() {
        let (modulator, demodulator) = modem();
        let passband = modulator.modulate(&[0.0; 1000]);
        assert!(passband.iter().all(|item| *item == 0.0));
        let baseband = demodulator.demodulate(&passband);
        assert!(baseband.iter().all(|item| item.norm() == 0.0));
    }

    #[test]
    fn test_phase_follows_symbols() {
        let (modulator, demodulator) = modem();
        let mut baseband = vec![1.0; 8000];
        baseband.extend(vec![-1.0; 8000]);

        let passband = modulator.modulate(&baseband);
        let recovered = demodulator.demodulate(&passband);

        let (positive, negative) = (recovered[7999], recovered[15999]);
        // Gain at the carrier lies between the ripple floor and unity, twice over.
        for item in [positive, negative] {
            assert!((0.4..=1.05).contains(&item.norm()), "{item}");
        }
        assert!((positive * negative.conj()).re < 0.0);
    }
}
