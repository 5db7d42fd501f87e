use super::{builtin::CARRIER_AMPLITUDE, ModemError};
use std::f64::consts::PI;

/// A sampled sinusoid of angular frequency `omega` radians per sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Carrier {
    omega: f64,
    amplitude: f64,
}

impl Carrier {
    pub fn new(frequency: f64, sample_rate: f64) -> Result<Self, ModemError> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(ModemError::InvalidSampleRate(sample_rate));
        }
        if !(frequency.is_finite() && frequency > 0.0 && frequency < sample_rate / 2.0) {
            return Err(ModemError::InvalidCarrier {
                frequency,
                sample_rate,
            });
        }
        Ok(Self::from_omega(2.0 * PI * frequency / sample_rate))
    }

    pub fn from_omega(omega: f64) -> Self {
        Self {
            omega,
            amplitude: CARRIER_AMPLITUDE,
        }
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn cos(&self, len: usize) -> Vec<f64> {
        (0..len)
            .map(|k| self.amplitude * (self.omega * k as f64).cos())
            .collect()
    }

    pub fn sin(&self, len: usize) -> Vec<f64> {
        (0..len)
            .map(|k| self.amplitude * (self.omega * k as f64).sin())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    #[test]
    fn test_quarter_rate_carrier() {
        let carrier = Carrier::new(4000.0, 16000.0).unwrap();
        assert!((carrier.omega() - PI / 2.0).abs() < 1e-15);

        let expected_cos = [SQRT_2, 0.0, -SQRT_2, 0.0, SQRT_2];
        let expected_sin = [0.0, SQRT_2, 0.0, -SQRT_2, 0.0];
        for (value, expected) in carrier.cos(5).iter().zip(expected_cos) {
            assert!((value - expected).abs() < 1e-12);
        }
        for (value, expected) in carrier.sin(5).iter().zip(expected_sin) {
            assert!((value - expected).abs() < 1e-12);
        }
        assert!(carrier.cos(0).is_empty());
    }

    #[test]
    fn test_unit_power() {
        let carrier = Carrier::new(1000.0, 16000.0).unwrap();
        let power = carrier.cos(1600).iter().map(|x| x * x).sum::<f64>() / 1600.0;
        assert!((power - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_carrier() {
        assert_eq!(
            Carrier::new(8000.0, 16000.0),
            Err(ModemError::InvalidCarrier {
                frequency: 8000.0,
                sample_rate: 16000.0
            })
        );
        assert!(Carrier::new(0.0, 16000.0).is_err());
        assert_eq!(
            Carrier::new(4000.0, -1.0),
            Err(ModemError::InvalidSampleRate(-1.0))
        );
    }
}
