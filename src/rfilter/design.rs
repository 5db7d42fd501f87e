use super::{
    builtin::{MAX_ORDER, POLE_TOLERANCE},
    FilterError, FilterSpec, Response, Section,
};
use num::complex::Complex64;
use std::f64::consts::PI;

/// Band edges in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    LowPass { pass: f64, stop: f64 },
    BandPass { pass: (f64, f64), stop: (f64, f64) },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterTemplate {
    pub band: Band,
    /// Maximum pass band ripple in dB.
    pub pass_ripple: f64,
    /// Minimum stop band attenuation in dB.
    pub stop_attenuation: f64,
}

impl FilterTemplate {
    pub fn low_pass(pass: f64, stop: f64, pass_ripple: f64, stop_attenuation: f64) -> Self {
        Self {
            band: Band::LowPass { pass, stop },
            pass_ripple,
            stop_attenuation,
        }
    }

    pub fn band_pass(
        pass: (f64, f64),
        stop: (f64, f64),
        pass_ripple: f64,
        stop_attenuation: f64,
    ) -> Self {
        Self {
            band: Band::BandPass { pass, stop },
            pass_ripple,
            stop_attenuation,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FilterDesigner {
    sample_rate: f64,
}

impl FilterDesigner {
    pub fn new(sample_rate: f64) -> Result<Self, FilterError> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(FilterError::InvalidSampleRate(sample_rate));
        }
        Ok(Self { sample_rate })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Minimal Chebyshev Type I order meeting the template.
    pub fn chebyshev1_order(&self, template: &FilterTemplate) -> Result<usize, FilterError> {
        self.validate(template)?;
        let ratio = match template.band {
            Band::LowPass { pass, stop } => self.prewarp(stop) / self.prewarp(pass),
            Band::BandPass { pass, stop } => {
                let (low, high) = (self.prewarp(pass.0), self.prewarp(pass.1));
                [self.prewarp(stop.0), self.prewarp(stop.1)]
                    .into_iter()
                    .map(|edge| ((edge * edge - low * high) / (edge * (low - high))).abs())
                    .fold(f64::INFINITY, f64::min)
            }
        };
        if !(ratio > 1.0) {
            return Err(FilterError::Infeasible(usize::MAX));
        }

        let stop = 10f64.powf(template.stop_attenuation / 10.0) - 1.0;
        let pass = 10f64.powf(template.pass_ripple / 10.0) - 1.0;
        let order = ((stop / pass).sqrt().acosh() / ratio.acosh()).ceil();
        if !order.is_finite() || order > MAX_ORDER as f64 {
            let order = if order.is_finite() { order as usize } else { usize::MAX };
            return Err(FilterError::Infeasible(order));
        }
        Ok((order as usize).max(1))
    }

    pub fn chebyshev1(&self, template: &FilterTemplate) -> Result<FilterSpec, FilterError> {
        let order = self.chebyshev1_order(template)?;
        let poles = prototype_poles(order, template.pass_ripple);

        let (response, sections, reference) = match template.band {
            Band::LowPass { pass, .. } => {
                let cutoff = self.prewarp(pass);
                (Response::LowPass, low_pass_sections(&poles, cutoff), 0.0)
            }
            Band::BandPass { pass, .. } => {
                let (low, high) = (self.prewarp(pass.0), self.prewarp(pass.1));
                let center = (low * high).sqrt();
                let sections = band_pass_sections(&poles, high - low, center)
                    .ok_or(FilterError::Unstable(order))?;
                (Response::BandPass, sections, 2.0 * center.atan())
            }
        };

        // Even orders start the ripple at the bottom of the pass band.
        let target = if order % 2 == 1 {
            1.0
        } else {
            10f64.powf(-template.pass_ripple / 20.0)
        };
        let unit = FilterSpec::new(order, response, sections, 1.0);
        let magnitude = unit.frequency_response(reference).norm();
        if !(magnitude.is_finite() && magnitude > 0.0) {
            return Err(FilterError::Unstable(order));
        }

        let spec = FilterSpec::new(order, response, unit.into_sections(), target / magnitude);
        if !spec.is_stable() {
            return Err(FilterError::Unstable(order));
        }
        Ok(spec)
    }

    fn prewarp(&self, frequency: f64) -> f64 {
        (PI * frequency / self.sample_rate).tan()
    }

    fn validate(&self, template: &FilterTemplate) -> Result<(), FilterError> {
        let nyquist = self.sample_rate / 2.0;
        let inside = |edges: &[f64]| {
            edges.iter().all(|edge| edge.is_finite() && *edge > 0.0 && *edge < nyquist)
        };
        let valid = match template.band {
            Band::LowPass { pass, stop } => inside(&[pass, stop]) && pass < stop,
            Band::BandPass { pass, stop } => {
                inside(&[pass.0, pass.1, stop.0, stop.1])
                    && stop.0 < pass.0
                    && pass.0 < pass.1
                    && pass.1 < stop.1
            }
        };
        if !valid {
            return Err(FilterError::InvalidBand(template.band));
        }

        let FilterTemplate {
            pass_ripple,
            stop_attenuation,
            ..
        } = *template;
        if !(pass_ripple.is_finite()
            && stop_attenuation.is_finite()
            && pass_ripple > 0.0
            && stop_attenuation > pass_ripple)
        {
            return Err(FilterError::InvalidTolerance {
                pass_ripple,
                stop_attenuation,
            });
        }
        Ok(())
    }
}

fn prototype_poles(order: usize, pass_ripple: f64) -> Vec<Complex64> {
    let epsilon = (10f64.powf(pass_ripple / 10.0) - 1.0).sqrt();
    let mu = (1.0 / epsilon).asinh() / order as f64;
    (0..order)
        .map(|k| {
            let theta = PI * (2 * k + 1) as f64 / (2 * order) as f64;
            Complex64::new(-mu.sinh() * theta.sin(), mu.cosh() * theta.cos())
        })
        .collect()
}

fn bilinear(pole: Complex64) -> Complex64 {
    (1.0 + pole) / (1.0 - pole)
}

fn low_pass_sections(poles: &[Complex64], cutoff: f64) -> Vec<Section> {
    poles
        .iter()
        .filter(|pole| pole.im >= -POLE_TOLERANCE)
        .map(|pole| {
            let z = bilinear(*pole * cutoff);
            if pole.im <= POLE_TOLERANCE {
                Section::new([1.0, 1.0, 0.0], [-z.re, 0.0])
            } else {
                Section::new([1.0, 2.0, 1.0], [-2.0 * z.re, z.norm_sqr()])
            }
        })
        .collect()
}

fn band_pass_sections(poles: &[Complex64], bandwidth: f64, center: f64) -> Option<Vec<Section>> {
    let mut sections = vec![];
    let mut real = vec![];
    for pole in poles {
        let scaled = *pole * bandwidth / 2.0;
        let offset = (scaled * scaled - center * center).sqrt();
        for analog in [scaled + offset, scaled - offset] {
            let z = bilinear(analog);
            if analog.im > POLE_TOLERANCE {
                sections.push(Section::new([1.0, 0.0, -1.0], [-2.0 * z.re, z.norm_sqr()]));
            } else if analog.im.abs() <= POLE_TOLERANCE {
                real.push(z.re);
            }
        }
    }

    let pairs = real.chunks_exact(2);
    if !pairs.remainder().is_empty() {
        return None;
    }
    for pair in pairs {
        sections.push(Section::new(
            [1.0, 0.0, -1.0],
            [-(pair[0] + pair[1]), pair[0] * pair[1]],
        ));
    }
    Some(sections)
}
