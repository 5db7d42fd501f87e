use num::complex::Complex64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    LowPass,
    BandPass,
}

/// A second-order section H(z) = (b0 + b1 z^-1 + b2 z^-2) / (1 + a1 z^-1 + a2 z^-2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    b: [f64; 3],
    a: [f64; 2],
}

impl Section {
    pub fn new(b: [f64; 3], a: [f64; 2]) -> Self {
        Self { b, a }
    }

    pub fn numerator(&self) -> &[f64; 3] {
        &self.b
    }

    pub fn denominator(&self) -> &[f64; 2] {
        &self.a
    }

    pub fn is_stable(&self) -> bool {
        self.a[1].abs() < 1.0 && self.a[0].abs() < 1.0 + self.a[1]
    }

    fn response(&self, delay: Complex64) -> Complex64 {
        let delay2 = delay * delay;
        (self.b[0] + self.b[1] * delay + self.b[2] * delay2)
            / (1.0 + self.a[0] * delay + self.a[1] * delay2)
    }

    // Direct form II transposed, zero initial state.
    fn process(&self, buf: &mut [f64]) {
        let mut state = [0f64; 2];
        for item in buf.iter_mut() {
            let input = *item;
            let output = self.b[0] * input + state[0];
            state[0] = self.b[1] * input - self.a[0] * output + state[1];
            state[1] = self.b[2] * input - self.a[1] * output;
            *item = output;
        }
    }
}

/// An immutable IIR filter design. Share it behind an `Arc` instead of designing it twice.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    order: usize,
    response: Response,
    sections: Vec<Section>,
    gain: f64,
}

impl FilterSpec {
    pub(super) fn new(order: usize, response: Response, sections: Vec<Section>, gain: f64) -> Self {
        Self {
            order,
            response,
            sections,
            gain,
        }
    }

    pub(super) fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    /// Order of the analog prototype.
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn response(&self) -> Response {
        self.response
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn is_stable(&self) -> bool {
        self.sections.iter().all(Section::is_stable)
    }

    /// Complex response at the normalized angular frequency `omega` (radians per sample).
    pub fn frequency_response(&self, omega: f64) -> Complex64 {
        let delay = Complex64::from_polar(1.0, -omega);
        self.sections
            .iter()
            .fold(Complex64::new(self.gain, 0.0), |acc, section| {
                acc * section.response(delay)
            })
    }

    pub fn magnitude_db(&self, omega: f64) -> f64 {
        20.0 * self.frequency_response(omega).norm().log10()
    }

    /// Expands the cascade into numerator and denominator polynomials in z^-1.
    pub fn transfer_function(&self) -> (Vec<f64>, Vec<f64>) {
        let (mut b, mut a) = (vec![self.gain], vec![1.0]);
        for section in self.sections.iter() {
            b = convolve(&b, &section.b);
            a = convolve(&a, &[1.0, section.a[0], section.a[1]]);
        }
        (b, a)
    }

    pub fn filter(&self, source: &[f64]) -> Vec<f64> {
        let mut buf = source.to_vec();
        buf.apply_filter(self);
        buf
    }
}

pub trait ApplyFilter
where
    Self: AsMut<[f64]>,
{
    fn apply_filter(&mut self, spec: &FilterSpec);
}

impl ApplyFilter for Vec<f64> {
    fn apply_filter(&mut self, spec: &FilterSpec) {
        self.iter_mut().for_each(|item| *item *= spec.gain);
        for section in spec.sections.iter() {
            section.process(self);
        }
    }
}

impl ApplyFilter for Box<[f64]> {
    fn apply_filter(&mut self, spec: &FilterSpec) {
        self.iter_mut().for_each(|item| *item *= spec.gain);
        for section in spec.sections.iter() {
            section.process(self);
        }
    }
}

fn convolve(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut result = vec![0f64; a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            result[i + j] += x * y;
        }
    }
    result
}
