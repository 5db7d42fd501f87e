use num::complex::Complex64;

pub trait ArgMax
where
    Self: AsRef<[f64]>,
{
    fn argmax(&self) -> (usize, f64);
}

// The first maximum wins. NaNs never do.
fn argmax(source: &[f64]) -> (usize, f64) {
    let (mut index, mut max) = (0, f64::NEG_INFINITY);
    for (i, item) in source.iter().enumerate() {
        if *item > max {
            (index, max) = (i, *item);
        }
    }
    (index, max)
}

impl ArgMax for [f64] {
    fn argmax(&self) -> (usize, f64) {
        argmax(self)
    }
}

impl ArgMax for Box<[f64]> {
    fn argmax(&self) -> (usize, f64) {
        argmax(self)
    }
}

impl ArgMax for Vec<f64> {
    fn argmax(&self) -> (usize, f64) {
        argmax(self)
    }
}

pub fn magnitude(source: &[Complex64]) -> Vec<f64> {
    source.iter().map(|item| item.norm()).collect()
}

pub fn mean(source: &[f64]) -> f64 {
    source.iter().sum::<f64>() / source.len() as f64
}

/// Population variance. NaN for an empty slice.
pub fn variance(source: &[f64]) -> f64 {
    let mean = mean(source);
    source
        .iter()
        .fold(0., |acc, item| acc + (item - mean) * (item - mean))
        / source.len() as f64
}

/// Cumulative distribution function of the chi-square distribution with two degrees of freedom.
pub fn chi_square_cdf(value: f64) -> f64 {
    if value <= 0.0 {
        0.0
    } else {
        1.0 - (-value / 2.0).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax() {
        assert_eq!(vec![0.5, 2.0, -1.0, 2.0].argmax(), (1, 2.0));
        assert_eq!(vec![-3.0, -1.0, -2.0].argmax(), (1, -1.0));
        assert_eq!(vec![f64::NAN, 1.0].argmax(), (1, 1.0));

        let boxed: Box<[f64]> = vec![1.0, 4.0, 3.0].into();
        assert_eq!(boxed.argmax(), (1, 4.0));
        assert_eq!(Vec::<f64>::new().argmax().0, 0);

        let slice: &[f64] = &[0.1, 0.3, 0.2];
        assert_eq!(slice.argmax(), (1, 0.3));
    }

    #[test]
    fn test_moments() {
        let source = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(mean(&source), 2.5);
        assert_eq!(variance(&source), 1.25);
        assert_eq!(variance(&[2.0; 16]), 0.0);
        assert!(variance(&[]).is_nan());
    }

    #[test]
    fn test_magnitude() {
        let source = [Complex64::new(3.0, 4.0), Complex64::new(0.0, -2.0)];
        assert_eq!(magnitude(&source), vec![5.0, 2.0]);
    }

    #[test]
    fn test_chi_square_cdf() {
        assert_eq!(chi_square_cdf(0.0), 0.0);
        assert_eq!(chi_square_cdf(-1.0), 0.0);
        assert!((chi_square_cdf(2.0) - (1.0 - (-1f64).exp())).abs() < 1e-15);
        assert_eq!(chi_square_cdf(f64::INFINITY), 1.0);
        assert!(chi_square_cdf(f64::NAN).is_nan());

        // Quantile 0.99 of chi-square(2) is 2 ln 100.
        let quantile = 2.0 * 100f64.ln();
        assert!((chi_square_cdf(quantile) - 0.99).abs() < 1e-12);
    }
}
