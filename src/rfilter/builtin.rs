//! # Rathernet Filters
//! Chebyshev Type I designs are bilinear transforms of the analog prototype, stored as cascaded
//! second-order sections. A band-pass design of order N has N sections, a low-pass design has
//! ceil(N / 2).

pub const MAX_ORDER: usize = 24;
pub const POLE_TOLERANCE: f64 = 1e-12;
