mod track;

pub use track::{IntoSpec, Track};
