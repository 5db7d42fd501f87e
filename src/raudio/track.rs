use anyhow::Result;
use hound::{Sample, SampleFormat, WavReader, WavSpec, WavWriter};
use std::{path::Path, slice::Iter};

pub trait IntoSpec {
    fn into_spec(self) -> WavSpec;
}

/// Mono 32-bit float at the given sample rate.
impl IntoSpec for u32 {
    fn into_spec(self) -> WavSpec {
        WavSpec {
            channels: 1,
            sample_rate: self,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Track<T: Sample + Copy> {
    spec: WavSpec,
    buf: Vec<T>,
}

impl<T: Sample + Copy> Track<T> {
    pub fn new(spec: WavSpec) -> Self {
        Self {
            spec,
            buf: Vec::new(),
        }
    }

    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    pub fn push(&mut self, data: T) {
        self.buf.push(data);
    }

    pub fn extend(&mut self, data: impl IntoIterator<Item = T>) {
        self.buf.extend(data);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.buf.iter()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = WavWriter::create(path, self.spec)?;

        for sample in &self.buf {
            writer.write_sample(*sample)?;
        }

        writer.finalize()?;

        Ok(())
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let reader = WavReader::open(path)?;
        let spec = reader.spec();
        let buf = reader.into_samples::<T>().collect::<Result<Vec<_>, _>>()?;
        Ok(Self { spec, buf })
    }
}

impl Track<f32> {
    /// Simulation samples as a float track. Nothing is rescaled or clipped.
    pub fn from_samples(sample_rate: u32, source: &[f64]) -> Self {
        let mut track = Self::new(sample_rate.into_spec());
        track.extend(source.iter().map(|item| *item as f32));
        track
    }
}

impl<'a, T: Sample + Copy> IntoIterator for &'a Track<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter()
    }
}
