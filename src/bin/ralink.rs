use anyhow::Result;
use bitvec::prelude::*;
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use ralink::{
    raudio::Track,
    rbase::{encode_text_to_bits, parse_bit_literal, PhaseReference, SymbolMapping},
    rchannel::Interference,
    rfilter::FilterTemplate,
    rlink::{
        builtin::{
            BAND_PASS_ATTENUATION, BAND_PASS_PASS, BAND_PASS_RIPPLE, BAND_PASS_STOP, DEFAULT_TEXT,
            LOW_PASS_ATTENUATION, LOW_PASS_PASS, LOW_PASS_RIPPLE, LOW_PASS_STOP,
        },
        LinkConfig, LinkPipeline,
    },
    rmodem::Normalization,
};
use serde::Deserialize;
use std::{fs, path::PathBuf};

#[derive(Parser, Debug)]
#[clap(name = "ralink", version = "0.1.0", author = "Rathernet")]
#[clap(about = "Send a message through a simulated acoustic link.", long_about = None)]
struct RalinkCli {
    /// The text to send.
    text: Option<String>,
    /// Sends a payload of 1s and 0s instead of text.
    #[clap(short, long, conflicts_with = "text")]
    bits: Option<String>,
    /// The path to the link configuration file.
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// The number of times the payload is sent.
    #[clap(short, long, default_value = "1")]
    trials: usize,
    /// The seed of the channel. Drawn from the system if not specified.
    #[clap(short, long)]
    seed: Option<u64>,
    /// The directory to write the passband and received signals of the last trial to.
    #[clap(short, long)]
    dump: Option<PathBuf>,
}

#[derive(Clone, Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct RalinkConfig {
    symbol_len: Option<usize>,
    sample_rate: Option<f64>,
    carrier: Option<f64>,
    mapping: Option<(f64, f64)>,
    guard: Option<usize>,
    reference: Option<RalinkReference>,
    band_pass: Option<RalinkBandPassConfig>,
    low_pass: Option<RalinkLowPassConfig>,
    channel: Option<RalinkChannelConfig>,
    sync: Option<RalinkSyncConfig>,
}

#[derive(Clone, Copy, Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
enum RalinkReference {
    Absolute,
    Preamble,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RalinkBandPassConfig {
    pass: Option<(f64, f64)>,
    stop: Option<(f64, f64)>,
    ripple: Option<f64>,
    attenuation: Option<f64>,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RalinkLowPassConfig {
    pass: Option<f64>,
    stop: Option<f64>,
    ripple: Option<f64>,
    attenuation: Option<f64>,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RalinkChannelConfig {
    noise_variance: Option<f64>,
    max_distance: Option<f64>,
    interference: Option<RalinkToneConfig>,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RalinkToneConfig {
    frequency: f64,
    amplitude: f64,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RalinkSyncConfig {
    window: Option<(usize, usize)>,
    probability: Option<f64>,
    normalization: Option<RalinkNormalization>,
    floor: Option<f64>,
}

#[derive(Clone, Copy, Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
enum RalinkNormalization {
    MagnitudeVariance,
    MeanPower,
}

fn load_config(path: Option<PathBuf>) -> Result<LinkConfig> {
    let config = match path {
        Some(path) => {
            let config = fs::read_to_string(path)?;
            toml::from_str::<RalinkConfig>(&config)?
        }
        None => RalinkConfig::default(),
    };
    Ok(translate_config(config))
}

fn translate_config(config: RalinkConfig) -> LinkConfig {
    let mut link = LinkConfig::default();
    link.symbol_len = config.symbol_len.unwrap_or(link.symbol_len);
    link.sample_rate = config.sample_rate.unwrap_or(link.sample_rate);
    link.carrier_frequency = config.carrier.unwrap_or(link.carrier_frequency);
    link.guard_len = config.guard.unwrap_or(link.guard_len);
    if let Some((zero, one)) = config.mapping {
        link.mapping = SymbolMapping::new(zero, one);
    }
    if let Some(reference) = config.reference {
        link.reference = match reference {
            RalinkReference::Absolute => PhaseReference::Absolute,
            RalinkReference::Preamble => PhaseReference::Preamble,
        };
    }

    if let Some(band_pass) = config.band_pass {
        link.band_pass = translate_band_pass(band_pass);
    }
    if let Some(low_pass) = config.low_pass {
        link.low_pass = translate_low_pass(low_pass);
    }

    if let Some(channel) = config.channel {
        link.channel.noise_variance = channel.noise_variance.unwrap_or(link.channel.noise_variance);
        link.channel.max_distance = channel.max_distance.unwrap_or(link.channel.max_distance);
        if let Some(tone) = channel.interference {
            link.channel.interference = Interference::Tone {
                frequency: tone.frequency,
                amplitude: tone.amplitude,
            };
        }
    }

    if let Some(sync) = config.sync {
        if let Some((start, end)) = sync.window {
            link.sync.window = start..end;
        }
        link.sync.probability = sync.probability.unwrap_or(link.sync.probability);
        link.sync.floor = sync.floor.unwrap_or(link.sync.floor);
        if let Some(normalization) = sync.normalization {
            link.sync.normalization = match normalization {
                RalinkNormalization::MagnitudeVariance => Normalization::MagnitudeVariance,
                RalinkNormalization::MeanPower => Normalization::MeanPower,
            };
        }
    }

    link
}

fn translate_band_pass(config: RalinkBandPassConfig) -> FilterTemplate {
    FilterTemplate::band_pass(
        config.pass.unwrap_or(BAND_PASS_PASS),
        config.stop.unwrap_or(BAND_PASS_STOP),
        config.ripple.unwrap_or(BAND_PASS_RIPPLE),
        config.attenuation.unwrap_or(BAND_PASS_ATTENUATION),
    )
}

fn translate_low_pass(config: RalinkLowPassConfig) -> FilterTemplate {
    FilterTemplate::low_pass(
        config.pass.unwrap_or(LOW_PASS_PASS),
        config.stop.unwrap_or(LOW_PASS_STOP),
        config.ripple.unwrap_or(LOW_PASS_RIPPLE),
        config.attenuation.unwrap_or(LOW_PASS_ATTENUATION),
    )
}

enum Payload {
    Text(String),
    Bits(BitVec),
}

impl Payload {
    fn bits(&self) -> BitVec {
        match self {
            Payload::Text(text) => encode_text_to_bits(text),
            Payload::Bits(bits) => bits.clone(),
        }
    }
}

fn load_payload(text: Option<String>, bits: Option<String>) -> Payload {
    match (text, bits) {
        (Some(text), _) => Payload::Text(text),
        (None, Some(bits)) => match parse_bit_literal(&bits) {
            Ok(bits) => Payload::Bits(bits),
            Err(err) => {
                eprintln!("Warning: {err}, using defaults.");
                Payload::Text(DEFAULT_TEXT.to_string())
            }
        },
        (None, None) => {
            eprintln!("Warning: No input arguments, using defaults.");
            Payload::Text(DEFAULT_TEXT.to_string())
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = RalinkCli::parse();

    let config = load_config(cli.config)?;
    let sample_rate = config.sample_rate;
    let rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let mut pipeline = LinkPipeline::with_rng(config, rng)?;

    let payload = load_payload(cli.text, cli.bits);
    let bits = payload.bits();

    let mut succeeded = 0;
    let mut last = None;
    for _ in 0..cli.trials {
        let transmission = pipeline.run_transmission(&bits);
        println!("Received: {}", transmission.text);
        if transmission.bits == bits {
            succeeded += 1;
        }
        last = Some(transmission);
    }
    if cli.trials > 1 {
        println!("Succeeded in {succeeded} of {} trials.", cli.trials);
    }

    if let (Some(dump), Some(transmission)) = (cli.dump, last) {
        fs::create_dir_all(&dump)?;
        let sample_rate = sample_rate.round() as u32;
        Track::from_samples(sample_rate, &transmission.passband).save_as(dump.join("passband.wav"))?;
        Track::from_samples(sample_rate, &transmission.received).save_as(dump.join("received.wav"))?;
    }

    Ok(())
}
