mod config;
mod pipeline;

pub mod builtin;

pub use config::LinkConfig;
pub use pipeline::{LinkPipeline, Transmission};

use crate::{
    rbase::BasebandError, rchannel::ChannelError, rfilter::FilterError, rmodem::ModemError,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LinkError {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Baseband(#[from] BasebandError),
    #[error(transparent)]
    Channel(#[from] ChannelError),
    #[error(transparent)]
    Modem(#[from] ModemError),
    #[error("Sync window {start}..{end} does not fit in the leading guard of {guard_len} samples")]
    InvalidSyncWindow {
        start: usize,
        end: usize,
        guard_len: usize,
    },
}
