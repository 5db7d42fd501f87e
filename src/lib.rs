pub mod raudio;
pub mod rbase;
pub mod rchannel;
pub mod rfilter;
pub mod rlink;
pub mod rmodem;
