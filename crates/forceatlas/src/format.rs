//! On-disk formats exchanged with the engine.
//!
//! - [`network`] - the Pajek graph file the engine reads as `--input`
//! - [`positions`] - the optional initial coordinates passed as `--coords`
//! - [`coordinates`] - the coordinate table the engine writes to `<output>.txt`
//!
//! Every format works in index space; translating labels is the caller's job.

pub mod coordinates;
pub mod network;
pub mod positions;
