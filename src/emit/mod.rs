//! Sealed per-participant artifacts.
//!
//! Each participant gets one archive named after them; opening it reveals
//! a single text payload naming only their assigned counterpart. Payloads
//! are padded to a uniform length so file size gives nothing away.

mod archive;

pub use archive::{write_artifacts, EmitConfig, EmitError};
