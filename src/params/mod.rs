//! JSON parameter-file collaborator.
//!
//! Parses the input document (`names` plus the four constraint fields)
//! and hands it to the constraint model. Shape handling lives here;
//! semantic validation lives in [`crate::model`].

mod loader;
mod types;

pub use loader::load_params;
pub use types::{NameOrList, PairingParams, ParamsError};
