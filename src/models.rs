//! Public Twine models.
//!
//! Each model lives in its own module and contains an internal `core`
//! submodule where the computation and domain logic lives.
//! The [`twine_core::Model`] implementations are thin adapters that delegate
//! to the core API.

pub mod thermal;
