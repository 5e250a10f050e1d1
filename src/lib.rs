//! # Twine Satellite Thermal
//!
//! Lumped "six-node" thermal balance for small, cube-shaped satellites built
//! on [Twine](https://github.com/isentropic-dev/twine): one node per external
//! face plus a single internal thermal mass.
//!
//! The crate answers three questions about a design:
//!
//! 1. What equilibrium temperature does each external face reach, and how
//!    much heat leaks through it into (or out of) the interior?
//! 2. How large must the radiator be to hold the interior at its hot-case
//!    target, and how much heater power does the cold case need?
//! 3. How hot does the interior get during an attitude maneuver, and how long
//!    does it take to recover afterwards?
//!
//! ## Crate layout
//!
//! - [`models`]: Thermal models and their [`twine_core::Model`] adapters.
//! - [`support`]: Supporting utilities (constraints, units, radiation).
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
