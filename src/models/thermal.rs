//! Spacecraft thermal models.

pub mod six_node;
