//! API handlers module

pub mod datasets;
pub mod extract;
pub mod health;
