//! Polycrystalline averaging of single-crystal elasticity

pub mod vrh;

pub use vrh::{average, check_density, AggregateModuli, AggregateUncertainty, VrhAverage};
