pub mod analysis;
pub mod check;
pub mod envelope;
pub mod types;
