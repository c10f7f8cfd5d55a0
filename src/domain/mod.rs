// Domain layer - Asset records and pure dashboard rules
pub mod asset;
pub mod chart;
pub mod error;
pub mod layout;
