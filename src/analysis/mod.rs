pub mod activity;
pub mod consistency;
pub mod heatmap;

pub use consistency::analyze;
