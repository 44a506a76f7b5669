pub mod banner;
pub mod cards;
pub mod grade;
pub mod header;
pub mod heatmap;
pub mod monthly;
pub mod statusbar;
pub mod weekly;
