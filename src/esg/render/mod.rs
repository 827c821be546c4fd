pub mod chart;
pub mod view;
