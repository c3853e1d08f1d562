pub mod charts;
pub mod dashboard;
pub mod data_source;
