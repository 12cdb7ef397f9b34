/// Dataset container and data manipulation utilities
pub mod dataset;
