/// Classification evaluation metrics
pub mod confusion;
