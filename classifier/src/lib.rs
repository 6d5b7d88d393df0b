pub mod error;
pub mod labels;
pub mod model;
pub mod preprocess;
pub mod ranking;

use ndarray::Array4;

pub type Array4F = Array4<f32>;
