pub mod measure;
pub mod sample;
