mod generator;
mod samples;

pub use generator::{DataGenerator, Domain, Noise};
pub use samples::SampleSet;
