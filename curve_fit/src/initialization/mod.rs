mod coeff_gen;
mod constant;
mod random;

pub use coeff_gen::CoeffGen;
pub use constant::ConstCoeffGen;
pub use random::RandCoeffGen;
