pub mod emitters;
pub mod generator;
pub mod js;

pub use generator::ExpressServerGenerator;
