pub mod kernel;
pub mod normalize;
pub mod padding;
pub mod smooth;
