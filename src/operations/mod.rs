pub mod clip;
pub mod fitting;
pub mod normalize;
pub mod query;
pub mod transform;
