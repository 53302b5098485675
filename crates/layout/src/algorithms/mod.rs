pub mod overflow;
pub mod space;
