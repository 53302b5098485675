pub mod measure;
pub mod wrapper;
