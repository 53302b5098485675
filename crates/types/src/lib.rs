pub mod geometry;
pub mod ids;
pub mod units;

pub use geometry::{Rect, Size};
pub use ids::{BlockId, ContainerId, RegionId};
pub use units::{mm_to_px, pt_to_px, px_to_mm, round6};
