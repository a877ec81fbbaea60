pub mod image;
pub mod series;
pub mod tags;

pub use image::{ImageId, LoadedImage};
pub use series::{cmp_tag_order, group_into_series, Series};
