pub mod formatting;

pub use formatting::{format_instance_pair, format_windowing, format_zoom, strip_name_separators};
