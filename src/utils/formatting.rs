use crate::engine::ViewportTransform;

/// Strips the `^` component separators out of a DICOM person name.
pub fn strip_name_separators(name: &str) -> String {
    name.replace('^', "")
}

/// Renders the overlay windowing string as rounded "width/center".
pub fn format_windowing(transform: &ViewportTransform) -> String {
    format!(
        "{}/{}",
        transform.voi.window_width.round() as i64,
        transform.voi.window_center.round() as i64
    )
}

/// Renders the overlay zoom string as a two-decimal scale factor.
pub fn format_zoom(transform: &ViewportTransform) -> String {
    format!("{:.2}", transform.scale)
}

/// Renders the overlay "seriesNumber/instanceNumber" pair. Absent tags
/// leave their side of the pair empty.
pub fn format_instance_pair(series_number: Option<i64>, instance_number: Option<i64>) -> String {
    let render = |value: Option<i64>| value.map(|v| v.to_string()).unwrap_or_default();
    format!("{}/{}", render(series_number), render(instance_number))
}
