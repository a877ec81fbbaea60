use dicom_core::Tag;
use std::collections::HashMap;
use std::fmt;

/// Opaque token used to request a single image from the external loader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ImageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A decoded image as handed back by the external loader.
///
/// The viewer treats it as an opaque value: the only capability it relies on
/// is metadata lookup by tag. Pixel data stays inside the rendering engine's
/// cache; the session lists hold shared `Rc` references to this record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    id: ImageId,
    tags: HashMap<Tag, String>,
}

impl LoadedImage {
    pub fn new(id: impl Into<ImageId>) -> Self {
        Self {
            id: id.into(),
            tags: HashMap::new(),
        }
    }

    /// Builder-style tag insertion, for engine implementations and tests.
    pub fn with_tag(mut self, tag: Tag, value: impl Into<String>) -> Self {
        self.tags.insert(tag, value.into());
        self
    }

    pub fn id(&self) -> &ImageId {
        &self.id
    }

    /// Looks up a tag as trimmed text. Absent or blank values read as `None`.
    pub fn string(&self, tag: Tag) -> Option<&str> {
        self.tags
            .get(&tag)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Looks up a tag as an integer string (DICOM IS values).
    pub fn int_string(&self, tag: Tag) -> Option<i64> {
        self.string(tag).and_then(|value| value.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tags;

    #[test]
    fn string_trims_and_filters_blank_values() {
        let image = LoadedImage::new("wadouri:1")
            .with_tag(tags::SERIES_DESCRIPTION, "  AXIAL T2  ")
            .with_tag(tags::STUDY_DESCRIPTION, "   ");

        assert_eq!(image.string(tags::SERIES_DESCRIPTION), Some("AXIAL T2"));
        assert_eq!(image.string(tags::STUDY_DESCRIPTION), None);
        assert_eq!(image.string(tags::PATIENT_NAME), None);
    }

    #[test]
    fn int_string_parses_padded_values() {
        let image = LoadedImage::new("wadouri:1")
            .with_tag(tags::INSTANCE_NUMBER, " 12 ")
            .with_tag(tags::SERIES_NUMBER, "not a number");

        assert_eq!(image.int_string(tags::INSTANCE_NUMBER), Some(12));
        assert_eq!(image.int_string(tags::SERIES_NUMBER), None);
    }
}
