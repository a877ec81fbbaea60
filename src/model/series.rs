use super::{tags, LoadedImage};
use std::cmp::Ordering;
use std::rc::Rc;

/// A grouping of loaded images sharing a series instance UID.
///
/// Created when the first image of a series arrives; grows as siblings
/// complete. The image list is kept ascending by instance number and the
/// outer series list ascending by series number regardless of arrival order.
#[derive(Debug, Clone)]
pub struct Series {
    pub study_id: String,
    pub series_id: String,
    pub series_number: Option<i64>,
    pub study_description: String,
    pub series_description: String,
    pub image_count: usize,
    pub image_list: Vec<Rc<LoadedImage>>,
}

impl Series {
    pub fn from_image(image: &Rc<LoadedImage>) -> Self {
        Self {
            study_id: tag_text(image, tags::STUDY_INSTANCE_UID),
            series_id: tag_text(image, tags::SERIES_INSTANCE_UID),
            series_number: image.int_string(tags::SERIES_NUMBER),
            study_description: tag_text(image, tags::STUDY_DESCRIPTION),
            series_description: tag_text(image, tags::SERIES_DESCRIPTION),
            image_count: 1,
            image_list: vec![Rc::clone(image)],
        }
    }

    fn push_image(&mut self, image: &Rc<LoadedImage>) {
        self.image_list.push(Rc::clone(image));
        self.image_count += 1;
        // Stable sort: equal or absent instance numbers keep arrival order.
        self.image_list.sort_by(|a, b| {
            cmp_tag_order(
                a.int_string(tags::INSTANCE_NUMBER),
                b.int_string(tags::INSTANCE_NUMBER),
            )
        });
    }
}

fn tag_text(image: &Rc<LoadedImage>, tag: dicom_core::Tag) -> String {
    image.string(tag).unwrap_or_default().to_string()
}

/// Three-way comparison over optional ordering tags. Absent values compare
/// equal, so the surrounding stable sort leaves their relative order alone.
pub fn cmp_tag_order(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    }
}

/// Folds one completed image into the series list, creating or extending the
/// matching series and re-establishing both sort invariants.
///
/// Returns the index of the touched series after any re-sort, so the caller
/// can tell whether the currently displayed series changed.
pub fn group_into_series(series_list: &mut Vec<Series>, image: &Rc<LoadedImage>) -> usize {
    let series_id = tag_text(image, tags::SERIES_INSTANCE_UID);

    match series_list.iter_mut().find(|item| item.series_id == series_id) {
        Some(series) => series.push_image(image),
        None => {
            series_list.push(Series::from_image(image));
            series_list.sort_by(|a, b| cmp_tag_order(a.series_number, b.series_number));
        }
    }

    series_list
        .iter()
        .position(|item| item.series_id == series_id)
        .unwrap_or(0)
}
