//! Core record model for the annofactory intermediate representation.
//!
//! Every reader produces these records and every writer consumes them.
//! Coordinates are fractions of the image dimensions, so a record carries
//! no image size of its own.

use serde::{Deserialize, Serialize};

/// A box region in normalized top-left + width/height form.
///
/// Values are fractions of the image width/height. Nothing is clamped:
/// negative or greater-than-one values are carried through untouched so the
/// caller sees exactly what the source file contained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    /// Creates a region from its four normalized components.
    #[inline]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns true if all components are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

/// A single labelled box.
///
/// Which tag field is meaningful depends on the direction: VOC output needs
/// `tag_name`, YOLO output needs `tag_id`. Readers fill in what the source
/// format provides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Class name (e.g. "apples").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,

    /// Class index into an external class list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<u64>,

    /// Box region in normalized coordinates.
    pub region: Region,
}

impl Annotation {
    /// Creates an annotation with no tag set.
    pub fn new(region: Region) -> Self {
        Self {
            tag_name: None,
            tag_id: None,
            region,
        }
    }

    /// Sets the class name.
    pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = Some(tag_name.into());
        self
    }

    /// Sets the class index.
    pub fn with_tag_id(mut self, tag_id: u64) -> Self {
        self.tag_id = Some(tag_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_builder_pattern() {
        let annotation = Annotation::new(Region::new(0.1, 0.2, 0.3, 0.4))
            .with_tag_name("apples")
            .with_tag_id(0);

        assert_eq!(annotation.tag_name.as_deref(), Some("apples"));
        assert_eq!(annotation.tag_id, Some(0));
        assert_eq!(annotation.region.width, 0.3);
    }

    #[test]
    fn test_annotation_serializes_camel_case_and_skips_missing_tags() {
        let annotation = Annotation::new(Region::new(0.1, 0.2, 0.3, 0.4)).with_tag_id(3);
        let json = serde_json::to_value(&annotation).expect("serialize annotation");

        assert_eq!(json["tagId"], 3);
        assert!(json.get("tagName").is_none());
        assert_eq!(json["region"]["left"], 0.1);
    }

    #[test]
    fn test_region_is_finite() {
        assert!(Region::new(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!Region::new(f64::NAN, 0.0, 1.0, 1.0).is_finite());
        assert!(!Region::new(0.0, 0.0, f64::INFINITY, 1.0).is_finite());
    }
}
