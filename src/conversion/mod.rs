//! Conversion from on-disk formats into normalized annotation records.
//!
//! [`AnnotationConverter`] turns one parsed VOC object or one YOLO label
//! line into an [`Annotation`]. The `convert_*_from_path` functions wrap it
//! with file reading and preserve source order.

use std::path::Path;

use crate::error::AnnofactoryError;
use crate::ir::io_voc_xml::{self, VocObject};
use crate::ir::io_yolo::{self, ClassList, YoloRow};
use crate::ir::{Annotation, CornerConvention, ImageSize, Region};

/// Converts VOC objects and YOLO label lines into normalized records.
#[derive(Clone, Debug, Default)]
pub struct AnnotationConverter {
    classes: Option<ClassList>,
    convention: CornerConvention,
}

impl AnnotationConverter {
    /// Creates a converter with no class list and the default corner
    /// convention.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves YOLO class indices against `classes`.
    pub fn with_classes(mut self, classes: ClassList) -> Self {
        self.classes = Some(classes);
        self
    }

    /// Uses `convention` when mapping VOC corners onto regions.
    pub fn with_convention(mut self, convention: CornerConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn classes(&self) -> Option<&ClassList> {
        self.classes.as_ref()
    }

    pub fn convention(&self) -> CornerConvention {
        self.convention
    }

    /// Converts one VOC object from an image of the given size.
    ///
    /// The result has `tag_name` set and no `tag_id`.
    pub fn convert_voc(&self, object: &VocObject, size: ImageSize) -> Annotation {
        let region = Region::from_corners(object.bndbox, size, self.convention);
        if !region.is_finite() {
            log::warn!(
                "voc object '{}' has a non-finite region; image size is {}x{}",
                object.name,
                size.width,
                size.height
            );
        }
        log::trace!("voc object '{}' -> {:?}", object.name, region);
        Annotation::new(region).with_tag_name(object.name.clone())
    }

    /// Converts one parsed YOLO row.
    ///
    /// `tag_id` is always the row's class index. `tag_name` is resolved only
    /// when a class list is configured; an index past its end fails with
    /// [`AnnofactoryError::ClassIndexOutOfRange`].
    pub fn convert_yolo_row(
        &self,
        row: &YoloRow,
        path: &Path,
        line_num: usize,
    ) -> Result<Annotation, AnnofactoryError> {
        let mut annotation = Annotation::new(Region::from_center(row.bbox)).with_tag_id(row.class_id);

        if let Some(classes) = &self.classes {
            let name =
                classes
                    .get(row.class_id)
                    .ok_or_else(|| AnnofactoryError::ClassIndexOutOfRange {
                        path: path.to_path_buf(),
                        line: line_num,
                        index: usize::try_from(row.class_id).unwrap_or(usize::MAX),
                        len: classes.len(),
                    })?;
            if name.is_empty() {
                log::warn!(
                    "class index {} in {} line {} resolves to an empty name",
                    row.class_id,
                    path.display(),
                    line_num
                );
            }
            annotation.tag_name = Some(name.to_string());
        }

        log::trace!("yolo line {} -> {:?}", line_num, annotation.region);
        Ok(annotation)
    }

    /// Converts one YOLO label line. Blank lines yield `Ok(None)`.
    pub fn convert_yolo(
        &self,
        line: &str,
        path: &Path,
        line_num: usize,
    ) -> Result<Option<Annotation>, AnnofactoryError> {
        io_yolo::parse_label_line(line, path, line_num)?
            .map(|row| self.convert_yolo_row(&row, path, line_num))
            .transpose()
    }

    /// Converts YOLO label text, line by line.
    pub fn convert_yolo_str(
        &self,
        text: &str,
        path: &Path,
    ) -> Result<Vec<Annotation>, AnnofactoryError> {
        io_yolo::label_rows(text, path)
            .map(|row| {
                let (line_num, row) = row?;
                self.convert_yolo_row(&row, path, line_num)
            })
            .collect()
    }
}

/// Converts a VOC XML file into records using the default corner convention.
pub fn convert_voc_from_path(path: &Path) -> Result<Vec<Annotation>, AnnofactoryError> {
    convert_voc_from_path_with(path, CornerConvention::default())
}

/// Converts a VOC XML file into records, one per `<object>`, in document
/// order.
pub fn convert_voc_from_path_with(
    path: &Path,
    convention: CornerConvention,
) -> Result<Vec<Annotation>, AnnofactoryError> {
    let document = io_voc_xml::read_voc_xml(path)?;
    let converter = AnnotationConverter::new().with_convention(convention);
    log::debug!(
        "converting {} with {} corners",
        path.display(),
        convention.name()
    );

    Ok(document
        .objects
        .iter()
        .map(|object| converter.convert_voc(object, document.info.size))
        .collect())
}

/// Converts a YOLO label file into records, in line order.
///
/// When `class_path` is given, class indices are resolved to names from
/// that class list file.
pub fn convert_yolo_from_path(
    path: &Path,
    class_path: Option<&Path>,
) -> Result<Vec<Annotation>, AnnofactoryError> {
    let mut converter = AnnotationConverter::new();
    if let Some(class_path) = class_path {
        converter = converter.with_classes(io_yolo::read_class_list(class_path)?);
    }

    let content = std::fs::read_to_string(path).map_err(AnnofactoryError::Io)?;
    let annotations = converter.convert_yolo_str(&content, path)?;
    log::debug!(
        "converted {} YOLO row(s) from {}",
        annotations.len(),
        path.display()
    );
    Ok(annotations)
}
