//! Accumulating writer for VOC XML and YOLO label output.
//!
//! Each output mode starts uninitialised. `init_*` moves it to initialised
//! (and clears anything accumulated so far); `add_*` appends a record;
//! `save_*` renders the records in call order. Using a mode before its
//! `init_*` fails with [`AnnofactoryError::InvalidState`].
//!
//! The two modes are independent and may both be active on one writer.

use std::path::Path;

use crate::error::AnnofactoryError;
use crate::ir::io_voc_xml::{self, VocDocument, VocImageInfo, VocObject, VocObjectMeta};
use crate::ir::io_yolo::{self, YoloRow};
use crate::ir::{Annotation, CornerConvention};
use crate::validation::{validate_annotation, TagRequirement};

const VOC_MODE: &str = "VOC";
const YOLO_MODE: &str = "YOLO";

/// Collects normalized records and writes them as VOC XML and/or YOLO text.
///
/// A writer is not meant to be shared between callers; use one instance per
/// output document.
#[derive(Clone, Debug, Default)]
pub struct AnnotationWriter {
    voc: Option<VocDocument>,
    yolo: Option<Vec<YoloRow>>,
    convention: CornerConvention,
}

impl AnnotationWriter {
    /// Creates a writer with both modes uninitialised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `convention` when mapping regions onto VOC corners.
    pub fn with_convention(mut self, convention: CornerConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn convention(&self) -> CornerConvention {
        self.convention
    }

    /// Starts a new VOC document for the given image, dropping any objects
    /// added before.
    pub fn init_voc(&mut self, info: VocImageInfo) {
        log::debug!(
            "init VOC writer for '{}' ({}x{}, {} corners)",
            info.filename,
            info.size.width,
            info.size.height,
            self.convention.name()
        );
        self.voc = Some(VocDocument::new(info));
    }

    /// Starts a new YOLO label list, dropping any rows added before.
    pub fn init_yolo(&mut self) {
        log::debug!("init YOLO writer");
        self.yolo = Some(Vec::new());
    }

    pub fn is_voc_initialized(&self) -> bool {
        self.voc.is_some()
    }

    pub fn is_yolo_initialized(&self) -> bool {
        self.yolo.is_some()
    }

    /// Adds an object to the VOC document.
    ///
    /// The record must carry a `tag_name`. Its region is scaled to pixels
    /// with the image size given to [`init_voc`](Self::init_voc).
    pub fn add_voc_object(
        &mut self,
        annotation: &Annotation,
        meta: VocObjectMeta,
    ) -> Result<(), AnnofactoryError> {
        let convention = self.convention;
        let document = self.voc_mut()?;

        validate_annotation(annotation, TagRequirement::Name)?;
        let name = annotation.tag_name.clone().unwrap_or_default();

        let bndbox = annotation
            .region
            .to_corners(document.info.size, convention);
        log::trace!("voc object '{}' -> {:?}", name, bndbox);

        document.objects.push(VocObject { name, meta, bndbox });
        Ok(())
    }

    /// Adds a row to the YOLO label list.
    ///
    /// The record must carry a `tag_id`.
    pub fn add_yolo_object(&mut self, annotation: &Annotation) -> Result<(), AnnofactoryError> {
        let rows = self.yolo_mut()?;

        validate_annotation(annotation, TagRequirement::Id)?;
        let class_id = annotation.tag_id.unwrap_or_default();

        let bbox = annotation.region.to_center();
        log::trace!("yolo row {} -> {:?}", class_id, bbox);

        rows.push(YoloRow { class_id, bbox });
        Ok(())
    }

    /// Renders the VOC document as XML text.
    pub fn render_voc(&self) -> Result<String, AnnofactoryError> {
        Ok(io_voc_xml::render_voc_xml(self.voc_ref()?))
    }

    /// Renders the YOLO rows as label text.
    pub fn render_yolo(&self) -> Result<String, AnnofactoryError> {
        Ok(io_yolo::render_yolo_txt(self.yolo_ref()?))
    }

    /// Writes the VOC document to `path`, replacing any existing file.
    pub fn save_voc(&self, path: &Path) -> Result<(), AnnofactoryError> {
        io_voc_xml::write_voc_xml(path, self.voc_ref()?)
    }

    /// Writes the YOLO rows to `path`, replacing any existing file.
    pub fn save_yolo(&self, path: &Path) -> Result<(), AnnofactoryError> {
        io_yolo::write_yolo_txt(path, self.yolo_ref()?)
    }

    fn voc_ref(&self) -> Result<&VocDocument, AnnofactoryError> {
        self.voc
            .as_ref()
            .ok_or(AnnofactoryError::InvalidState { mode: VOC_MODE })
    }

    fn voc_mut(&mut self) -> Result<&mut VocDocument, AnnofactoryError> {
        self.voc
            .as_mut()
            .ok_or(AnnofactoryError::InvalidState { mode: VOC_MODE })
    }

    fn yolo_ref(&self) -> Result<&[YoloRow], AnnofactoryError> {
        self.yolo
            .as_deref()
            .ok_or(AnnofactoryError::InvalidState { mode: YOLO_MODE })
    }

    fn yolo_mut(&mut self) -> Result<&mut Vec<YoloRow>, AnnofactoryError> {
        self.yolo
            .as_mut()
            .ok_or(AnnofactoryError::InvalidState { mode: YOLO_MODE })
    }
}
