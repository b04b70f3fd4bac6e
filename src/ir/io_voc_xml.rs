//! Pascal VOC XML reader and writer.
//!
//! One XML document describes one image: its size plus any number of
//! `<object>` entries, each with a class name and an absolute-pixel
//! `<bndbox>`.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use roxmltree::Node;

use super::geometry::{CornerBox, ImageSize};
use crate::error::AnnofactoryError;

pub const DEFAULT_FOLDER: &str = "images";
pub const DEFAULT_DATABASE: &str = "Unknown";
pub const DEFAULT_DEPTH: u32 = 3;
pub const DEFAULT_POSE: &str = "Unspecified";

/// Image-level metadata written at the top of a VOC document.
#[derive(Clone, Debug, PartialEq)]
pub struct VocImageInfo {
    pub folder: String,
    pub filename: String,
    pub size: ImageSize,
    pub depth: u32,
    pub database: String,
    pub segmented: u32,
}

impl VocImageInfo {
    /// Creates image info with the default folder, depth, database and
    /// segmented flag.
    pub fn new(filename: impl Into<String>, size: ImageSize) -> Self {
        Self {
            folder: DEFAULT_FOLDER.to_string(),
            filename: filename.into(),
            size,
            depth: DEFAULT_DEPTH,
            database: DEFAULT_DATABASE.to_string(),
            segmented: 0,
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_segmented(mut self, segmented: u32) -> Self {
        self.segmented = segmented;
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }
}

/// Per-object VOC metadata that has no counterpart in the normalized record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocObjectMeta {
    pub pose: String,
    pub truncated: u32,
    pub difficult: u32,
}

impl Default for VocObjectMeta {
    fn default() -> Self {
        Self {
            pose: DEFAULT_POSE.to_string(),
            truncated: 0,
            difficult: 0,
        }
    }
}

/// One `<object>` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct VocObject {
    pub name: String,
    pub meta: VocObjectMeta,
    pub bndbox: CornerBox,
}

/// A whole VOC annotation document.
#[derive(Clone, Debug, PartialEq)]
pub struct VocDocument {
    pub info: VocImageInfo,
    pub objects: Vec<VocObject>,
}

impl VocDocument {
    pub fn new(info: VocImageInfo) -> Self {
        Self {
            info,
            objects: Vec::new(),
        }
    }
}

/// Read a VOC XML file.
pub fn read_voc_xml(path: &Path) -> Result<VocDocument, AnnofactoryError> {
    let xml = fs::read_to_string(path).map_err(AnnofactoryError::Io)?;
    let document = parse_voc_xml_str(&xml, path)?;
    log::debug!(
        "read {} object(s) from {}",
        document.objects.len(),
        path.display()
    );
    Ok(document)
}

/// Parse VOC XML from a UTF-8 string.
pub fn from_voc_xml_str(xml: &str) -> Result<VocDocument, AnnofactoryError> {
    parse_voc_xml_str(xml, Path::new("<memory>"))
}

/// Parse VOC XML from bytes.
///
/// The input must be valid UTF-8.
pub fn from_voc_xml_slice(bytes: &[u8]) -> Result<VocDocument, AnnofactoryError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| AnnofactoryError::VocXmlParse {
        path: PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    from_voc_xml_str(xml)
}

fn parse_voc_xml_str(xml: &str, path: &Path) -> Result<VocDocument, AnnofactoryError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| AnnofactoryError::VocXmlParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let annotation = document.root_element();
    if annotation.tag_name().name() != "annotation" {
        return Err(AnnofactoryError::VocXmlParse {
            path: path.to_path_buf(),
            message: "missing <annotation> root element".to_string(),
        });
    }

    let size = required_child_element(annotation, "size", path, "<annotation>")?;
    let width = parse_image_dimension(size, "width", path)?;
    let height = parse_image_dimension(size, "height", path)?;

    let mut info = VocImageInfo::new(
        optional_child_text(annotation, "filename").unwrap_or_default(),
        ImageSize::new(width, height),
    );
    if let Some(folder) = optional_child_text(annotation, "folder") {
        info.folder = folder;
    }
    if let Some(database) = child_element(annotation, "source")
        .and_then(|source| optional_child_text(source, "database"))
    {
        info.database = database;
    }
    if let Some(depth) = parse_optional_u32(size, "depth", path, "<size>")? {
        info.depth = depth;
    }
    if let Some(segmented) = parse_optional_u32(annotation, "segmented", path, "<annotation>")? {
        info.segmented = segmented;
    }

    let mut objects = Vec::new();
    for object in annotation
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
    {
        let name = required_child_text(object, "name", path, "<object>")?;
        let bndbox = required_child_element(object, "bndbox", path, "<object>")?;

        let xmin = parse_required_f64(bndbox, "xmin", path, "<bndbox>")?;
        let ymin = parse_required_f64(bndbox, "ymin", path, "<bndbox>")?;
        let xmax = parse_required_f64(bndbox, "xmax", path, "<bndbox>")?;
        let ymax = parse_required_f64(bndbox, "ymax", path, "<bndbox>")?;

        let mut meta = VocObjectMeta::default();
        if let Some(pose) = optional_child_text(object, "pose") {
            meta.pose = pose;
        }
        if let Some(raw) = optional_child_text(object, "truncated") {
            meta.truncated = parse_flag(&raw, "truncated", path);
        }
        if let Some(raw) = optional_child_text(object, "difficult") {
            meta.difficult = parse_flag(&raw, "difficult", path);
        }

        objects.push(VocObject {
            name,
            meta,
            bndbox: CornerBox::new(xmin, ymin, xmax, ymax),
        });
    }

    Ok(VocDocument { info, objects })
}

fn required_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Node<'a, 'input>, AnnofactoryError> {
    child_element(node, tag).ok_or_else(|| AnnofactoryError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn required_child_text(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, AnnofactoryError> {
    optional_child_text(node, tag).ok_or_else(|| AnnofactoryError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn parse_optional_u32(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Option<u32>, AnnofactoryError> {
    optional_child_text(node, tag)
        .map(|raw| {
            raw.parse::<u32>().map_err(|_| AnnofactoryError::VocXmlParse {
                path: path.to_path_buf(),
                message: format!("invalid <{tag}> value '{raw}' in {context}; expected u32"),
            })
        })
        .transpose()
}

fn parse_required_f64(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<f64, AnnofactoryError> {
    let raw = required_child_text(node, tag, path, context)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AnnofactoryError::VocXmlParse {
            path: path.to_path_buf(),
            message: format!(
                "invalid <{tag}> value '{raw}' in {context}; expected finite floating-point number"
            ),
        }),
    }
}

/// Image dimensions divide every coordinate, so they must be positive.
fn parse_image_dimension(
    size: Node<'_, '_>,
    tag: &str,
    path: &Path,
) -> Result<f64, AnnofactoryError> {
    let value = parse_required_f64(size, tag, path, "<size>")?;
    if value <= 0.0 {
        return Err(AnnofactoryError::VocXmlParse {
            path: path.to_path_buf(),
            message: format!(
                "invalid <{tag}> value '{value}' in <size>; expected positive number"
            ),
        });
    }
    Ok(value)
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn optional_child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

/// Parses a truncated/difficult flag. Unrecognized values fall back to 0;
/// these flags never affect geometry.
fn parse_flag(raw: &str, tag: &str, path: &Path) -> u32 {
    if let Ok(value) = raw.parse::<u32>() {
        return value;
    }
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" => 1,
        "false" | "no" => 0,
        _ => {
            log::warn!(
                "ignoring unrecognized <{tag}> value '{raw}' in {}",
                path.display()
            );
            0
        }
    }
}

/// Render a VOC document as XML text.
pub fn render_voc_xml(document: &VocDocument) -> String {
    let info = &document.info;
    let mut xml = String::new();

    writeln!(xml, "<?xml version=\"1.0\" encoding=\"utf-8\"?>").expect("write to string");
    writeln!(xml, "<annotation>").expect("write to string");
    writeln!(xml, "  <folder>{}</folder>", xml_escape(&info.folder)).expect("write to string");
    writeln!(xml, "  <filename>{}</filename>", xml_escape(&info.filename))
        .expect("write to string");
    writeln!(xml, "  <source>").expect("write to string");
    writeln!(
        xml,
        "    <database>{}</database>",
        xml_escape(&info.database)
    )
    .expect("write to string");
    writeln!(xml, "  </source>").expect("write to string");
    writeln!(xml, "  <size>").expect("write to string");
    writeln!(xml, "    <width>{}</width>", info.size.width).expect("write to string");
    writeln!(xml, "    <height>{}</height>", info.size.height).expect("write to string");
    writeln!(xml, "    <depth>{}</depth>", info.depth).expect("write to string");
    writeln!(xml, "  </size>").expect("write to string");
    writeln!(xml, "  <segmented>{}</segmented>", info.segmented).expect("write to string");

    for object in &document.objects {
        writeln!(xml, "  <object>").expect("write to string");
        writeln!(xml, "    <name>{}</name>", xml_escape(&object.name)).expect("write to string");
        writeln!(xml, "    <pose>{}</pose>", xml_escape(&object.meta.pose))
            .expect("write to string");
        writeln!(xml, "    <truncated>{}</truncated>", object.meta.truncated)
            .expect("write to string");
        writeln!(xml, "    <difficult>{}</difficult>", object.meta.difficult)
            .expect("write to string");
        writeln!(xml, "    <bndbox>").expect("write to string");
        writeln!(xml, "      <xmin>{}</xmin>", object.bndbox.xmin).expect("write to string");
        writeln!(xml, "      <ymin>{}</ymin>", object.bndbox.ymin).expect("write to string");
        writeln!(xml, "      <xmax>{}</xmax>", object.bndbox.xmax).expect("write to string");
        writeln!(xml, "      <ymax>{}</ymax>", object.bndbox.ymax).expect("write to string");
        writeln!(xml, "    </bndbox>").expect("write to string");
        writeln!(xml, "  </object>").expect("write to string");
    }

    writeln!(xml, "</annotation>").expect("write to string");
    xml
}

/// Write a VOC document to `path`, replacing any existing file.
pub fn write_voc_xml(path: &Path, document: &VocDocument) -> Result<(), AnnofactoryError> {
    let file = File::create(path).map_err(AnnofactoryError::Io)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(render_voc_xml(document).as_bytes())
        .map_err(AnnofactoryError::Io)?;
    writer.flush().map_err(AnnofactoryError::Io)?;

    log::debug!(
        "wrote {} object(s) to {}",
        document.objects.len(),
        path.display()
    );
    Ok(())
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
