//! Structural validation of annotation records.
//!
//! Records arriving at the API boundary are checked against a fixed shape
//! before any writer touches them:
//! - at least one of `tagName` (string) / `tagId` (non-negative integer)
//! - a `region` object with numeric `left`, `top`, `width`, `height`
//!
//! Only structure and primitive types are checked; coordinate values are
//! never range-checked.

use std::fmt;

use serde_json::{Map, Value};

use crate::ir::{Annotation, Region};

const REGION_FIELDS: [&str; 4] = ["left", "top", "width", "height"];

/// What kind of structural constraint a record violated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The value at `path` is not a JSON object.
    NotAnObject,
    /// A required field is absent.
    MissingField,
    /// A field is present but has the wrong primitive type.
    WrongType { expected: &'static str },
    /// Neither tag field is usable for the intended output.
    MissingTag { required: TagRequirement },
}

/// A record failed structural validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `region.width`.
    /// Empty for the record itself.
    pub path: String,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    fn new(path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Prefixes the path with an array index, for errors inside record lists.
    pub fn at_index(mut self, index: usize) -> Self {
        self.path = if self.path.is_empty() {
            format!("[{index}]")
        } else {
            format!("[{index}].{}", self.path)
        };
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = if self.path.is_empty() {
            "record"
        } else {
            self.path.as_str()
        };
        match &self.kind {
            ValidationErrorKind::NotAnObject => write!(f, "{location} must be an object"),
            ValidationErrorKind::MissingField => write!(f, "{location} is required"),
            ValidationErrorKind::WrongType { expected } => {
                write!(f, "{location} must be {expected}")
            }
            ValidationErrorKind::MissingTag {
                required: TagRequirement::Any,
            } => write!(f, "{location} must have tagName or tagId"),
            ValidationErrorKind::MissingTag { required } => {
                write!(f, "{required} is required for this output format")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Which tag field a consumer needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagRequirement {
    /// Either `tagName` or `tagId`.
    Any,
    /// `tagName`, needed for VOC output.
    Name,
    /// `tagId`, needed for YOLO output.
    Id,
}

impl fmt::Display for TagRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagRequirement::Any => write!(f, "tagName or tagId"),
            TagRequirement::Name => write!(f, "tagName"),
            TagRequirement::Id => write!(f, "tagId"),
        }
    }
}

/// Validates a JSON record against the interchange shape and returns the
/// typed record.
///
/// `null` tag fields count as absent.
pub fn validate_record(value: &Value) -> Result<Annotation, ValidationError> {
    let object = value
        .as_object()
        .ok_or_else(|| ValidationError::new("", ValidationErrorKind::NotAnObject))?;

    let tag_name = match object.get("tagName") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name.clone()),
        Some(_) => {
            return Err(ValidationError::new(
                "tagName",
                ValidationErrorKind::WrongType { expected: "a string" },
            ))
        }
    };

    let tag_id = match object.get("tagId") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_u64().ok_or_else(|| {
            ValidationError::new(
                "tagId",
                ValidationErrorKind::WrongType {
                    expected: "a non-negative integer",
                },
            )
        })?),
    };

    let region_value = object
        .get("region")
        .ok_or_else(|| ValidationError::new("region", ValidationErrorKind::MissingField))?;
    let region = validate_region(region_value)?;

    let annotation = Annotation {
        tag_name,
        tag_id,
        region,
    };
    validate_annotation(&annotation, TagRequirement::Any)?;
    Ok(annotation)
}

fn validate_region(value: &Value) -> Result<Region, ValidationError> {
    let object = value
        .as_object()
        .ok_or_else(|| ValidationError::new("region", ValidationErrorKind::NotAnObject))?;

    let [left, top, width, height] = REGION_FIELDS.map(|field| region_field(object, field));
    Ok(Region::new(left?, top?, width?, height?))
}

fn region_field(object: &Map<String, Value>, field: &str) -> Result<f64, ValidationError> {
    let path = format!("region.{field}");
    let value = object
        .get(field)
        .ok_or_else(|| ValidationError::new(path.clone(), ValidationErrorKind::MissingField))?;
    value.as_f64().ok_or_else(|| {
        ValidationError::new(
            path,
            ValidationErrorKind::WrongType {
                expected: "a number",
            },
        )
    })
}

/// Checks that a typed record carries the tag a consumer needs.
///
/// Every record must have at least one tag; `Name` and `Id` additionally
/// require that specific field.
pub fn validate_annotation(
    annotation: &Annotation,
    required: TagRequirement,
) -> Result<(), ValidationError> {
    if annotation.tag_name.is_none() && annotation.tag_id.is_none() {
        return Err(ValidationError::new(
            "",
            ValidationErrorKind::MissingTag {
                required: TagRequirement::Any,
            },
        ));
    }

    let (missing, path) = match required {
        TagRequirement::Any => (false, ""),
        TagRequirement::Name => (annotation.tag_name.is_none(), "tagName"),
        TagRequirement::Id => (annotation.tag_id.is_none(), "tagId"),
    };
    if missing {
        return Err(ValidationError::new(
            path,
            ValidationErrorKind::MissingTag { required },
        ));
    }

    Ok(())
}
