//! Intermediate Representation (IR) for annofactory.
//!
//! The IR is a list of [`Annotation`] records whose [`Region`] is expressed
//! as fractions of the image size. Format readers normalize into it and
//! format writers denormalize out of it; [`geometry`] holds the transforms
//! between the two.
//!
//! # Example
//!
//! ```
//! use annofactory::ir::{Annotation, CornerBox, CornerConvention, ImageSize, Region};
//!
//! let size = ImageSize::new(608.0, 608.0);
//! let region = Region::from_corners(
//!     CornerBox::new(60.8, 121.6, 304.0, 486.4),
//!     size,
//!     CornerConvention::EdgeFractions,
//! );
//! let annotation = Annotation::new(region).with_tag_name("apples");
//! assert!((annotation.region.width - 0.5).abs() < 1e-9);
//! ```

pub mod geometry;
pub mod io_json;
pub mod io_voc_xml;
pub mod io_yolo;
mod model;

// Re-export core types for convenient access
pub use geometry::{CenterBox, CornerBox, CornerConvention, ImageSize};
pub use io_yolo::ClassList;
pub use model::{Annotation, Region};
