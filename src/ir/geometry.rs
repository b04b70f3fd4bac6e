//! Coordinate transforms between the canonical [`Region`] and the
//! per-format box layouts.
//!
//! - [`CornerBox`]: absolute pixel corners, used by Pascal VOC XML.
//! - [`CenterBox`]: normalized center + size, used by YOLO label files.
//!
//! All transforms are pure and perform no clamping or bounds checks.

use super::model::Region;

/// Image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned box as absolute pixel corners (xmin, ymin, xmax, ymax).
///
/// Like the rest of the IR this does NOT enforce that min < max.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl CornerBox {
    #[inline]
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }
}

/// A box as normalized center + size (x_center, y_center, width, height).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CenterBox {
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl CenterBox {
    #[inline]
    pub fn new(x_center: f64, y_center: f64, width: f64, height: f64) -> Self {
        Self {
            x_center,
            y_center,
            width,
            height,
        }
    }
}

/// How the `width`/`height` fields of a [`Region`] map onto VOC corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CornerConvention {
    /// `width`/`height` hold the right/bottom edge as a fraction of the
    /// image, i.e. `width = xmax / w`. Legacy record files use this layout.
    ///
    /// Round-trips VOC -> VOC exactly, but a region imported from VOC does
    /// not carry the true box size, so VOC -> YOLO output is skewed.
    #[default]
    EdgeFractions,

    /// `width`/`height` hold the true box size, i.e.
    /// `width = (xmax - xmin) / w`. Consistent with the YOLO path.
    BoxSize,
}

impl CornerConvention {
    /// Human-readable name for the convention.
    pub fn name(&self) -> &'static str {
        match self {
            CornerConvention::EdgeFractions => "edge-fractions",
            CornerConvention::BoxSize => "box-size",
        }
    }
}

impl Region {
    /// Converts absolute pixel corners into a normalized region.
    pub fn from_corners(corners: CornerBox, size: ImageSize, convention: CornerConvention) -> Self {
        let left = corners.xmin / size.width;
        let top = corners.ymin / size.height;

        match convention {
            CornerConvention::EdgeFractions => Region::new(
                left,
                top,
                corners.xmax / size.width,
                corners.ymax / size.height,
            ),
            CornerConvention::BoxSize => Region::new(
                left,
                top,
                (corners.xmax - corners.xmin) / size.width,
                (corners.ymax - corners.ymin) / size.height,
            ),
        }
    }

    /// Converts this region into absolute pixel corners.
    pub fn to_corners(&self, size: ImageSize, convention: CornerConvention) -> CornerBox {
        let xmin = self.left * size.width;
        let ymin = self.top * size.height;

        match convention {
            CornerConvention::EdgeFractions => CornerBox::new(
                xmin,
                ymin,
                self.width * size.width,
                self.height * size.height,
            ),
            CornerConvention::BoxSize => CornerBox::new(
                xmin,
                ymin,
                (self.left + self.width) * size.width,
                (self.top + self.height) * size.height,
            ),
        }
    }

    /// Converts a normalized center box into a region.
    ///
    /// No image size is needed since both sides are already normalized.
    #[inline]
    pub fn from_center(center: CenterBox) -> Self {
        Region::new(
            center.x_center - center.width / 2.0,
            center.y_center - center.height / 2.0,
            center.width,
            center.height,
        )
    }

    /// Converts this region into a normalized center box.
    #[inline]
    pub fn to_center(&self) -> CenterBox {
        CenterBox::new(
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
            self.width,
            self.height,
        )
    }
}
