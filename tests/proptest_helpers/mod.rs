#![allow(dead_code)]

use annofactory::ir::{Annotation, CenterBox, CornerBox, ImageSize, Region};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const EPS_GEOMETRY: f64 = 1e-9;
/// YOLO text keeps six decimals.
pub const EPS_YOLO: f64 = 2e-6;

pub fn eps_voc(size: ImageSize) -> f64 {
    size.width.max(size.height) * 1e-12
}

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn approx_eq(left: f64, right: f64, eps: f64) -> bool {
    (left - right).abs() <= eps
}

pub fn assert_regions_close(left: &Region, right: &Region, eps: f64) -> Result<(), String> {
    let pairs = [
        ("left", left.left, right.left),
        ("top", left.top, right.top),
        ("width", left.width, right.width),
        ("height", left.height, right.height),
    ];
    for (field, a, b) in pairs {
        if !approx_eq(a, b, eps) {
            return Err(format!("region.{field} mismatch: {a} vs {b} (eps {eps})"));
        }
    }
    Ok(())
}

pub fn assert_corners_close(left: &CornerBox, right: &CornerBox, eps: f64) -> Result<(), String> {
    let pairs = [
        ("xmin", left.xmin, right.xmin),
        ("ymin", left.ymin, right.ymin),
        ("xmax", left.xmax, right.xmax),
        ("ymax", left.ymax, right.ymax),
    ];
    for (field, a, b) in pairs {
        if !approx_eq(a, b, eps) {
            return Err(format!("{field} mismatch: {a} vs {b} (eps {eps})"));
        }
    }
    Ok(())
}

/// Center boxes with every component in [0, 1] and strictly positive size.
pub fn arb_center_box() -> BoxedStrategy<CenterBox> {
    (0.0f64..=1.0, 0.0f64..=1.0, 1e-6f64..=1.0, 1e-6f64..=1.0)
        .prop_map(|(x, y, w, h)| CenterBox::new(x, y, w, h))
        .boxed()
}

pub fn arb_image_size() -> BoxedStrategy<ImageSize> {
    (1u32..=8192, 1u32..=8192)
        .prop_map(|(w, h)| ImageSize::new(w as f64, h as f64))
        .boxed()
}

/// Image size plus an ordered pixel box inside that image.
pub fn arb_sized_corner_box() -> BoxedStrategy<(ImageSize, CornerBox)> {
    arb_image_size()
        .prop_flat_map(|size| {
            (
                Just(size),
                0.0..=size.width,
                0.0..=size.height,
                0.0f64..=1.0,
                0.0f64..=1.0,
            )
        })
        .prop_map(|(size, xmin, ymin, fx, fy)| {
            let xmax = xmin + (size.width - xmin) * fx;
            let ymax = ymin + (size.height - ymin) * fy;
            (size, CornerBox::new(xmin, ymin, xmax, ymax))
        })
        .boxed()
}

pub fn arb_region() -> BoxedStrategy<Region> {
    (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0)
        .prop_map(|(left, top, width, height)| Region::new(left, top, width, height))
        .boxed()
}

pub fn category_name_strategy() -> BoxedStrategy<String> {
    proptest::string::string_regex("[a-z]{1,20}")
        .expect("valid regex")
        .boxed()
}

/// Records carrying both a class name and a class index.
pub fn arb_annotations(max: usize) -> BoxedStrategy<Vec<Annotation>> {
    proptest::collection::vec(
        (category_name_strategy(), 0u64..80, arb_region()),
        0..=max,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .map(|(name, id, region)| Annotation::new(region).with_tag_name(name).with_tag_id(id))
            .collect()
    })
    .boxed()
}
