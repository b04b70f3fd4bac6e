use annofactory::ir::{CornerConvention, Region};
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn center_form_roundtrips(center in proptest_helpers::arb_center_box()) {
        let restored = Region::from_center(center).to_center();

        let eps = proptest_helpers::EPS_GEOMETRY;
        prop_assert!(proptest_helpers::approx_eq(restored.x_center, center.x_center, eps));
        prop_assert!(proptest_helpers::approx_eq(restored.y_center, center.y_center, eps));
        prop_assert!(proptest_helpers::approx_eq(restored.width, center.width, eps));
        prop_assert!(proptest_helpers::approx_eq(restored.height, center.height, eps));
    }

    #[test]
    fn edge_fraction_corners_roundtrip(
        (size, corners) in proptest_helpers::arb_sized_corner_box()
    ) {
        let region = Region::from_corners(corners, size, CornerConvention::EdgeFractions);
        let restored = region.to_corners(size, CornerConvention::EdgeFractions);

        let res = proptest_helpers::assert_corners_close(
            &corners,
            &restored,
            proptest_helpers::eps_voc(size),
        );
        prop_assert!(res.is_ok(), "{}", res.unwrap_err());
    }

    #[test]
    fn box_size_corners_roundtrip(
        (size, corners) in proptest_helpers::arb_sized_corner_box()
    ) {
        let region = Region::from_corners(corners, size, CornerConvention::BoxSize);
        let restored = region.to_corners(size, CornerConvention::BoxSize);

        let res = proptest_helpers::assert_corners_close(
            &corners,
            &restored,
            proptest_helpers::eps_voc(size),
        );
        prop_assert!(res.is_ok(), "{}", res.unwrap_err());
    }

    #[test]
    fn box_size_region_matches_center_path(
        (size, corners) in proptest_helpers::arb_sized_corner_box()
    ) {
        // A BoxSize region describes the same box the YOLO path would.
        let region = Region::from_corners(corners, size, CornerConvention::BoxSize);
        let center = region.to_center();

        let eps = proptest_helpers::EPS_GEOMETRY;
        let expected_cx = (corners.xmin + corners.xmax) / 2.0 / size.width;
        let expected_w = (corners.xmax - corners.xmin) / size.width;
        prop_assert!(proptest_helpers::approx_eq(center.x_center, expected_cx, eps));
        prop_assert!(proptest_helpers::approx_eq(center.width, expected_w, eps));
    }
}
