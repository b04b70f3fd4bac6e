//! Fuzz target for VOC XML parsing and conversion.
//!
//! Arbitrary bytes go through the VOC parser; any document that parses is
//! then converted with both corner conventions.

#![no_main]

use annofactory::conversion::AnnotationConverter;
use annofactory::ir::io_voc_xml::from_voc_xml_slice;
use annofactory::ir::CornerConvention;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(document) = from_voc_xml_slice(data) else {
        return;
    };

    for convention in [CornerConvention::EdgeFractions, CornerConvention::BoxSize] {
        let converter = AnnotationConverter::new().with_convention(convention);
        for object in &document.objects {
            let _ = converter.convert_voc(object, document.info.size);
        }
    }
});
