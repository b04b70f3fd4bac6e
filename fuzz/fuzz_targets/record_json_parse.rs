//! Fuzz target for annotation record JSON parsing.
//!
//! Arbitrary bytes go through the record parser and validator; accepted
//! records are fed to a YOLO writer.

#![no_main]

use annofactory::ir::io_json::from_json_slice;
use annofactory::writer::AnnotationWriter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(records) = from_json_slice(data) else {
        return;
    };

    let mut writer = AnnotationWriter::new();
    writer.init_yolo();
    for record in &records {
        let _ = writer.add_yolo_object(record);
    }
    let _ = writer.render_yolo();
});
