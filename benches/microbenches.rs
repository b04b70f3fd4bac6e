//! Criterion microbenches for annofactory parsing and writing.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - VOC XML parsing (from_voc_xml_str)
//! - YOLO label parsing (from_yolo_str)
//! - Writer rendering for both output formats

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;
use std::path::Path;

use annofactory::conversion::AnnotationConverter;
use annofactory::ir::io_voc_xml::{from_voc_xml_str, VocImageInfo, VocObjectMeta};
use annofactory::ir::io_yolo::from_yolo_str;
use annofactory::ir::{Annotation, ImageSize, Region};
use annofactory::writer::AnnotationWriter;

// Include test fixtures at compile time (no file I/O during benchmark)
const VOC_FIXTURE: &str = include_str!("../tests/fixtures/sample.voc.xml");
const YOLO_FIXTURE: &str = include_str!("../tests/fixtures/sample.yolo.txt");

fn sample_records(count: usize) -> Vec<Annotation> {
    (0..count)
        .map(|i| {
            let offset = (i % 10) as f64 * 0.05;
            Annotation::new(Region::new(offset, offset, 0.25, 0.3))
                .with_tag_name(format!("class_{}", i % 5))
                .with_tag_id((i % 5) as u64)
        })
        .collect()
}

fn bench_voc_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("voc_parse");
    group.throughput(Throughput::Bytes(VOC_FIXTURE.len() as u64));

    group.bench_function("from_voc_xml_str", |b| {
        b.iter(|| {
            let doc = from_voc_xml_str(black_box(VOC_FIXTURE)).unwrap();
            black_box(doc)
        })
    });

    group.finish();
}

fn bench_yolo_convert(c: &mut Criterion) {
    let converter = AnnotationConverter::new();
    let mut group = c.benchmark_group("yolo_parse");
    group.throughput(Throughput::Bytes(YOLO_FIXTURE.len() as u64));

    group.bench_function("from_yolo_str", |b| {
        b.iter(|| {
            let rows = from_yolo_str(black_box(YOLO_FIXTURE)).unwrap();
            black_box(rows)
        })
    });

    group.bench_function("convert_yolo_str", |b| {
        b.iter(|| {
            let records = converter
                .convert_yolo_str(black_box(YOLO_FIXTURE), Path::new("bench.txt"))
                .unwrap();
            black_box(records)
        })
    });

    group.finish();
}

/// Benchmark writer rendering.
///
/// Records are built once outside the timed region; each iteration starts a
/// fresh writer, adds every record and renders.
fn bench_writer_render(c: &mut Criterion) {
    let records = sample_records(200);

    let mut group = c.benchmark_group("writer_render");
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("render_voc", |b| {
        b.iter(|| {
            let mut writer = AnnotationWriter::new();
            writer.init_voc(VocImageInfo::new("bench.jpg", ImageSize::new(640.0, 480.0)));
            for record in black_box(&records) {
                writer
                    .add_voc_object(record, VocObjectMeta::default())
                    .unwrap();
            }
            black_box(writer.render_voc().unwrap())
        })
    });

    group.bench_function("render_yolo", |b| {
        b.iter(|| {
            let mut writer = AnnotationWriter::new();
            writer.init_yolo();
            for record in black_box(&records) {
                writer.add_yolo_object(record).unwrap();
            }
            black_box(writer.render_yolo().unwrap())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_voc_parse,
    bench_yolo_convert,
    bench_writer_render,
);
criterion_main!(benches);
