use criterion::{Criterion, criterion_group, criterion_main};
use lasfile::{Header, Point, Reader, Writer};
use std::{hint::black_box, io::Cursor};

fn roundtrip(npoints: usize, point_format: u8) {
    let mut header = Header::default();
    header.set_version_minor(1).unwrap();
    header.set_point_format(point_format).unwrap();
    let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
    for i in 0..npoints {
        writer
            .write_point(Point {
                x: i as f64,
                gps_time: Some(i as f64),
                ..Default::default()
            })
            .unwrap();
    }
    let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    for point in reader.points() {
        let _ = black_box(point.unwrap());
    }
}

fn bench(c: &mut Criterion) {
    for npoints in [0, 1, 100, 10000] {
        let _ = c.bench_function(&format!("roundtrip {npoints}"), |b| {
            b.iter(|| roundtrip(black_box(npoints), 0))
        });
    }
    let _ = c.bench_function("roundtrip 10000 with gps time", |b| {
        b.iter(|| roundtrip(black_box(10000), 1))
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
