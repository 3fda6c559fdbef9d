// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Benchmarks for color conversion

use std::hint::black_box;

use criterion::Criterion;

use simple_color_picker::private::color::{hsv_to_rgb, rgb_to_hsv, Color};
use simple_color_picker::private::util::image;

pub fn bench_hsv_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("HSV conversion");

    group.bench_function("hsv_to_rgb", |bencher| {
        bencher.iter(|| hsv_to_rgb(black_box(0.61), black_box(0.8), black_box(0.9)))
    });

    group.bench_function("rgb_to_hsv", |bencher| {
        bencher.iter(|| rgb_to_hsv(black_box(0.2), black_box(0.55), black_box(0.9)))
    });

    // what the picker does on every edit: build, normalize, read every channel back
    group.bench_function("round trip", |bencher| {
        bencher.iter(|| {
            let color = Color::from_hsv(black_box(217), black_box(200), black_box(230)).normalized();
            (color.rgb(), color.hue(), color.saturation(), color.value())
        })
    });

    group.finish();
}

pub fn bench_multiply_color_channel(c: &mut Criterion) {
    c.bench_function("multiply_color_channels_u8", |bencher| {
        bencher.iter(|| image::multiply_color_channels_u8(black_box(0x40), black_box(0xB2)))
    });
}
