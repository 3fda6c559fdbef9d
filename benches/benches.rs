// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Benchmarks for various functions

use criterion::{criterion_group, criterion_main};

use color::*;
use hotkey::*;
use magnifier::*;
use render::*;

mod color;
mod hotkey;
mod render;

criterion_group!(benches, bench_hsv_conversion, bench_multiply_color_channel, bench_key_process, bench_zoom, bench_magnifier_draw, bench_render, bench_gradient);
criterion_main!(benches);
