// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Benchmarks for drawing the main window

use std::hint::black_box;

use criterion::{BatchSize, Criterion};

use simple_color_picker::private::canvas::Canvas;
use simple_color_picker::private::channel::ColorModel;
use simple_color_picker::private::color::Color;
use simple_color_picker::private::gradient::{self, Direction};
use simple_color_picker::private::layout::{MAIN_GRADIENT, WINDOW_HEIGHT, WINDOW_WIDTH};
use simple_color_picker::private::picker::PickerState;
use simple_color_picker::private::ui::Ui;

fn window_buffer() -> Vec<u32> {
    vec![0; WINDOW_WIDTH as usize * WINDOW_HEIGHT as usize]
}

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("Main window frame");

    for tab in ColorModel::ALL {
        let ui = Ui::new(PickerState::new(Color::from_rgb(40, 120, 200), false), tab);
        group.bench_function(tab.label(), |bencher| {
            bencher.iter_batched_ref(
                window_buffer,
                |buffer| ui.render(black_box(&mut Canvas::new(buffer.as_mut_slice(), WINDOW_WIDTH, WINDOW_HEIGHT))),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

pub fn bench_gradient(c: &mut Criterion) {
    let mut group = c.benchmark_group("Saturation/value square");

    group.bench_function("two pass", |bencher| {
        bencher.iter_batched_ref(
            window_buffer,
            |buffer| {
                let mut canvas = Canvas::new(buffer.as_mut_slice(), WINDOW_WIDTH, WINDOW_HEIGHT);
                gradient::saturation_gradient(black_box(200)).fill(&mut canvas, MAIN_GRADIENT, Direction::LeftToRight);
                gradient::value_overlay().fill(&mut canvas, MAIN_GRADIENT, Direction::TopToBottom);
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("hue bar", |bencher| {
        let hue = gradient::hue_gradient();
        bencher.iter(|| black_box(&hue).color_at(black_box(0.42)))
    });

    group.finish();
}
