// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Benchmarks for the hotkey manager

use std::hint::black_box;
use std::time::{Duration, Instant};

use criterion::Criterion;

use simple_color_picker::private::hotkey::KeyBindings;
use simple_color_picker::private::platform;

pub fn bench_key_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("Key process");

    let Ok(mut hotkey_manager) = platform::HotkeyManager::new(&KeyBindings::default()) else {
        return;
    };

    group.bench_function("bitmask", |bencher| {
        bencher.iter_custom(|iters| {
            let mut duration = Duration::ZERO;
            for _i in 0..iters {
                hotkey_manager.poll_keys();
                let start = Instant::now();
                platform::HotkeyManager::process_keys(black_box(&mut hotkey_manager));
                duration += start.elapsed();
            }
            duration
        });
    });

    group.finish();
}
