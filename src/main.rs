// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

#![windows_subsystem = "windows"] // necessary to remove the console window on Windows

use std::io;

use debug_print::debug_eprintln;
use winit::event_loop::EventLoop;

use simple_color_picker::private::settings::{config_path, Settings};
use simple_color_picker::private::util::dialog;

use crate::window::{State, UserEvent};

mod window;

/// constants generated in build.rs
mod build_constants {
    include!(env!("CONSTANTS_PATH"));
}

fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Settings::default(), // generate new settings file when it doesn't exist
        Err(e) => {
            let path = config_path()
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            dialog::show_warning(format!("Error loading settings file \"{path}\". Resetting to default settings.\n\n{e}"));
            Settings::default()
        }
    };

    let event_loop = match EventLoop::<UserEvent>::with_user_event().build() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            debug_eprintln!("failed to create event loop: {}", e);
            return;
        }
    };

    let user_event_sender = event_loop.create_proxy();
    let tick_interval = settings.tick_interval;
    let tick_thread = std::thread::Builder::new()
        .name("tick-sender".to_string())
        .spawn(move || {
            // stops once the event loop is gone
            while user_event_sender.send_event(()).is_ok() {
                std::thread::sleep(tick_interval);
            }
        });
    if let Err(e) = tick_thread {
        debug_eprintln!("failed to spawn tick thread: {}", e);
        return;
    }

    let mut state = State::new(settings);
    if let Err(e) = event_loop.run_app(&mut state) {
        debug_eprintln!("event loop exited with error: {}", e);
    }
}
