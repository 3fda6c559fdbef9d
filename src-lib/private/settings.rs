// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

use std::{fs, io};
use std::path::{Path, PathBuf};
use std::time::Duration;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::private::channel::ColorModel;
use crate::private::color::Color;
use crate::private::hotkey::KeyBindings;
use crate::private::magnifier::{DEFAULT_SIZE, DEFAULT_ZOOM, MagnifierConfig};
use crate::private::util::numeric::fps_to_tick_interval;

const DEFAULT_COLOR: u32 = 0x171721;
const DEFAULT_FPS: u32 = 60;
/// smallest lens that still leaves room for the swatch and the marker
const MIN_MAGNIFIER_SIZE: u32 = 50;

lazy_static! {
    static ref CONFIG_PATH: Option<PathBuf> = directories::ProjectDirs::from("dev.zkxs", "", "simple-color-picker")
        .map(|dirs| dirs.config_dir().join("config.toml"));
}

/// Where settings are kept. Fails if the platform has no notion of a config directory, which
/// mostly means there's no home directory.
pub fn config_path() -> io::Result<&'static Path> {
    CONFIG_PATH.as_deref()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "could not determine a config directory"))
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PersistedSettings {
    #[serde(with = "crate::private::util::custom_serializer::rgb_color")]
    pub color: u32,
    pub raw: bool,
    pub tab: ColorModel,
    pub window_x: Option<i32>,
    pub window_y: Option<i32>,
    pub magnifier_size: u32,
    pub magnifier_zoom: u32,
    pub fps: u32,
    pub key_bindings: KeyBindings,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        PersistedSettings {
            color: DEFAULT_COLOR,
            raw: false,
            tab: ColorModel::default(),
            window_x: None,
            window_y: None,
            magnifier_size: DEFAULT_SIZE,
            magnifier_zoom: DEFAULT_ZOOM,
            fps: DEFAULT_FPS,
            key_bindings: KeyBindings::default(),
        }
    }
}

impl PersistedSettings {
    /// fix up values that can't work, then derive the runtime settings
    fn load(mut self) -> Settings {
        if self.magnifier_zoom == 0 {
            self.magnifier_zoom = 1;
        }
        self.magnifier_size = self.magnifier_size.max(MIN_MAGNIFIER_SIZE);
        if self.fps == 0 {
            self.fps = DEFAULT_FPS;
        }

        let tick_interval = fps_to_tick_interval(self.fps);
        let magnifier = MagnifierConfig {
            size: self.magnifier_size,
            zoom: self.magnifier_zoom,
        };

        Settings {
            persisted: self,
            tick_interval,
            magnifier,
        }
    }
}

pub struct Settings {
    pub persisted: PersistedSettings,
    pub tick_interval: Duration,
    pub magnifier: MagnifierConfig,
}

impl Settings {
    pub fn load() -> io::Result<Settings> {
        let string = fs::read_to_string(config_path()?)?;
        Settings::from_toml(&string)
    }

    pub fn from_toml(string: &str) -> io::Result<Settings> {
        toml::from_str::<PersistedSettings>(string)
            .map(PersistedSettings::load)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn to_toml(&self) -> io::Result<String> {
        toml::to_string(&self.persisted).map_err(io::Error::other)
    }

    pub fn save(&self) -> io::Result<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)
    }

    pub fn color(&self) -> Color {
        Color::from_argb(0xFF00_0000 | self.persisted.color)
    }

    pub fn set_color(&mut self, color: &Color) {
        self.persisted.color = color.to_argb() & 0x00FF_FFFF;
    }

    /// last saved top left corner of the main window, if there is one
    pub fn window_position(&self) -> Option<(i32, i32)> {
        self.persisted.window_x.zip(self.persisted.window_y)
    }

    pub fn set_window_position(&mut self, x: i32, y: i32) {
        self.persisted.window_x = Some(x);
        self.persisted.window_y = Some(y);
    }
}

impl Default for Settings {
    fn default() -> Self {
        PersistedSettings::default().load()
    }
}

#[cfg(test)]
mod test_settings {
    use super::*;
    use crate::private::hotkey::Keycode;

    #[test]
    fn empty_file_is_default() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.persisted, PersistedSettings::default());
        assert_eq!(settings.magnifier, MagnifierConfig::default());
        assert_eq!(settings.tick_interval, Duration::from_millis(17));
        assert_eq!(settings.window_position(), None);
    }

    #[test]
    fn default_color() {
        assert_eq!(Settings::default().color(), Color::from_rgb(23, 23, 33));
    }

    #[test]
    fn reads_fields() {
        let settings = Settings::from_toml(r##"
            color = "#FF8000"
            raw = true
            tab = "Hsv"
            window_x = -300
            window_y = 40
            fps = 30

            [key_bindings]
            pick_color = ["F12"]
        "##).unwrap();
        assert_eq!(settings.color(), Color::from_rgb(255, 128, 0));
        assert!(settings.persisted.raw);
        assert_eq!(settings.persisted.tab, ColorModel::Hsv);
        assert_eq!(settings.window_position(), Some((-300, 40)));
        assert_eq!(settings.tick_interval, Duration::from_millis(34));
        assert_eq!(settings.persisted.key_bindings.pick_color, vec![Keycode::F12]);
        assert_eq!(settings.persisted.key_bindings.cancel_pick, vec![Keycode::Escape]);
    }

    #[test]
    fn half_a_position_is_no_position() {
        let settings = Settings::from_toml("window_x = 5").unwrap();
        assert_eq!(settings.window_position(), None);
    }

    #[test]
    fn fixes_unusable_values() {
        let settings = Settings::from_toml("magnifier_zoom = 0\nmagnifier_size = 10\nfps = 0").unwrap();
        assert_eq!(settings.magnifier, MagnifierConfig { size: 50, zoom: 1 });
        assert_eq!(settings.persisted.fps, DEFAULT_FPS);
    }

    #[test]
    fn malformed_is_invalid_data() {
        let error = Settings::from_toml("color = 12").err().unwrap();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn survives_round_trip() {
        let mut settings = Settings::default();
        settings.set_color(&Color::from_rgb(1, 2, 3));
        settings.set_window_position(10, 20);
        settings.persisted.tab = ColorModel::Hsv;
        let text = settings.to_toml().unwrap();
        assert!(text.contains("color = \"010203\""), "{text}");
        let reloaded = Settings::from_toml(&text).unwrap();
        assert_eq!(reloaded.persisted, settings.persisted);
    }
}
