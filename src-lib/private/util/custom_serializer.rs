// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

/// Serialize a u32-packed RGB color as a hex string, because editing a decimal u32 by hand is awful.
/// The alpha byte is dropped on the way out and ignored on the way in.
pub mod rgb_color {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:06X}", color & 0x00FF_FFFF))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix('#').unwrap_or(&s);
        if s.len() != 6 {
            return Err(serde::de::Error::custom(format!("expected 6 hex digits, got \"{s}\"")));
        }
        u32::from_str_radix(s, 16).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test_rgb_color {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Wrapper {
        #[serde(with = "super::rgb_color")]
        color: u32,
    }

    #[test]
    fn serializes_upper_case_without_alpha() {
        let text = toml::to_string(&Wrapper { color: 0xFF17_1721 }).unwrap();
        assert_eq!(text.trim(), "color = \"171721\"");
    }

    #[test]
    fn accepts_leading_hash() {
        let wrapper: Wrapper = toml::from_str("color = \"#a0b0c0\"").unwrap();
        assert_eq!(wrapper.color, 0xA0B0C0);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(toml::from_str::<Wrapper>("color = \"FFF\"").is_err());
    }
}
