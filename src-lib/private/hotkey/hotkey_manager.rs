// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Hotkey input system.
//!
//! The idea here is to do as much work as possible up front once, thereby minimizing
//! the hot part of it: polling the keyboard state and extracting what we care about.
//!
//! We care about if certain key combinations are pressed. To make this really fast, I make
//! heavy use of bitmasks.

use serde::{Deserialize, Serialize};

use crate::private::platform::KeyboardState;

use super::Keycode;

/// the number of bits in this mask is the number of distinct keys that can be used across all keybinds
type Bitmask = u32;
type KeyBinding = Vec<Keycode>;

/// format user can specify keybindings with
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// start a pick, or cancel the one in progress
    pub pick_color: KeyBinding,
    pub cancel_pick: KeyBinding,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            pick_color: vec![Keycode::LControl, Keycode::LAlt, Keycode::P],
            cancel_pick: vec![Keycode::Escape],
        }
    }
}

struct KeyBuffer {
    lookup_table: [Bitmask; Keycode::NUM_VARIANTS],
    pick_color_mask: Bitmask,
    cancel_pick_mask: Bitmask,
}

impl KeyBuffer {
    fn new(key_bindings: &KeyBindings) -> Result<KeyBuffer, &'static str> {
        // build the lookup table and compute each hotkeys bitmask combination
        let mut bit = 1;
        let mut lookup_table = [0; Keycode::NUM_VARIANTS];
        let pick_color_mask =
            Self::update_key_buffer_values(&key_bindings.pick_color, &mut bit, &mut lookup_table)?;
        let cancel_pick_mask =
            Self::update_key_buffer_values(&key_bindings.cancel_pick, &mut bit, &mut lookup_table)?;

        Ok(KeyBuffer {
            lookup_table,
            pick_color_mask,
            cancel_pick_mask,
        })
    }

    /// - `key_combination`: a set of keys to use for a specific hotkey action
    /// - `bit`: a bitmask with a single bit set which is used to represent a single key. For example,
    ///   Ctrl might end up as 0b1. This bit is shifted for each distinct key we use.
    /// - `lookup_table`: a lookup table where each item is a key. A value of zero indicates no hotkey
    ///   uses this key. A nonzero value indicates at least one hotkey uses this key.
    ///
    /// This function is called for each hotkey you want to register, and it returns bitmask
    /// representing which keys must be pressed for that hotkey. Each key used as part of the hotkey
    /// system is assigned a unique bit in this masking scheme. This means if a u32 is used as the
    /// bitmask type then only 32 distinct keys may be used across all hotkeys.
    fn update_key_buffer_values(
        key_combination: &[Keycode],
        bit: &mut Bitmask,
        lookup_table: &mut [Bitmask],
    ) -> Result<Bitmask, &'static str> {
        if key_combination.is_empty() {
            return Err("A key binding must use at least one key.");
        }
        let mut mask: Bitmask = 0;
        for keycode in key_combination {
            let lookup_table_mask = &mut lookup_table[keycode.index()];
            if *lookup_table_mask == 0 {
                // if the previous shift overflowed the mask will be zero
                if *bit == 0 {
                    return Err("Only 32 distinct keys may be used for hotkeys at this time. Congratulations if you're seeing this, as I didn't think anyone would be crazy enough to use that many keys.");
                }

                // generate a new mask and add to the table
                *lookup_table_mask = *bit;
                *bit <<= 1;
            }
            mask |= *lookup_table_mask;
        }
        Ok(mask)
    }

    /// Get the bitmask that corresponds to this specific key. This returns a mask with a single bit
    /// set for keys used in any hotkey, and returns zero for keys not used in any hotkey.
    #[inline(always)]
    fn keycode_to_mask(&self, keycode: &Keycode) -> Bitmask {
        self.lookup_table[keycode.index()]
    }

    /// Generate the bitmask that corresponds to the currently pressed key combination.
    fn update(&self, buf: &mut Bitmask, keys: &[Keycode]) {
        *buf = 0;
        for keycode in keys {
            *buf |= self.keycode_to_mask(keycode);
        }
    }

    /// Check if the currently pressed keys contain the "pick_color" key combination
    fn pick_color(&self, buf: Bitmask) -> bool {
        buf & self.pick_color_mask == self.pick_color_mask
    }

    /// Check if the currently pressed keys contain the "cancel_pick" key combination
    fn cancel_pick(&self, buf: Bitmask) -> bool {
        buf & self.cancel_pick_mask == self.cancel_pick_mask
    }
}

pub struct HotkeyManager<KS>
where
    KS: KeyboardState,
{
    previous_state: Bitmask,
    current_state: Bitmask,
    key_buffer: KeyBuffer,
    keyboard_state: KS,
}

impl<KS> HotkeyManager<KS>
where
    KS: KeyboardState,
{
    pub fn new_generic(key_bindings: &KeyBindings) -> Result<HotkeyManager<KS>, &'static str> {
        Ok(HotkeyManager {
            previous_state: 0,
            current_state: 0,
            key_buffer: KeyBuffer::new(key_bindings)?,
            keyboard_state: KS::default(),
        })
    }

    pub fn poll_keys(&mut self) {
        self.keyboard_state.poll();
    }

    /// updates state with current key data
    pub fn process_keys(&mut self) {
        self.previous_state = self.current_state;
        self.key_buffer.update(&mut self.current_state, self.keyboard_state.get_state());
    }

    /// check if "pick_color" key combination was just pressed
    pub fn pick_color(&self) -> bool {
        let key_buffer = &self.key_buffer;
        !key_buffer.pick_color(self.previous_state) && key_buffer.pick_color(self.current_state)
    }

    /// check if "cancel_pick" key combination was just pressed
    pub fn cancel_pick(&self) -> bool {
        let key_buffer = &self.key_buffer;
        !key_buffer.cancel_pick(self.previous_state) && key_buffer.cancel_pick(self.current_state)
    }

    #[cfg(test)]
    fn keyboard_state_mut(&mut self) -> &mut KS {
        &mut self.keyboard_state
    }
}

#[cfg(test)]
mod test_hotkey_manager {
    use super::*;

    /// keyboard that reports whatever the test last pressed
    #[derive(Default)]
    struct FakeKeyboard {
        pending: Vec<Keycode>,
        keys: Vec<Keycode>,
    }

    impl KeyboardState for FakeKeyboard {
        fn poll(&mut self) {
            self.keys = self.pending.clone();
        }

        fn get_state(&self) -> &[Keycode] {
            &self.keys
        }
    }

    fn tick(manager: &mut HotkeyManager<FakeKeyboard>, keys: &[Keycode]) {
        manager.keyboard_state_mut().pending = keys.to_vec();
        manager.poll_keys();
        manager.process_keys();
    }

    fn manager() -> HotkeyManager<FakeKeyboard> {
        HotkeyManager::new_generic(&KeyBindings::default()).unwrap()
    }

    #[test]
    fn combination_fires_on_rising_edge_only() {
        let mut manager = manager();
        tick(&mut manager, &[Keycode::LControl, Keycode::LAlt]);
        assert!(!manager.pick_color());
        tick(&mut manager, &[Keycode::LControl, Keycode::LAlt, Keycode::P]);
        assert!(manager.pick_color());
        tick(&mut manager, &[Keycode::LControl, Keycode::LAlt, Keycode::P]);
        assert!(!manager.pick_color());
        tick(&mut manager, &[Keycode::LControl, Keycode::LAlt]);
        tick(&mut manager, &[Keycode::LControl, Keycode::LAlt, Keycode::P]);
        assert!(manager.pick_color());
    }

    #[test]
    fn extra_keys_do_not_block() {
        let mut manager = manager();
        tick(&mut manager, &[Keycode::LShift, Keycode::LControl, Keycode::P, Keycode::LAlt, Keycode::Z]);
        assert!(manager.pick_color());
        assert!(!manager.cancel_pick());
    }

    #[test]
    fn cancel() {
        let mut manager = manager();
        tick(&mut manager, &[Keycode::Escape]);
        assert!(manager.cancel_pick());
        tick(&mut manager, &[]);
        assert!(!manager.cancel_pick());
    }

    #[test]
    fn shared_keys_share_bits() {
        let bindings = KeyBindings {
            pick_color: vec![Keycode::LControl, Keycode::P],
            cancel_pick: vec![Keycode::LControl, Keycode::Escape],
        };
        let buffer = KeyBuffer::new(&bindings).unwrap();
        assert_eq!(buffer.pick_color_mask, 0b011);
        assert_eq!(buffer.cancel_pick_mask, 0b101);
    }

    #[test]
    fn too_many_keys() {
        let mut keys = vec![
            Keycode::Key0, Keycode::Key1, Keycode::Key2, Keycode::Key3, Keycode::Key4,
            Keycode::Key5, Keycode::Key6, Keycode::Key7, Keycode::Key8, Keycode::Key9,
            Keycode::A, Keycode::B, Keycode::C, Keycode::D, Keycode::E, Keycode::F,
            Keycode::G, Keycode::H, Keycode::I, Keycode::J, Keycode::K, Keycode::L,
            Keycode::M, Keycode::N, Keycode::O, Keycode::P, Keycode::Q, Keycode::R,
            Keycode::S, Keycode::T, Keycode::U, Keycode::V,
        ];
        let bindings = KeyBindings {
            pick_color: keys.clone(),
            cancel_pick: vec![Keycode::A],
        };
        assert!(KeyBuffer::new(&bindings).is_ok());

        keys.push(Keycode::W);
        let bindings = KeyBindings {
            pick_color: keys,
            cancel_pick: vec![Keycode::A],
        };
        assert!(KeyBuffer::new(&bindings).is_err());
    }

    #[test]
    fn empty_binding_rejected() {
        let bindings = KeyBindings {
            pick_color: Vec::new(),
            cancel_pick: vec![Keycode::Escape],
        };
        assert!(KeyBuffer::new(&bindings).is_err());
    }

    #[test]
    fn missing_binding_uses_default() {
        let bindings: KeyBindings = toml::from_str("cancel_pick = [\"Q\"]").unwrap();
        assert_eq!(bindings.pick_color, KeyBindings::default().pick_color);
        assert_eq!(bindings.cancel_pick, vec![Keycode::Q]);
    }
}
