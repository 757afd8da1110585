/// Input state: device snapshots mapped onto a 14 button virtual pad
///
/// Device polling happens outside the crate; each frame the caller hands a
/// `RawInput` snapshot to `update`, which refreshes the keyboard and
/// joypad statuses, recomputes the virtual pad through the key bindings
/// and derives the buttons pressed since the previous frame.

use glam::IVec2;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::{engine_error, engine_report};
use super::input_status::*;

const LOG_SOURCE: &str = "msys::Input";

/// Keyboard scan codes
pub mod scan_code {
    pub const ESCAPE: u8 = 0x01;
    pub const LCONTROL: u8 = 0x1D;
    pub const RETURN: u8 = 0x1C;
    pub const A: u8 = 0x1E;
    pub const S: u8 = 0x1F;
    pub const D: u8 = 0x20;
    pub const LSHIFT: u8 = 0x2A;
    pub const Z: u8 = 0x2C;
    pub const X: u8 = 0x2D;
    pub const C: u8 = 0x2E;
    pub const V: u8 = 0x2F;
    pub const SPACE: u8 = 0x39;
    pub const UP: u8 = 0xC8;
    pub const LEFT: u8 = 0xCB;
    pub const RIGHT: u8 = 0xCD;
    pub const DOWN: u8 = 0xD0;
}

/// Logical button of the virtual pad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VirtualKey {
    Down,
    Left,
    Right,
    Up,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
}

impl VirtualKey {
    pub const ALL: [VirtualKey; VIRTUAL_KEY_COUNT] = [
        VirtualKey::Down,
        VirtualKey::Left,
        VirtualKey::Right,
        VirtualKey::Up,
        VirtualKey::A,
        VirtualKey::B,
        VirtualKey::C,
        VirtualKey::D,
        VirtualKey::E,
        VirtualKey::F,
        VirtualKey::G,
        VirtualKey::H,
        VirtualKey::I,
        VirtualKey::J,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Directions are bound to the arrow keys and the stick for good
    pub fn is_direction(self) -> bool {
        matches!(self, VirtualKey::Down | VirtualKey::Left | VirtualKey::Right | VirtualKey::Up)
    }
}

/// Joypad input: a numbered button or a stick direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoypadKey {
    Button(u8),
    Down,
    Left,
    Right,
    Up,
}

impl JoypadKey {
    /// Index into `JoypadStatus`
    ///
    /// Buttons past 31 alias the stick directions; callers check the range.
    pub fn index(self) -> usize {
        match self {
            JoypadKey::Button(n) => n as usize,
            JoypadKey::Down => JoypadStatus::DOWN,
            JoypadKey::Left => JoypadStatus::LEFT,
            JoypadKey::Right => JoypadStatus::RIGHT,
            JoypadKey::Up => JoypadStatus::UP,
        }
    }
}

/// One frame of raw device state
///
/// `None` marks a device that is absent or could not be read this frame;
/// its status reads as fully released.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    pub keyboard: Option<[bool; KEYBOARD_KEY_COUNT]>,
    pub joypad: Option<RawJoypad>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawJoypad {
    pub buttons: [bool; JOYPAD_BUTTON_COUNT],
    /// Stick position, each axis in `(-1000, 1000)`, y growing downward
    pub stick: IVec2,
}

impl RawInput {
    /// Mark `code` as held
    pub fn with_key(mut self, code: u8) -> Self {
        self.keyboard.get_or_insert([false; KEYBOARD_KEY_COUNT])[code as usize] = true;
        self
    }

    /// Mark joypad button `n` as held; numbers past the last button are ignored
    pub fn with_button(mut self, n: u8) -> Self {
        let joypad = self.joypad.get_or_insert_with(RawJoypad::default);
        if let Some(button) = joypad.buttons.get_mut(n as usize) {
            *button = true;
        }
        self
    }

    pub fn with_stick(mut self, x: i32, y: i32) -> Self {
        self.joypad.get_or_insert_with(RawJoypad::default).stick = IVec2::new(x, y);
        self
    }
}

/// Which status `InputState::status` returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    Joypad,
    Virtual,
    /// Virtual buttons that went down this frame
    VirtualPressed,
}

pub struct InputState {
    keyboard: KeyboardStatus,
    joypad: JoypadStatus,
    virtual_status: VirtualStatus,
    last_virtual: VirtualStatus,
    pressed: VirtualStatus,
    key_bindings: FxHashMap<u8, VirtualKey>,
    joypad_bindings: FxHashMap<JoypadKey, VirtualKey>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Empty state with the fixed direction bindings
    pub fn new() -> Self {
        let key_bindings = FxHashMap::from_iter([
            (scan_code::DOWN, VirtualKey::Down),
            (scan_code::LEFT, VirtualKey::Left),
            (scan_code::RIGHT, VirtualKey::Right),
            (scan_code::UP, VirtualKey::Up),
        ]);
        let joypad_bindings = FxHashMap::from_iter([
            (JoypadKey::Down, VirtualKey::Down),
            (JoypadKey::Left, VirtualKey::Left),
            (JoypadKey::Right, VirtualKey::Right),
            (JoypadKey::Up, VirtualKey::Up),
        ]);

        Self {
            keyboard: KeyboardStatus::default(),
            joypad: JoypadStatus::default(),
            virtual_status: VirtualStatus::default(),
            last_virtual: VirtualStatus::default(),
            pressed: VirtualStatus::default(),
            key_bindings,
            joypad_bindings,
        }
    }

    /// Bind a keyboard key and a joypad button to a virtual button
    ///
    /// A key or button bound earlier to another virtual button moves to
    /// this one. Several keys may drive the same virtual button.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a direction (they are fixed), for a scan code or
    /// joypad key that drives a direction, or for a button number past 31.
    pub fn set_virtual_key(&mut self, virtual_key: VirtualKey, key: u8, joypad_key: JoypadKey) -> Result<()> {
        if virtual_key.is_direction() {
            return Err(engine_report!(
                LOG_SOURCE,
                Error::InvalidInput(format!("arrow keys cannot be customized ({:?})", virtual_key))
            ));
        }
        if self.key_bindings.get(&key).is_some_and(|bound| bound.is_direction()) {
            return Err(engine_report!(
                LOG_SOURCE,
                Error::InvalidInput(format!("key {:#04x} is bound to a direction", key))
            ));
        }
        match joypad_key {
            JoypadKey::Button(n) if (n as usize) < JOYPAD_BUTTON_COUNT => {}
            JoypadKey::Button(n) => {
                return Err(engine_report!(LOG_SOURCE, Error::InvalidInput(format!("invalid joypad key: {}", n))));
            }
            direction => {
                return Err(engine_report!(
                    LOG_SOURCE,
                    Error::InvalidInput(format!("joypad {:?} is bound to a direction", direction))
                ));
            }
        }

        self.key_bindings.insert(key, virtual_key);
        self.joypad_bindings.insert(joypad_key, virtual_key);
        Ok(())
    }

    /// Set the stick dead zone
    ///
    /// Each axis must lie in `(0, 1000)`; an out of range value is logged
    /// and replaced by 50.
    pub fn set_joypad_threshold(&mut self, x: i32, y: i32) {
        let checked = |value: i32| {
            if value <= 0 || value >= JOYPAD_RANGE_MAX {
                engine_error!(LOG_SOURCE, "Invalid threshold: {}", value);
                JOYPAD_THRESHOLD_DEFAULT
            } else {
                value
            }
        };
        self.joypad.set_threshold(IVec2::new(checked(x), checked(y)));
    }

    /// Take this frame's device snapshot
    pub fn update(&mut self, raw: &RawInput) {
        match &raw.keyboard {
            Some(keys) => self.keyboard.set(keys),
            None => self.keyboard.reset(),
        }
        match &raw.joypad {
            Some(joypad) => self.joypad.set(&joypad.buttons, joypad.stick),
            None => self.joypad.reset(),
        }

        self.virtual_status.reset();
        for (&key, virtual_key) in &self.key_bindings {
            if self.keyboard.is_on(key as usize) {
                self.virtual_status.press(virtual_key.index());
            }
        }
        for (joypad_key, virtual_key) in &self.joypad_bindings {
            if self.joypad.is_on(joypad_key.index()) {
                self.virtual_status.press(virtual_key.index());
            }
        }

        self.pressed = self.virtual_status.rising_edges(&self.last_virtual);
        self.last_virtual = self.virtual_status.clone();
    }

    /// Whether keyboard key `code` is held
    pub fn keyboard(&self, code: u8) -> bool {
        self.keyboard.is_on(code as usize)
    }

    /// Whether a joypad button or stick direction is on
    ///
    /// A button number past 31 is logged and reads as off.
    pub fn joypad(&self, key: JoypadKey) -> bool {
        if let JoypadKey::Button(n) = key {
            if n as usize >= JOYPAD_BUTTON_COUNT {
                engine_error!(LOG_SOURCE, "Invalid joypad button: {}", n);
                return false;
            }
        }
        self.joypad.is_on(key.index())
    }

    /// Whether a virtual button is held
    pub fn virtual_status(&self, key: VirtualKey) -> bool {
        self.virtual_status.is_on(key.index())
    }

    /// Whether a virtual button went down this frame
    pub fn virtual_pressed(&self, key: VirtualKey) -> bool {
        self.pressed.is_on(key.index())
    }

    /// Copy of one status, e.g. to compare frames
    pub fn status(&self, source: InputSource) -> InputStatus {
        match source {
            InputSource::Keyboard => InputStatus::Keyboard(self.keyboard.clone()),
            InputSource::Joypad => InputStatus::Joypad(self.joypad.clone()),
            InputSource::Virtual => InputStatus::Virtual(self.virtual_status.clone()),
            InputSource::VirtualPressed => InputStatus::Virtual(self.pressed.clone()),
        }
    }

    pub fn joypad_threshold(&self) -> IVec2 {
        self.joypad.threshold()
    }
}

#[cfg(test)]
#[path = "input_state_tests.rs"]
mod tests;
