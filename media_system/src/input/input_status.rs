/// Button state snapshots for the keyboard, the joypad and the virtual pad
///
/// Every status answers `is_on(index)` over a flat index space; an index
/// outside that space is logged and reads as released.

use glam::IVec2;
use crate::engine_error;

const LOG_SOURCE: &str = "msys::Input";

/// Scan codes tracked on the keyboard
pub const KEYBOARD_KEY_COUNT: usize = 256;
/// Digital joypad buttons
pub const JOYPAD_BUTTON_COUNT: usize = 32;
/// Buttons plus the four stick directions
pub const JOYPAD_KEY_COUNT: usize = JOYPAD_BUTTON_COUNT + 4;
/// Logical buttons of the virtual pad
pub const VIRTUAL_KEY_COUNT: usize = 14;

/// Stick values range over `(-JOYPAD_RANGE_MAX, JOYPAD_RANGE_MAX)`
pub const JOYPAD_RANGE_MAX: i32 = 1000;
pub const JOYPAD_THRESHOLD_DEFAULT: i32 = 50;

// ===== KEYBOARD =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardStatus {
    keys: [bool; KEYBOARD_KEY_COUNT],
}

impl Default for KeyboardStatus {
    fn default() -> Self {
        Self { keys: [false; KEYBOARD_KEY_COUNT] }
    }
}

impl KeyboardStatus {
    pub fn is_on(&self, key: usize) -> bool {
        match self.keys.get(key) {
            Some(&on) => on,
            None => {
                engine_error!(LOG_SOURCE, "Invalid key: {}", key);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.keys = [false; KEYBOARD_KEY_COUNT];
    }

    pub(crate) fn set(&mut self, keys: &[bool; KEYBOARD_KEY_COUNT]) {
        self.keys = *keys;
    }
}

// ===== JOYPAD =====

/// Joypad buttons and analog stick
///
/// Indices 0..32 are buttons; 32..36 are the stick directions down, left,
/// right and up, on when the stick leaves the dead zone set by `threshold`.
/// Stick y grows downward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoypadStatus {
    buttons: [bool; JOYPAD_BUTTON_COUNT],
    stick: IVec2,
    threshold: IVec2,
}

impl Default for JoypadStatus {
    fn default() -> Self {
        Self {
            buttons: [false; JOYPAD_BUTTON_COUNT],
            stick: IVec2::ZERO,
            threshold: IVec2::splat(JOYPAD_THRESHOLD_DEFAULT),
        }
    }
}

impl JoypadStatus {
    pub const DOWN: usize = JOYPAD_BUTTON_COUNT;
    pub const LEFT: usize = JOYPAD_BUTTON_COUNT + 1;
    pub const RIGHT: usize = JOYPAD_BUTTON_COUNT + 2;
    pub const UP: usize = JOYPAD_BUTTON_COUNT + 3;

    pub fn is_on(&self, key: usize) -> bool {
        match key {
            Self::DOWN => self.stick.y > self.threshold.y,
            Self::LEFT => self.stick.x < -self.threshold.x,
            Self::RIGHT => self.stick.x > self.threshold.x,
            Self::UP => self.stick.y < -self.threshold.y,
            _ => match self.buttons.get(key) {
                Some(&on) => on,
                None => {
                    engine_error!(LOG_SOURCE, "Invalid joypad key: {}", key);
                    false
                }
            },
        }
    }

    /// Release every button and center the stick; the threshold is kept
    pub fn reset(&mut self) {
        self.buttons = [false; JOYPAD_BUTTON_COUNT];
        self.stick = IVec2::ZERO;
    }

    pub fn stick(&self) -> IVec2 {
        self.stick
    }

    pub fn threshold(&self) -> IVec2 {
        self.threshold
    }

    pub(crate) fn set(&mut self, buttons: &[bool; JOYPAD_BUTTON_COUNT], stick: IVec2) {
        self.buttons = *buttons;
        self.stick = stick;
    }

    pub(crate) fn set_threshold(&mut self, threshold: IVec2) {
        self.threshold = threshold;
    }
}

// ===== VIRTUAL PAD =====

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualStatus {
    keys: [bool; VIRTUAL_KEY_COUNT],
}

impl VirtualStatus {
    pub fn is_on(&self, key: usize) -> bool {
        match self.keys.get(key) {
            Some(&on) => on,
            None => {
                engine_error!(LOG_SOURCE, "Invalid virtual key: {}", key);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.keys = [false; VIRTUAL_KEY_COUNT];
    }

    pub(crate) fn press(&mut self, key: usize) {
        if let Some(slot) = self.keys.get_mut(key) {
            *slot = true;
        }
    }

    /// Keys on here and off in `previous`
    pub(crate) fn rising_edges(&self, previous: &VirtualStatus) -> VirtualStatus {
        let mut pressed = VirtualStatus::default();
        for (i, slot) in pressed.keys.iter_mut().enumerate() {
            *slot = self.keys[i] && !previous.keys[i];
        }
        pressed
    }
}

// ===== ANY DEVICE =====

/// Status of any input device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputStatus {
    Keyboard(KeyboardStatus),
    Joypad(JoypadStatus),
    Virtual(VirtualStatus),
}

impl InputStatus {
    pub fn is_on(&self, key: usize) -> bool {
        match self {
            InputStatus::Keyboard(status) => status.is_on(key),
            InputStatus::Joypad(status) => status.is_on(key),
            InputStatus::Virtual(status) => status.is_on(key),
        }
    }

    pub fn reset(&mut self) {
        match self {
            InputStatus::Keyboard(status) => status.reset(),
            InputStatus::Joypad(status) => status.reset(),
            InputStatus::Virtual(status) => status.reset(),
        }
    }

    /// Number of valid indices
    pub fn key_count(&self) -> usize {
        match self {
            InputStatus::Keyboard(_) => KEYBOARD_KEY_COUNT,
            InputStatus::Joypad(_) => JOYPAD_KEY_COUNT,
            InputStatus::Virtual(_) => VIRTUAL_KEY_COUNT,
        }
    }
}

#[cfg(test)]
#[path = "input_status_tests.rs"]
mod tests;
