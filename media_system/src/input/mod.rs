//! Keyboard, joypad and virtual pad input

pub mod input_status;
pub mod input_state;

pub use input_status::{InputStatus, JoypadStatus, KeyboardStatus, VirtualStatus};
pub use input_state::{scan_code, InputSource, InputState, JoypadKey, RawInput, RawJoypad, VirtualKey};
