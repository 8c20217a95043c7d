//! hexpick-core: domain model + capture state machine.
//!
//! Design goal: keep this crate UI-agnostic and platform-agnostic.
//! Platform specific I/O (global hook, screen reads) lives in
//! `hexpick-platform`.

mod color;
mod controller;

pub use color::{ColorSample, ExclusionZone, Rgb};
pub use controller::{
    CaptureController, CaptureError, CaptureEvent, CaptureState, PixelSampler, SampleError,
};

use serde::{Deserialize, Serialize};

/// Mouse button identity as reported by the input hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Unknown,
}

/// UI color scheme served to the frontend. Affordances are derived from
/// [`CaptureState`], never the reverse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiTheme {
    /// Start button background while idle.
    pub start: String,
    /// Start/Stop button background while armed.
    pub stop: String,
    /// Muted scheme applied to labels and the button while paused.
    pub paused: String,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            start: "#366FC9".into(),
            stop: "#F2433D".into(),
            paused: "#A2A2A2".into(),
        }
    }
}
