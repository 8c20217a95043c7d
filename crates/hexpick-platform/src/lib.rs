//! hexpick-platform: platform-specific I/O boundary for hexpick.
//!
//! This crate provides:
//! - Global mouse hook for click capture via `rdev`
//! - Screen pixel color reading (GDI on Windows, `xcap` elsewhere)
//!
//! ## Module Structure
//!
//! - `error` - Common error types
//! - `input_hook` - Global mouse event hooking
//! - `pixel` - Screen pixel sampling

mod error;
mod input_hook;
mod pixel;

// Re-export error types
pub use error::{PlatformError, PlatformResult};

// Re-export input hook
pub use input_hook::{start_input_hook, ClickEvent, InputHookHandle};

// Re-export pixel sampling
pub use pixel::{sample_pixel, ScreenSampler};
