//! Application state for Tauri backend.

use crate::picker::PickerHandle;
use std::sync::Mutex;

/// Global application state.
///
/// At most one picker runner (and therefore one hook subscription)
/// exists at a time.
pub struct AppState {
    pub picker: Mutex<Option<PickerHandle>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            picker: Mutex::new(None),
        }
    }
}
