//! Global mouse event hook for click capture.
//!
//! Captures button events anywhere on screen and stamps them with the
//! cursor position tracked from mouse-move events (rdev button events
//! carry no coordinates of their own).
//!
//! All platforms use the rdev crate: its macOS thread-safety caveats
//! concern keyboard character resolution, which this hook never touches.

use crossbeam_channel::{bounded, Receiver};
use hexpick_core::MouseButton;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

mod rdev_impl;

/// A mouse click captured by the hook.
#[derive(Debug, Clone, Copy)]
pub struct ClickEvent {
    /// Screen x coordinate of the cursor at click time.
    pub x: i32,
    /// Screen y coordinate of the cursor at click time.
    pub y: i32,
    /// Which button changed state.
    pub button: MouseButton,
    /// True for press, false for release.
    pub pressed: bool,
}

/// Handle to the hook subscription. Owned by the capture runner; exactly
/// one exists per active capture session.
pub struct InputHookHandle {
    event_rx: Receiver<ClickEvent>,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl InputHookHandle {
    /// Try to receive a click (non-blocking).
    pub fn try_recv(&self) -> Option<ClickEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Receive all pending clicks, in delivery order.
    pub fn drain(&self) -> Vec<ClickEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Signal the hook to stop. No click is forwarded after this returns.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Check if the hook is still forwarding events.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
            && self.thread.as_ref().map_or(false, |t| !t.is_finished())
    }
}

impl Drop for InputHookHandle {
    fn drop(&mut self) {
        self.stop();
        // Take the thread handle but don't join it - the listener blocks
        // inside the OS hook and cannot be interrupted from here.
        let _ = self.thread.take();
    }
}

/// Start capturing global mouse clicks.
///
/// Returns a handle that can be used to receive clicks and stop the hook.
pub fn start_input_hook() -> InputHookHandle {
    let (event_tx, event_rx) = bounded(1024);
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    let thread = thread::spawn(move || {
        rdev_impl::start_hook(event_tx, running_clone);
    });

    InputHookHandle {
        event_rx,
        running,
        thread: Some(thread),
    }
}
