//! rdev-based implementation of the global mouse hook.

use super::ClickEvent;
use crossbeam_channel::Sender;
use hexpick_core::MouseButton;
use rdev::{listen, Event, EventType};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

fn map_button(button: rdev::Button) -> MouseButton {
    match button {
        rdev::Button::Left => MouseButton::Left,
        rdev::Button::Right => MouseButton::Right,
        rdev::Button::Middle => MouseButton::Middle,
        _ => MouseButton::Unknown,
    }
}

/// Run the rdev listener, forwarding click events until `running` clears.
///
/// Blocks for the lifetime of the OS hook; the stop signal gates
/// forwarding rather than tearing the hook down (rdev's `listen` cannot
/// be interrupted).
pub fn start_hook(event_tx: Sender<ClickEvent>, running: Arc<AtomicBool>) {
    info!("input hook thread started (rdev)");

    // Cursor position from the most recent move event, stamped onto
    // button events which arrive without coordinates.
    let mut last_pos: (i32, i32) = (0, 0);

    let callback = move |event: Event| {
        if !running.load(Ordering::SeqCst) {
            return;
        }

        let click = match event.event_type {
            EventType::MouseMove { x, y } => {
                last_pos = (x as i32, y as i32);
                None
            }
            EventType::ButtonPress(button) => Some(ClickEvent {
                x: last_pos.0,
                y: last_pos.1,
                button: map_button(button),
                pressed: true,
            }),
            EventType::ButtonRelease(button) => Some(ClickEvent {
                x: last_pos.0,
                y: last_pos.1,
                button: map_button(button),
                pressed: false,
            }),
            // Keyboard and wheel events are not our concern.
            _ => None,
        };

        if let Some(click) = click {
            if let Err(e) = event_tx.try_send(click) {
                warn!("failed to forward click event: {}", e);
            }
        }
    };

    if let Err(err) = listen(callback) {
        error!(?err, "input hook error");
    }

    info!("input hook thread exiting");
}
