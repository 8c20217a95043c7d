//! Color picker runner.
//!
//! Owns the capture controller and the global hook subscription on a
//! background thread. The hook delivers clicks on its own thread; they
//! reach the UI only through this runner's event channel and a Tauri
//! event emit, never by touching UI state directly.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use hexpick_core::{CaptureController, CaptureEvent, CaptureState, ExclusionZone, Rgb};
use hexpick_platform::{start_input_hook, ScreenSampler};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{info, warn};

/// Event emitted by the picker runner for the frontend.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type")]
pub enum PickerEvent {
    /// Capture armed, hook subscribed.
    Started,
    /// A click was accepted and sampled.
    ColorCaptured { x: i32, y: i32, hex: String, rgb: Rgb },
    /// Pause toggled; output frozen while `paused`.
    PauseToggled { paused: bool },
    /// Capture stopped, output cleared, hook released.
    Stopped,
}

/// Commands sent to the runner thread.
#[derive(Debug)]
pub enum PickerCommand {
    /// Stop capture and exit the runner.
    Stop,
    /// Flip Armed <-> Paused.
    TogglePause,
    /// Update the screen region that must never be sampled.
    SetExclusionZone(Option<ExclusionZone>),
}

/// Status snapshot for the frontend.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PickerStatus {
    pub running: bool,
    pub state: CaptureState,
}

/// Handle to control the picker runner.
pub struct PickerHandle {
    cmd_tx: Sender<PickerCommand>,
    state: Arc<Mutex<CaptureState>>,
    thread: Option<JoinHandle<()>>,
}

impl PickerHandle {
    /// Send a command to the runner.
    pub fn send(&self, cmd: PickerCommand) {
        if let Err(e) = self.cmd_tx.send(cmd) {
            warn!("failed to send command to picker: {}", e);
        }
    }

    /// Get the controller state as last published by the runner.
    pub fn state(&self) -> CaptureState {
        *self.state.lock().unwrap()
    }

    /// Check if the runner thread is still alive.
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().map_or(false, |t| !t.is_finished())
    }

    /// Stop and wait for the runner to release the hook.
    ///
    /// After this returns no click delivery can reach the UI.
    pub fn shutdown(mut self) {
        let _ = self.cmd_tx.send(PickerCommand::Stop);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for PickerHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(PickerCommand::Stop);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Start the picker runner.
///
/// Returns a handle plus the event stream for forwarding to the webview.
/// One hook subscription exists per runner; the double-start guard in the
/// command layer keeps this a singleton.
pub fn start_picker(
    exclusion: Option<ExclusionZone>,
) -> (PickerHandle, Receiver<PickerEvent>) {
    let (cmd_tx, cmd_rx) = bounded(32);
    let (event_tx, event_rx) = bounded(256);
    let state = Arc::new(Mutex::new(CaptureState::Idle));
    let state_clone = state.clone();

    let thread = thread::spawn(move || {
        run_picker_loop(exclusion, cmd_rx, event_tx, state_clone);
    });

    (
        PickerHandle {
            cmd_tx,
            state,
            thread: Some(thread),
        },
        event_rx,
    )
}

/// Main loop: arm the controller, subscribe the hook, pump clicks and
/// commands until stopped.
fn run_picker_loop(
    exclusion: Option<ExclusionZone>,
    cmd_rx: Receiver<PickerCommand>,
    event_tx: Sender<PickerEvent>,
    state: Arc<Mutex<CaptureState>>,
) {
    info!("picker runner started");

    let mut controller = CaptureController::new(ScreenSampler);
    controller.set_exclusion_zone(exclusion);

    // new() leaves the controller Idle, so arming cannot fail here.
    if let Err(e) = controller.start() {
        warn!(%e, "failed to arm controller");
        return;
    }
    *state.lock().unwrap() = controller.state();

    // Subscribed only after arming succeeded: a rejected double-start can
    // never have created a second subscription.
    let hook = start_input_hook();
    let _ = event_tx.send(PickerEvent::Started);

    loop {
        // Commands first, so a stop wins over queued clicks.
        match cmd_rx.try_recv() {
            Ok(PickerCommand::Stop) => break,
            Ok(PickerCommand::TogglePause) => {
                if let Ok(CaptureEvent::StateChanged { new, .. }) = controller.toggle_pause() {
                    *state.lock().unwrap() = new;
                    let _ = event_tx.send(PickerEvent::PauseToggled {
                        paused: new == CaptureState::Paused,
                    });
                }
            }
            Ok(PickerCommand::SetExclusionZone(zone)) => {
                controller.set_exclusion_zone(zone);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        // Clicks in delivery order; the controller filters and samples.
        for click in hook.drain() {
            if let Some(CaptureEvent::SampleCaptured { sample, hex }) =
                controller.on_click(click.x, click.y, click.button, click.pressed)
            {
                let _ = event_tx.send(PickerEvent::ColorCaptured {
                    x: sample.x,
                    y: sample.y,
                    hex,
                    rgb: sample.rgb,
                });
            }
        }

        // Small sleep to avoid busy loop
        thread::sleep(Duration::from_millis(5));
    }

    // Release the hook before reporting the stop so no click delivery
    // can follow a completed stop.
    hook.stop();
    drop(hook);

    if let Ok(CaptureEvent::StateChanged { new, .. }) = controller.stop() {
        *state.lock().unwrap() = new;
    }
    let _ = event_tx.send(PickerEvent::Stopped);

    info!("picker runner exited");
}
