#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod picker;
mod state;

use hexpick_core::{CaptureState, ExclusionZone, UiTheme};
use picker::{start_picker, PickerCommand, PickerEvent, PickerStatus};
use state::AppState;
use tauri::{AppHandle, Emitter, State};
use tracing::warn;

/// Event channel name the frontend subscribes to.
const PICKER_EVENT: &str = "picker://event";

#[tauri::command]
fn start_capture(
    app: AppHandle,
    state: State<'_, AppState>,
    exclusion: Option<ExclusionZone>,
) -> Result<(), String> {
    let mut guard = state.picker.lock().unwrap();

    // Reject double-start before any new subscription can be created.
    if guard.as_ref().map_or(false, |h| h.is_running()) {
        return Err("already capturing".into());
    }

    let (handle, event_rx) = start_picker(exclusion);
    spawn_event_forwarder(app, event_rx);
    *guard = Some(handle);
    Ok(())
}

#[tauri::command]
fn stop_capture(state: State<'_, AppState>) -> Result<(), String> {
    let handle = state.picker.lock().unwrap().take();
    match handle {
        // shutdown joins the runner, so the hook is released before the
        // command returns and no late click can repaint a reset UI.
        Some(handle) => {
            handle.shutdown();
            Ok(())
        }
        None => Err("not capturing".into()),
    }
}

#[tauri::command]
fn toggle_pause(state: State<'_, AppState>) -> Result<(), String> {
    let guard = state.picker.lock().unwrap();
    match guard.as_ref().filter(|h| h.is_running()) {
        Some(handle) => {
            handle.send(PickerCommand::TogglePause);
            Ok(())
        }
        None => Err("not capturing".into()),
    }
}

#[tauri::command]
fn set_exclusion_zone(
    state: State<'_, AppState>,
    zone: Option<ExclusionZone>,
) -> Result<(), String> {
    let guard = state.picker.lock().unwrap();
    if let Some(handle) = guard.as_ref().filter(|h| h.is_running()) {
        handle.send(PickerCommand::SetExclusionZone(zone));
    }
    // Silently accepted while idle: the zone is passed again on start.
    Ok(())
}

#[tauri::command]
fn capture_status(state: State<'_, AppState>) -> PickerStatus {
    let guard = state.picker.lock().unwrap();
    match guard.as_ref().filter(|h| h.is_running()) {
        Some(handle) => PickerStatus {
            running: true,
            state: handle.state(),
        },
        None => PickerStatus {
            running: false,
            state: CaptureState::Idle,
        },
    }
}

#[tauri::command]
fn get_theme() -> UiTheme {
    UiTheme::default()
}

/// Forward runner events to the webview. Exits when the runner drops its
/// sender, so one forwarder lives exactly as long as one capture session.
fn spawn_event_forwarder(app: AppHandle, event_rx: crossbeam_channel::Receiver<PickerEvent>) {
    std::thread::spawn(move || {
        for event in event_rx.iter() {
            if let Err(e) = app.emit(PICKER_EVENT, &event) {
                warn!("failed to emit picker event: {}", e);
            }
        }
    });
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexpick_tauri=info,tauri=info".into()),
        )
        .try_init();
}

fn main() {
    init_logging();

    tauri::Builder::default()
        .manage(AppState::new())
        .invoke_handler(tauri::generate_handler![
            start_capture,
            stop_capture,
            toggle_pause,
            set_exclusion_zone,
            capture_status,
            get_theme
        ])
        .run(tauri::generate_context!())
        .expect("error while running hexpick");
}
