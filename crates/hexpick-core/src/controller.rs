//! Capture controller: the click-capture state machine.
//!
//! Single authority over [`CaptureState`], sole consumer of the pixel
//! sampler. The hook subscription itself is owned by the runner layer,
//! which creates it on `start()` and drops it on `stop()` so that the
//! subscription exists iff the controller is not idle.

use crate::{ColorSample, ExclusionZone, MouseButton, Rgb};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Activation state of the capture controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaptureState {
    /// No hook active, no output.
    #[default]
    Idle,
    /// Hook active; qualifying clicks update the output.
    Armed,
    /// Hook still subscribed, but clicks are ignored and output is frozen.
    Paused,
}

/// Events emitted by the controller for the display surface to render.
#[derive(Debug, Clone, Serialize)]
pub enum CaptureEvent {
    /// State changed.
    StateChanged { old: CaptureState, new: CaptureState },
    /// A click was accepted and sampled.
    SampleCaptured { sample: ColorSample, hex: String },
}

/// Operation invoked in a state that forbids it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{op} is not valid while {state:?}")]
pub struct CaptureError {
    pub op: &'static str,
    pub state: CaptureState,
}

/// The sampler could not resolve a color at the given coordinates
/// (off-screen point, capture failure). Recoverable: the click is dropped
/// and a later click supersedes it naturally.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("no pixel color available at ({x}, {y})")]
pub struct SampleError {
    pub x: i32,
    pub y: i32,
}

/// Seam to the platform layer: reads the screen color at a point.
///
/// Expected to be a fast, synchronous, local read.
pub trait PixelSampler {
    fn sample(&self, x: i32, y: i32) -> Result<Rgb, SampleError>;
}

impl<F> PixelSampler for F
where
    F: Fn(i32, i32) -> Result<Rgb, SampleError>,
{
    fn sample(&self, x: i32, y: i32) -> Result<Rgb, SampleError> {
        self(x, y)
    }
}

/// The capture controller state machine.
pub struct CaptureController<S: PixelSampler> {
    sampler: S,
    state: CaptureState,
    sample: Option<ColorSample>,
    exclusion: Option<ExclusionZone>,
}

impl<S: PixelSampler> CaptureController<S> {
    /// Create an idle controller around a sampler.
    pub fn new(sampler: S) -> Self {
        Self {
            sampler,
            state: CaptureState::Idle,
            sample: None,
            exclusion: None,
        }
    }

    /// Get current state.
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// The most recently accepted sample, if any.
    pub fn sample(&self) -> Option<ColorSample> {
        self.sample
    }

    /// Set or clear the screen region whose clicks are never sampled.
    pub fn set_exclusion_zone(&mut self, zone: Option<ExclusionZone>) {
        debug!(?zone, "exclusion zone updated");
        self.exclusion = zone;
    }

    /// Arm the controller. Valid only from `Idle`.
    ///
    /// The caller starts the hook subscription after this succeeds, so a
    /// rejected double-start can never create a second subscription.
    pub fn start(&mut self) -> Result<CaptureEvent, CaptureError> {
        if self.state != CaptureState::Idle {
            return Err(CaptureError { op: "start", state: self.state });
        }

        let old = self.state;
        self.state = CaptureState::Armed;

        info!("capture armed");
        Ok(CaptureEvent::StateChanged { old, new: self.state })
    }

    /// Disarm and clear the output. Valid from `Armed` or `Paused`.
    ///
    /// The caller must drop the hook subscription before reporting the
    /// stop as complete, guaranteeing no click delivery after it.
    pub fn stop(&mut self) -> Result<CaptureEvent, CaptureError> {
        if self.state == CaptureState::Idle {
            return Err(CaptureError { op: "stop", state: self.state });
        }

        let old = self.state;
        self.state = CaptureState::Idle;
        self.sample = None;

        info!("capture stopped, output cleared");
        Ok(CaptureEvent::StateChanged { old, new: self.state })
    }

    /// Flip `Armed` <-> `Paused`. Valid only while not idle.
    ///
    /// Pausing gates click acceptance only; the hook stays subscribed and
    /// the displayed output is frozen, not cleared.
    pub fn toggle_pause(&mut self) -> Result<CaptureEvent, CaptureError> {
        let old = self.state;
        self.state = match self.state {
            CaptureState::Armed => CaptureState::Paused,
            CaptureState::Paused => CaptureState::Armed,
            CaptureState::Idle => {
                return Err(CaptureError { op: "toggle_pause", state: self.state });
            }
        };

        info!(?old, new = ?self.state, "pause toggled");
        Ok(CaptureEvent::StateChanged { old, new: self.state })
    }

    /// Hook callback: one click delivered by the global input hook.
    ///
    /// Returns `None` for every filtered or failed click; the prior
    /// sample is retained in that case. Filter order:
    /// 1. clicks inside the exclusion zone are ignored regardless of state;
    /// 2. only left-button presses qualify;
    /// 3. only the `Armed` state accepts samples;
    /// 4. a sampler failure drops the click silently.
    pub fn on_click(
        &mut self,
        x: i32,
        y: i32,
        button: MouseButton,
        pressed: bool,
    ) -> Option<CaptureEvent> {
        if let Some(zone) = &self.exclusion {
            if zone.contains(x, y) {
                debug!(x, y, "click inside exclusion zone, ignored");
                return None;
            }
        }

        if !pressed || button != MouseButton::Left {
            return None;
        }

        if self.state != CaptureState::Armed {
            return None;
        }

        match self.sampler.sample(x, y) {
            Ok(rgb) => {
                let sample = ColorSample::new(x, y, rgb);
                let hex = sample.hex();
                debug!(x, y, %hex, "sample captured");
                self.sample = Some(sample);
                Some(CaptureEvent::SampleCaptured { sample, hex })
            }
            Err(err) => {
                debug!(%err, "sample unavailable, click dropped");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn fixed(rgb: Rgb) -> impl PixelSampler {
        move |_x: i32, _y: i32| -> Result<Rgb, SampleError> { Ok(rgb) }
    }

    #[test]
    fn test_start_stop_cycle() {
        let mut ctl = CaptureController::new(fixed(Rgb::new(1, 2, 3)));
        assert_eq!(ctl.state(), CaptureState::Idle);

        ctl.start().unwrap();
        assert_eq!(ctl.state(), CaptureState::Armed);

        ctl.on_click(5, 5, MouseButton::Left, true);
        assert!(ctl.sample().is_some());

        ctl.stop().unwrap();
        assert_eq!(ctl.state(), CaptureState::Idle);
        assert!(ctl.sample().is_none(), "stop must clear the output");
    }

    #[test]
    fn test_double_start_rejected() {
        let mut ctl = CaptureController::new(fixed(Rgb::default()));
        ctl.start().unwrap();

        let err = ctl.start().unwrap_err();
        assert_eq!(err.op, "start");
        assert_eq!(err.state, CaptureState::Armed);
    }

    #[test]
    fn test_stop_while_idle_rejected() {
        let mut ctl = CaptureController::new(fixed(Rgb::default()));
        assert!(ctl.stop().is_err());
    }

    #[test]
    fn test_stop_reachable_from_paused() {
        let mut ctl = CaptureController::new(fixed(Rgb::new(9, 9, 9)));
        ctl.start().unwrap();
        ctl.on_click(0, 0, MouseButton::Left, true);
        ctl.toggle_pause().unwrap();

        ctl.stop().unwrap();
        assert_eq!(ctl.state(), CaptureState::Idle);
        assert!(ctl.sample().is_none());
    }

    #[test]
    fn test_click_while_idle_ignored() {
        let mut ctl = CaptureController::new(fixed(Rgb::new(7, 7, 7)));
        assert!(ctl.on_click(10, 10, MouseButton::Left, true).is_none());
        assert!(ctl.sample().is_none());
    }

    #[test]
    fn test_click_while_paused_frozen() {
        let mut ctl = CaptureController::new(fixed(Rgb::new(34, 111, 201)));
        ctl.start().unwrap();
        ctl.on_click(1, 1, MouseButton::Left, true);
        let before = ctl.sample();

        ctl.toggle_pause().unwrap();
        assert_eq!(ctl.state(), CaptureState::Paused);

        assert!(ctl.on_click(2, 2, MouseButton::Left, true).is_none());
        assert_eq!(ctl.sample(), before, "paused output must stay frozen");
    }

    #[test]
    fn test_toggle_pause_twice_restores() {
        let mut ctl = CaptureController::new(fixed(Rgb::new(34, 111, 201)));
        ctl.start().unwrap();
        ctl.on_click(1, 1, MouseButton::Left, true);
        let before = ctl.sample();

        ctl.toggle_pause().unwrap();
        ctl.toggle_pause().unwrap();

        assert_eq!(ctl.state(), CaptureState::Armed);
        assert_eq!(ctl.sample(), before);
    }

    #[test]
    fn test_toggle_pause_while_idle_rejected() {
        let mut ctl = CaptureController::new(fixed(Rgb::default()));
        assert!(ctl.toggle_pause().is_err());
    }

    #[test]
    fn test_exclusion_zone_ignored_while_armed() {
        let mut ctl = CaptureController::new(fixed(Rgb::new(5, 5, 5)));
        ctl.set_exclusion_zone(Some(ExclusionZone::new(100, 100, 50, 20)));
        ctl.start().unwrap();

        assert!(ctl.on_click(120, 110, MouseButton::Left, true).is_none());
        assert!(ctl.sample().is_none());

        // Just outside the zone is accepted.
        assert!(ctl.on_click(99, 110, MouseButton::Left, true).is_some());
    }

    #[test]
    fn test_button_and_press_filtering() {
        let mut ctl = CaptureController::new(fixed(Rgb::new(5, 5, 5)));
        ctl.start().unwrap();

        assert!(ctl.on_click(1, 1, MouseButton::Right, true).is_none());
        assert!(ctl.on_click(1, 1, MouseButton::Middle, true).is_none());
        assert!(ctl.on_click(1, 1, MouseButton::Left, false).is_none());
        assert!(ctl.sample().is_none());
    }

    #[test]
    fn test_accepted_click_produces_hex() {
        let mut ctl = CaptureController::new(fixed(Rgb::new(34, 111, 201)));
        ctl.start().unwrap();

        match ctl.on_click(40, 60, MouseButton::Left, true) {
            Some(CaptureEvent::SampleCaptured { sample, hex }) => {
                assert_eq!(hex, "#226FC9");
                assert_eq!(sample.x, 40);
                assert_eq!(sample.y, 60);
                assert_eq!(sample.rgb, Rgb::new(34, 111, 201));
            }
            other => panic!("expected SampleCaptured, got {:?}", other),
        }
    }

    #[test]
    fn test_sampler_failure_retains_prior_sample() {
        let fail = Rc::new(Cell::new(false));
        let fail_flag = fail.clone();
        let sampler = move |x: i32, y: i32| -> Result<Rgb, SampleError> {
            if fail_flag.get() {
                Err(SampleError { x, y })
            } else {
                Ok(Rgb::new(10, 20, 30))
            }
        };

        let mut ctl = CaptureController::new(sampler);
        ctl.start().unwrap();

        ctl.on_click(1, 1, MouseButton::Left, true);
        let before = ctl.sample();
        assert!(before.is_some());

        fail.set(true);
        assert!(ctl.on_click(2, 2, MouseButton::Left, true).is_none());
        assert_eq!(ctl.sample(), before);
    }

    #[test]
    fn test_event_serializes_for_display_surface() {
        let sample = ColorSample::new(1, 2, Rgb::new(0, 0, 0));
        let event = CaptureEvent::SampleCaptured { sample, hex: sample.hex() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["SampleCaptured"]["hex"], "#000000");
        assert_eq!(json["SampleCaptured"]["sample"]["x"], 1);
    }

    #[test]
    fn test_rapid_clicks_last_write_wins() {
        let counter = Rc::new(Cell::new(0u8));
        let n = counter.clone();
        let sampler = move |_x: i32, _y: i32| -> Result<Rgb, SampleError> {
            let v = n.get() + 1;
            n.set(v);
            Ok(Rgb::new(v, v, v))
        };

        let mut ctl = CaptureController::new(sampler);
        ctl.start().unwrap();
        ctl.on_click(1, 1, MouseButton::Left, true);
        ctl.on_click(2, 2, MouseButton::Left, true);
        ctl.on_click(3, 3, MouseButton::Left, true);

        let sample = ctl.sample().unwrap();
        assert_eq!(sample.rgb, Rgb::new(3, 3, 3));
        assert_eq!((sample.x, sample.y), (3, 3));
    }
}
