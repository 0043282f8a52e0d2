//! Orbit controller for mouse-driven map navigation
//!
//! Controls:
//! - Left drag: orbit (yaw/pitch), unless orbiting is disabled
//! - Right drag: pan
//! - Wheel: zoom in/out one step per notch
//! - Press and release without moving: click (single or double)

use std::time::{Duration, Instant};

use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// A click in window pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Click {
    pub button: MouseButton,
    pub x: f32,
    pub y: f32,
    /// Second click of a double click
    pub double: bool,
}

#[derive(Clone, Copy, Debug)]
struct Press {
    button: MouseButton,
    travelled: f32,
}

#[derive(Clone, Copy, Debug)]
struct LastClick {
    button: MouseButton,
    x: f32,
    y: f32,
    at: Instant,
}

/// Mouse controller for the orbit camera
pub struct OrbitController {
    // Button state
    orbiting: bool,
    panning: bool,
    press: Option<Press>,
    last_click: Option<LastClick>,

    // Cursor state
    cursor: Option<(f32, f32)>,
    pending_orbit: (f32, f32),
    pending_pan: (f32, f32),
    pending_zoom: i32,

    orbit_enabled: bool,

    // Configuration
    pub orbit_sensitivity: f32,
    /// Pixels of travel that turn a press into a drag
    pub click_slop: f32,
    pub double_click_time: Duration,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            orbiting: false,
            panning: false,
            press: None,
            last_click: None,

            cursor: None,
            pending_orbit: (0.0, 0.0),
            pending_pan: (0.0, 0.0),
            pending_zoom: 0,

            orbit_enabled: true,

            orbit_sensitivity: 0.005,
            click_slop: 4.0,
            double_click_time: Duration::from_millis(400),
        }
    }

    /// Allow or suppress left-drag orbiting (suppressed while placing systems)
    pub fn set_orbit_enabled(&mut self, enabled: bool) {
        self.orbit_enabled = enabled;
        if !enabled {
            self.orbiting = false;
        }
    }

    /// Last known cursor position
    pub fn cursor(&self) -> Option<(f32, f32)> {
        self.cursor
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.orbiting || self.panning
    }

    /// Process mouse button input
    ///
    /// Returns a [`Click`] when a press is released close to where it started.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) -> Option<Click> {
        self.process_mouse_button_at(button, state, Instant::now())
    }

    /// Same as [`process_mouse_button`](Self::process_mouse_button) with an explicit timestamp
    pub fn process_mouse_button_at(
        &mut self,
        button: MouseButton,
        state: ElementState,
        now: Instant,
    ) -> Option<Click> {
        let pressed = state == ElementState::Pressed;

        match button {
            MouseButton::Left => self.orbiting = pressed && self.orbit_enabled,
            MouseButton::Right => self.panning = pressed,
            _ => {}
        }

        if pressed {
            self.press = Some(Press { button, travelled: 0.0 });
            return None;
        }

        let press = self.press.take()?;
        if press.button != button || press.travelled >= self.click_slop {
            return None;
        }
        let (x, y) = self.cursor?;

        let double = self.last_click.is_some_and(|last| {
            last.button == button
                && now.duration_since(last.at) <= self.double_click_time
                && (last.x - x).hypot(last.y - y) < self.click_slop
        });
        // A double click ends the sequence; a third click starts a new one
        self.last_click = if double {
            None
        } else {
            Some(LastClick { button, x, y, at: now })
        };

        Some(Click { button, x, y, double })
    }

    /// Process cursor movement in window pixels
    pub fn process_cursor_moved(&mut self, x: f32, y: f32) {
        if let Some((last_x, last_y)) = self.cursor {
            let dx = x - last_x;
            let dy = y - last_y;
            if let Some(press) = self.press.as_mut() {
                press.travelled += dx.hypot(dy);
            }
            if self.orbiting {
                self.pending_orbit.0 += dx;
                self.pending_orbit.1 += dy;
            }
            if self.panning {
                self.pending_pan.0 += dx;
                self.pending_pan.1 += dy;
            }
        }
        self.cursor = Some((x, y));
    }

    /// Cursor left the window
    pub fn process_cursor_left(&mut self) {
        self.cursor = None;
    }

    /// Process wheel input; scrolling toward the user zooms out
    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        let y = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
        };
        if y > 0.0 {
            self.pending_zoom -= 1;
        } else if y < 0.0 {
            self.pending_zoom += 1;
        }
    }

    /// Apply accumulated input to the camera
    ///
    /// Returns true when the camera changed.
    pub fn update<C: CameraControl>(&mut self, camera: &mut C) -> bool {
        let mut changed = false;

        let (ox, oy) = self.pending_orbit;
        if ox != 0.0 || oy != 0.0 {
            camera.orbit(ox * self.orbit_sensitivity, oy * self.orbit_sensitivity);
            changed = true;
        }

        let (px, py) = self.pending_pan;
        if px != 0.0 || py != 0.0 {
            camera.pan(px, py);
            changed = true;
        }

        let steps = self.pending_zoom;
        for _ in 0..steps.unsigned_abs() {
            camera.zoom(steps.signum() as f32);
            changed = true;
        }

        self.pending_orbit = (0.0, 0.0);
        self.pending_pan = (0.0, 0.0);
        self.pending_zoom = 0;
        changed
    }

    /// Builder: set orbit sensitivity (radians per pixel)
    pub fn with_orbit_sensitivity(mut self, sensitivity: f32) -> Self {
        self.orbit_sensitivity = sensitivity;
        self
    }

    /// Builder: set click slop in pixels
    pub fn with_click_slop(mut self, slop: f32) -> Self {
        self.click_slop = slop;
        self
    }

    /// Builder: set the double click window
    pub fn with_double_click_time(mut self, time: Duration) -> Self {
        self.double_click_time = time;
        self
    }
}

/// Trait for camera control
/// Allows the controller to drive different camera implementations
pub trait CameraControl {
    /// Rotate by yaw/pitch deltas in radians
    fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32);
    /// Move the look-at target by a cursor delta in pixels
    fn pan(&mut self, dx: f32, dy: f32);
    /// One zoom step: positive moves away, negative moves closer
    fn zoom(&mut self, direction: f32);
    /// Back to the initial view
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        orbit: (f32, f32),
        pan: (f32, f32),
        zooms: Vec<f32>,
    }

    impl CameraControl for Recorder {
        fn orbit(&mut self, dy: f32, dp: f32) {
            self.orbit.0 += dy;
            self.orbit.1 += dp;
        }
        fn pan(&mut self, dx: f32, dy: f32) {
            self.pan.0 += dx;
            self.pan.1 += dy;
        }
        fn zoom(&mut self, direction: f32) {
            self.zooms.push(direction);
        }
        fn reset(&mut self) {
            *self = Self::default();
        }
    }

    fn drag(c: &mut OrbitController, button: MouseButton, from: (f32, f32), to: (f32, f32)) -> Option<Click> {
        c.process_cursor_moved(from.0, from.1);
        c.process_mouse_button(button, ElementState::Pressed);
        c.process_cursor_moved(to.0, to.1);
        c.process_mouse_button(button, ElementState::Released)
    }

    #[test]
    fn test_left_drag_orbits() {
        let mut c = OrbitController::new();
        let click = drag(&mut c, MouseButton::Left, (10.0, 10.0), (110.0, 60.0));
        assert!(click.is_none());

        let mut cam = Recorder::default();
        assert!(c.update(&mut cam));
        assert!((cam.orbit.0 - 0.5).abs() < 1e-6);
        assert!((cam.orbit.1 - 0.25).abs() < 1e-6);
        assert_eq!(cam.pan, (0.0, 0.0));
    }

    #[test]
    fn test_orbit_disabled_suppresses_rotation() {
        let mut c = OrbitController::new();
        c.set_orbit_enabled(false);
        drag(&mut c, MouseButton::Left, (0.0, 0.0), (50.0, 0.0));
        let mut cam = Recorder::default();
        assert!(!c.update(&mut cam));
        assert_eq!(cam.orbit, (0.0, 0.0));
    }

    #[test]
    fn test_right_drag_pans() {
        let mut c = OrbitController::new();
        drag(&mut c, MouseButton::Right, (0.0, 0.0), (30.0, -20.0));
        let mut cam = Recorder::default();
        c.update(&mut cam);
        assert_eq!(cam.pan, (30.0, -20.0));
        assert_eq!(cam.orbit, (0.0, 0.0));
    }

    #[test]
    fn test_click_within_slop() {
        let mut c = OrbitController::new();
        let click = drag(&mut c, MouseButton::Left, (100.0, 100.0), (101.0, 101.0)).unwrap();
        assert_eq!(click.button, MouseButton::Left);
        assert_eq!((click.x, click.y), (101.0, 101.0));
        assert!(!click.double);
    }

    #[test]
    fn test_middle_click() {
        let mut c = OrbitController::new();
        let click = drag(&mut c, MouseButton::Middle, (5.0, 5.0), (5.0, 5.0)).unwrap();
        assert_eq!(click.button, MouseButton::Middle);
    }

    #[test]
    fn test_double_click() {
        let mut c = OrbitController::new();
        let t0 = Instant::now();
        c.process_cursor_moved(50.0, 50.0);
        c.process_mouse_button_at(MouseButton::Left, ElementState::Pressed, t0);
        let first = c.process_mouse_button_at(MouseButton::Left, ElementState::Released, t0).unwrap();
        assert!(!first.double);

        let t1 = t0 + Duration::from_millis(150);
        c.process_mouse_button_at(MouseButton::Left, ElementState::Pressed, t1);
        let second = c.process_mouse_button_at(MouseButton::Left, ElementState::Released, t1).unwrap();
        assert!(second.double);

        let t2 = t1 + Duration::from_millis(100);
        c.process_mouse_button_at(MouseButton::Left, ElementState::Pressed, t2);
        let third = c.process_mouse_button_at(MouseButton::Left, ElementState::Released, t2).unwrap();
        assert!(!third.double);
    }

    #[test]
    fn test_slow_second_click_is_single() {
        let mut c = OrbitController::new();
        let t0 = Instant::now();
        c.process_cursor_moved(50.0, 50.0);
        c.process_mouse_button_at(MouseButton::Left, ElementState::Pressed, t0);
        c.process_mouse_button_at(MouseButton::Left, ElementState::Released, t0);
        let t1 = t0 + Duration::from_secs(2);
        c.process_mouse_button_at(MouseButton::Left, ElementState::Pressed, t1);
        let second = c.process_mouse_button_at(MouseButton::Left, ElementState::Released, t1).unwrap();
        assert!(!second.double);
    }

    #[test]
    fn test_scroll_direction() {
        let mut c = OrbitController::new();
        c.process_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        c.process_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        let mut cam = Recorder::default();
        c.update(&mut cam);
        assert_eq!(cam.zooms, vec![-1.0, -1.0]);

        c.process_scroll(MouseScrollDelta::LineDelta(0.0, -3.0));
        let mut cam = Recorder::default();
        c.update(&mut cam);
        assert_eq!(cam.zooms, vec![1.0]);
    }

    #[test]
    fn test_update_resets_pending() {
        let mut c = OrbitController::new();
        drag(&mut c, MouseButton::Right, (0.0, 0.0), (10.0, 0.0));
        let mut cam = Recorder::default();
        assert!(c.update(&mut cam));
        assert!(!c.update(&mut cam));
    }

    #[test]
    fn test_builders() {
        let c = OrbitController::new()
            .with_orbit_sensitivity(0.01)
            .with_click_slop(8.0)
            .with_double_click_time(Duration::from_millis(250));
        assert_eq!(c.orbit_sensitivity, 0.01);
        assert_eq!(c.click_slop, 8.0);
        assert_eq!(c.double_click_time, Duration::from_millis(250));
    }
}
