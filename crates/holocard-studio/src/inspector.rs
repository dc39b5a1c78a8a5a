use std::time::{Duration, Instant};

use holocard_engine::input::{InputFrame, InputState, Key};
use holocard_engine::scene::OrbitCamera;
use holocard_engine::time::FpsCounter;

/// Debug overlay that reports frame rate and camera state to the log.
///
/// Toggled with Shift+Ctrl+Alt+I. While visible, one line is logged per second.
pub struct Inspector {
    visible: bool,
    fps: FpsCounter,
}

impl Default for Inspector {
    fn default() -> Self {
        Self {
            visible: false,
            fps: FpsCounter::new(Duration::from_secs(1)),
        }
    }
}

impl Inspector {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle_requested(input: &InputState, frame: &InputFrame) -> bool {
        frame.keys_pressed.contains(&Key::I) && input.modifiers.shift_ctrl_alt()
    }

    /// Handles the toggle chord and, while visible, returns a report line once per window.
    pub fn update(
        &mut self,
        input: &InputState,
        frame: &InputFrame,
        now: Instant,
        camera: &OrbitCamera,
    ) -> Option<String> {
        if Self::toggle_requested(input, frame) {
            self.visible = !self.visible;
            self.fps.reset();
            log::info!("inspector {}", if self.visible { "shown" } else { "hidden" });
        }

        if !self.visible {
            return None;
        }

        let fps = self.fps.record(now)?;
        let eye = camera.eye();
        let line = format!(
            "fps {fps:.1} | camera alpha {:.3} beta {:.3} radius {:.2} eye ({:.2}, {:.2}, {:.2})",
            camera.alpha, camera.beta, camera.radius, eye.x, eye.y, eye.z
        );
        log::info!("{line}");
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holocard_engine::input::{InputEvent, KeyState, Modifiers};

    fn chord(state: &mut InputState, frame: &mut InputFrame, modifiers: Modifiers) {
        state.apply_event(frame, InputEvent::Key {
            key: Key::I,
            state: KeyState::Pressed,
            modifiers,
            repeat: false,
        });
    }

    const ALL: Modifiers = Modifiers { shift: true, ctrl: true, alt: true, meta: false };

    #[test]
    fn chord_toggles_visibility() {
        let mut inspector = Inspector::default();
        let (mut state, mut frame) = (InputState::default(), InputFrame::default());
        let cam = OrbitCamera::default();
        let t0 = Instant::now();

        chord(&mut state, &mut frame, ALL);
        inspector.update(&state, &frame, t0, &cam);
        assert!(inspector.is_visible());

        frame.clear();
        state.apply_event(&mut frame, InputEvent::Key {
            key: Key::I,
            state: KeyState::Released,
            modifiers: ALL,
            repeat: false,
        });
        chord(&mut state, &mut frame, ALL);
        inspector.update(&state, &frame, t0, &cam);
        assert!(!inspector.is_visible());
    }

    #[test]
    fn plain_i_does_nothing() {
        let mut inspector = Inspector::default();
        let (mut state, mut frame) = (InputState::default(), InputFrame::default());
        chord(&mut state, &mut frame, Modifiers { shift: true, ..Default::default() });
        inspector.update(&state, &frame, Instant::now(), &OrbitCamera::default());
        assert!(!inspector.is_visible());
    }

    #[test]
    fn reports_once_per_second_while_visible() {
        let mut inspector = Inspector::default();
        let (mut state, mut frame) = (InputState::default(), InputFrame::default());
        let cam = OrbitCamera::default();
        let t0 = Instant::now();

        chord(&mut state, &mut frame, ALL);
        assert!(inspector.update(&state, &frame, t0, &cam).is_none());
        frame.clear();

        assert!(inspector.update(&state, &frame, t0 + Duration::from_millis(500), &cam).is_none());
        let line = inspector.update(&state, &frame, t0 + Duration::from_secs(1), &cam);
        assert!(line.is_some_and(|l| l.contains("radius 10.00")));
    }
}
