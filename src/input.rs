//! Keyboard and mouse state collected between frames.
//!
//! Window events only record state here; `Scene::update` consumes one
//! snapshot per frame.

use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::camera::MoveIntent;

/// Scroll lines reported for this many pixels of touchpad scrolling.
pub const PIXELS_PER_LINE: f32 = 40.0;

/// Everything the scene needs from the input devices for a single frame.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct FrameInput {
	pub movement: MoveIntent,
	pub rotate_light_ccw: bool,
	pub rotate_light_cw: bool,
	/// Raw relative mouse motion since the previous frame.
	pub mouse_delta: (f32, f32),
}

#[derive(Debug, Default)]
pub struct InputHandler {
	held: FrameInput,
	mouse_delta: (f64, f64),
}

impl InputHandler {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a key transition. Returns true if the key is bound.
	pub fn process_key(&mut self, key: PhysicalKey, state: ElementState) -> bool {
		let pressed = state == ElementState::Pressed;

		let PhysicalKey::Code(code) = key else {
			return false;
		};

		let slot = match code {
			KeyCode::KeyW => &mut self.held.movement.forward,
			KeyCode::KeyS => &mut self.held.movement.backward,
			KeyCode::KeyA => &mut self.held.movement.left,
			KeyCode::KeyD => &mut self.held.movement.right,
			KeyCode::Numpad4 => &mut self.held.rotate_light_ccw,
			KeyCode::Numpad6 => &mut self.held.rotate_light_cw,
			_ => return false,
		};
		*slot = pressed;
		true
	}

	pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
		self.mouse_delta.0 += delta.0;
		self.mouse_delta.1 += delta.1;
	}

	/// Current key state plus the mouse motion accumulated since the last call.
	pub fn take_frame(&mut self) -> FrameInput {
		let (dx, dy) = std::mem::take(&mut self.mouse_delta);
		FrameInput {
			mouse_delta: (dx as f32, dy as f32),
			..self.held
		}
	}

	/// Drops held keys and pending motion, e.g. when the window loses focus.
	pub fn reset(&mut self) {
		*self = Self::default();
	}
}

/// Converts a wheel event into signed scroll lines, positive away from the user.
pub fn scroll_lines(delta: MouseScrollDelta) -> f32 {
	match delta {
		MouseScrollDelta::LineDelta(_, y) => y,
		MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use winit::dpi::PhysicalPosition;

	#[test]
	fn wasd_maps_to_movement() {
		let mut handler = InputHandler::new();

		assert!(handler.process_key(PhysicalKey::Code(KeyCode::KeyW), ElementState::Pressed));
		assert!(handler.process_key(PhysicalKey::Code(KeyCode::KeyD), ElementState::Pressed));
		let frame = handler.take_frame();
		assert!(frame.movement.forward);
		assert!(frame.movement.right);
		assert!(!frame.movement.backward);
		assert!(!frame.movement.left);

		handler.process_key(PhysicalKey::Code(KeyCode::KeyW), ElementState::Released);
		assert!(!handler.take_frame().movement.forward);
	}

	#[test]
	fn numpad_rotates_light() {
		let mut handler = InputHandler::new();
		handler.process_key(PhysicalKey::Code(KeyCode::Numpad4), ElementState::Pressed);
		let frame = handler.take_frame();
		assert!(frame.rotate_light_ccw);
		assert!(!frame.rotate_light_cw);
	}

	#[test]
	fn unbound_keys_are_ignored() {
		let mut handler = InputHandler::new();
		assert!(!handler.process_key(PhysicalKey::Code(KeyCode::KeyQ), ElementState::Pressed));
		assert_eq!(handler.take_frame(), FrameInput::default());
	}

	#[test]
	fn held_keys_persist_but_mouse_delta_drains() {
		let mut handler = InputHandler::new();
		handler.process_key(PhysicalKey::Code(KeyCode::KeyS), ElementState::Pressed);
		handler.process_mouse_motion((3.0, -1.0));
		handler.process_mouse_motion((2.0, 4.0));

		let first = handler.take_frame();
		assert_eq!(first.mouse_delta, (5.0, 3.0));
		assert!(first.movement.backward);

		let second = handler.take_frame();
		assert_eq!(second.mouse_delta, (0.0, 0.0));
		assert!(second.movement.backward);
	}

	#[test]
	fn reset_releases_everything() {
		let mut handler = InputHandler::new();
		handler.process_key(PhysicalKey::Code(KeyCode::KeyA), ElementState::Pressed);
		handler.process_mouse_motion((10.0, 10.0));
		handler.reset();
		assert_eq!(handler.take_frame(), FrameInput::default());
	}

	#[test]
	fn scroll_deltas_convert_to_lines() {
		assert_eq!(scroll_lines(MouseScrollDelta::LineDelta(0.0, -2.0)), -2.0);
		assert_eq!(scroll_lines(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 80.0))), 2.0);
	}
}
