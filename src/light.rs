use cgmath::Point3;

pub const GLOBAL_AMBIENT: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

pub const LIGHT_AMBIENT: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
pub const LIGHT_DIFFUSE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const LIGHT_SPECULAR: [f32; 4] = [0.4, 0.4, 0.4, 1.0];

pub const ORBIT_RADIUS: f32 = 5.0;
pub const ORBIT_HEIGHT: f32 = 7.0;
/// Degrees per second while a rotate key is held.
pub const ORBIT_ROTATE_SPEED: f32 = 180.0;

pub const DIRECTIONAL_INTENSITY: f32 = 0.3;
/// Points toward the light, as a w = 0 position does.
pub const DIRECTIONAL_DIRECTION: [f32; 3] = [0.0, -1.0, 0.0];

pub const POINT_LIGHT_POS1: [f32; 4] = [-4.0, 4.0, -4.0, 1.0];
pub const POINT_LIGHT_POS2: [f32; 4] = [4.0, 3.0, -4.0, 1.0];
/// Constant, linear, quadratic.
pub const POINT_ATTENUATION: [f32; 3] = [1.0, 0.1, 0.01];

pub const MAX_INTENSITY: f32 = 2.0;
/// Intensity change per scroll line.
pub const INTENSITY_STEP: f32 = 0.05;

pub const NUM_LIGHTS: usize = 4;

/// One light slot as the shader sees it.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
	/// w = 0 marks a directional light whose xyz points toward the light.
	pub position: [f32; 4],
	pub ambient: [f32; 4],
	pub diffuse: [f32; 4],
	pub specular: [f32; 4],
	/// constant, linear, quadratic, unused
	pub attenuation: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
	pub global_ambient: [f32; 4],
	pub lights: [LightUniform; NUM_LIGHTS],
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RotateDirection {
	CounterClockwise,
	Clockwise,
}

/// Mutable light state. The uniform block is derived from it from scratch
/// each frame.
#[derive(Debug, Clone)]
pub struct LightRig {
	angle: f32,
	intensity: f32,
	pub rotate_speed: f32,
	pub directional_intensity: f32,
}

impl Default for LightRig {
	fn default() -> Self {
		Self::new()
	}
}

fn scale_rgb(color: [f32; 4], factor: f32) -> [f32; 4] {
	[color[0] * factor, color[1] * factor, color[2] * factor, color[3]]
}

fn grey(level: f32) -> [f32; 4] {
	[level, level, level, 1.0]
}

impl LightRig {
	pub fn new() -> Self {
		Self {
			angle: 0.0,
			intensity: 1.0,
			rotate_speed: ORBIT_ROTATE_SPEED,
			directional_intensity: DIRECTIONAL_INTENSITY,
		}
	}

	/// Orbit angle in degrees. It is never wrapped.
	pub fn angle(&self) -> f32 {
		self.angle
	}

	pub fn set_angle(&mut self, degrees: f32) {
		self.angle = degrees;
	}

	pub fn intensity(&self) -> f32 {
		self.intensity
	}

	pub fn set_intensity(&mut self, intensity: f32) {
		self.intensity = intensity.clamp(0.0, MAX_INTENSITY);
	}

	/// Applies a scroll of `lines` notches and returns the new intensity.
	pub fn adjust_intensity(&mut self, lines: f32) -> f32 {
		self.set_intensity(self.intensity + lines * INTENSITY_STEP);
		log::debug!("light intensity {:.2}", self.intensity);
		self.intensity
	}

	pub fn rotate(&mut self, direction: RotateDirection, dt: f32) {
		let step = self.rotate_speed * dt;
		match direction {
			RotateDirection::CounterClockwise => self.angle += step,
			RotateDirection::Clockwise => self.angle -= step,
		}
	}

	pub fn orbit_position(&self) -> Point3<f32> {
		let (sin, cos) = self.angle.to_radians().sin_cos();
		Point3::new(ORBIT_RADIUS * cos, ORBIT_HEIGHT, ORBIT_RADIUS * sin)
	}

	pub fn setup(&self) -> LightingUniform {
		let i = self.intensity;
		let orbit = self.orbit_position();
		let no_falloff = [1.0, 0.0, 0.0, 0.0];
		let falloff = [POINT_ATTENUATION[0], POINT_ATTENUATION[1], POINT_ATTENUATION[2], 0.0];

		let orbiting = LightUniform {
			position: [orbit.x, orbit.y, orbit.z, 1.0],
			ambient: scale_rgb(LIGHT_AMBIENT, i),
			diffuse: scale_rgb(LIGHT_DIFFUSE, i),
			specular: scale_rgb(LIGHT_SPECULAR, i),
			attenuation: no_falloff,
		};

		let d = self.directional_intensity;
		let directional = LightUniform {
			position: [DIRECTIONAL_DIRECTION[0], DIRECTIONAL_DIRECTION[1], DIRECTIONAL_DIRECTION[2], 0.0],
			ambient: LIGHT_AMBIENT.map(|c| c * d),
			diffuse: LIGHT_DIFFUSE.map(|c| c * d),
			specular: LIGHT_SPECULAR.map(|c| c * d),
			attenuation: no_falloff,
		};

		let point1 = LightUniform {
			position: POINT_LIGHT_POS1,
			ambient: grey(0.05 * i),
			diffuse: grey(0.3 * i),
			specular: grey(0.08 * i),
			attenuation: falloff,
		};

		let point2 = LightUniform {
			position: POINT_LIGHT_POS2,
			ambient: grey(0.05 * i),
			diffuse: grey(0.2 * i),
			specular: grey(0.09 * i),
			attenuation: falloff,
		};

		LightingUniform {
			global_ambient: GLOBAL_AMBIENT,
			lights: [orbiting, directional, point1, point2],
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f32 = 1e-4;

	#[test]
	fn orbit_position_follows_angle() {
		let mut rig = LightRig::new();
		let p = rig.orbit_position();
		assert!((p.x - 5.0).abs() < EPS);
		assert!((p.y - ORBIT_HEIGHT).abs() < EPS);
		assert!(p.z.abs() < EPS);

		rig.set_angle(90.0);
		let p = rig.orbit_position();
		assert!(p.x.abs() < EPS);
		assert!((p.y - ORBIT_HEIGHT).abs() < EPS);
		assert!((p.z - 5.0).abs() < EPS);

		// no explicit wrap: 450 degrees lands in the same place as 90
		rig.set_angle(450.0);
		let q = rig.orbit_position();
		assert!((q.x - p.x).abs() < EPS);
		assert!((q.z - p.z).abs() < EPS);
	}

	#[test]
	fn intensity_stays_clamped_for_any_scroll_sequence() {
		let mut rig = LightRig::new();
		let scrolls = [3.0, 50.0, -7.0, -100.0, 1.0, 12.5, -0.5, 60.0, -3.0];
		for lines in scrolls.iter().cycle().take(200) {
			let intensity = rig.adjust_intensity(*lines);
			assert!((0.0..=MAX_INTENSITY).contains(&intensity));
		}

		rig.adjust_intensity(1000.0);
		assert_eq!(rig.intensity(), MAX_INTENSITY);
		rig.adjust_intensity(-1000.0);
		assert_eq!(rig.intensity(), 0.0);
	}

	#[test]
	fn single_scroll_notch_changes_intensity_by_step() {
		let mut rig = LightRig::new();
		rig.adjust_intensity(1.0);
		assert!((rig.intensity() - 1.05).abs() < EPS);
		rig.adjust_intensity(-2.0);
		assert!((rig.intensity() - 0.95).abs() < EPS);
	}

	#[test]
	fn rotation_is_time_scaled() {
		let mut rig = LightRig::new();
		rig.rotate(RotateDirection::CounterClockwise, 0.5);
		assert!((rig.angle() - 90.0).abs() < EPS);
		rig.rotate(RotateDirection::Clockwise, 0.25);
		assert!((rig.angle() - 45.0).abs() < EPS);
	}

	#[test]
	fn setup_is_idempotent() {
		let mut rig = LightRig::new();
		rig.set_angle(33.0);
		rig.set_intensity(1.4);
		assert_eq!(rig.setup(), rig.setup());
	}

	#[test]
	fn setup_scales_point_lights_by_intensity() {
		let mut rig = LightRig::new();
		rig.set_intensity(2.0);
		let lighting = rig.setup();

		assert_eq!(lighting.global_ambient, GLOBAL_AMBIENT);
		let orbiting = lighting.lights[0];
		assert_eq!(orbiting.diffuse, [2.0, 2.0, 2.0, 1.0]);
		assert!((orbiting.specular[0] - 0.8).abs() < EPS);
		assert_eq!(orbiting.position[3], 1.0);

		let point1 = lighting.lights[2];
		assert_eq!(point1.position, POINT_LIGHT_POS1);
		assert!((point1.diffuse[0] - 0.6).abs() < EPS);
		assert_eq!(point1.attenuation, [1.0, 0.1, 0.01, 0.0]);

		let point2 = lighting.lights[3];
		assert_eq!(point2.position, POINT_LIGHT_POS2);
		assert!((point2.diffuse[0] - 0.4).abs() < EPS);
		assert!((point2.specular[0] - 0.18).abs() < EPS);
	}

	#[test]
	fn directional_light_ignores_global_intensity() {
		let mut rig = LightRig::new();
		let before = rig.setup().lights[1];
		rig.set_intensity(0.0);
		let after = rig.setup().lights[1];

		assert_eq!(before, after);
		assert_eq!(after.position, [0.0, -1.0, 0.0, 0.0]);
		assert!((after.diffuse[0] - 0.3).abs() < EPS);
		assert!((after.diffuse[3] - 0.3).abs() < EPS);
	}
}
