use cgmath::{InnerSpace, Point3, Vector3, Zero};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
	1.0, 0.0, 0.0, 0.0,
	0.0, 1.0, 0.0, 0.0,
	0.0, 0.0, 0.5, 0.0,
	0.0, 0.0, 0.5, 1.0,
);

pub const FOVY: f32 = 45.0;
pub const ZNEAR: f32 = 0.1;
pub const ZFAR: f32 = 100.0;
pub const PITCH_LIMIT: f32 = 90.0;

pub const MOVE_SPEED: f32 = 2.0;
pub const MOUSE_SENSITIVITY: f32 = 0.15;

/// Horizontal forward vector for a yaw in degrees.
pub fn forward(yaw: f32) -> Vector3<f32> {
	let (sin, cos) = yaw.to_radians().sin_cos();
	Vector3::new(sin, 0.0, -cos)
}

/// Horizontal right vector for a yaw in degrees.
pub fn right(yaw: f32) -> Vector3<f32> {
	let (sin, cos) = yaw.to_radians().sin_cos();
	Vector3::new(cos, 0.0, sin)
}

/// Unit look direction including pitch. Both angles in degrees.
pub fn look_direction(yaw: f32, pitch: f32) -> Vector3<f32> {
	let (sin_yaw, cos_yaw) = yaw.to_radians().sin_cos();
	let (sin_pitch, cos_pitch) = pitch.to_radians().sin_cos();
	Vector3::new(sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
}

/// First-person camera. `target` is always `eye + look_direction(yaw, pitch)`
/// after `update_target`.
#[derive(Debug, Clone)]
pub struct Camera {
	pub eye: Point3<f32>,
	pub target: Point3<f32>,
	pub up: Vector3<f32>,
	/// Degrees.
	pub yaw: f32,
	/// Degrees, kept within [-PITCH_LIMIT, PITCH_LIMIT].
	pub pitch: f32,
	pub aspect: f32,
	pub fovy: f32,
	pub znear: f32,
	pub zfar: f32,
}

impl Camera {
	pub fn new(eye: Point3<f32>, aspect: f32) -> Self {
		let mut camera = Self {
			eye,
			target: eye,
			up: Vector3::unit_y(),
			yaw: 0.0,
			pitch: 0.0,
			aspect,
			fovy: FOVY,
			znear: ZNEAR,
			zfar: ZFAR,
		};
		camera.update_target();
		camera
	}

	pub fn forward(&self) -> Vector3<f32> {
		forward(self.yaw)
	}

	pub fn right(&self) -> Vector3<f32> {
		right(self.yaw)
	}

	pub fn look_direction(&self) -> Vector3<f32> {
		look_direction(self.yaw, self.pitch)
	}

	/// Turns the camera by raw mouse counts.
	pub fn rotate(&mut self, dx: f32, dy: f32, sensitivity: f32) {
		self.yaw += dx * sensitivity;
		self.pitch = (self.pitch - dy * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
	}

	pub fn update_target(&mut self) {
		self.target = self.eye + self.look_direction();
	}

	pub fn build_view_projection_matrix(&self) -> cgmath::Matrix4<f32> {
		// eye - target loses the horizontal part at the pitch limits
		let view = cgmath::Matrix4::look_to_rh(self.eye, self.look_direction(), self.up);
		let proj = cgmath::perspective(cgmath::Deg(self.fovy), self.aspect, self.znear, self.zfar);
		OPENGL_TO_WGPU_MATRIX * proj * view
	}
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
	pub view_proj: [[f32; 4]; 4],
	pub view_position: [f32; 4],
}

impl CameraUniform {
	pub fn new() -> Self {
		use cgmath::SquareMatrix;
		Self {
			view_proj: cgmath::Matrix4::identity().into(),
			view_position: [0.0; 4],
		}
	}

	pub fn update_view_proj(&mut self, camera: &Camera) {
		self.view_position = camera.eye.to_homogeneous().into();
		self.view_proj = camera.build_view_projection_matrix().into();
	}
}

/// Movement requested for one frame.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct MoveIntent {
	pub forward: bool,
	pub backward: bool,
	pub left: bool,
	pub right: bool,
}

pub struct CameraController {
	pub move_speed: f32,
	pub sensitivity: f32,
}

impl Default for CameraController {
	fn default() -> Self {
		Self::new(MOVE_SPEED, MOUSE_SENSITIVITY)
	}
}

impl CameraController {
	pub fn new(move_speed: f32, sensitivity: f32) -> Self {
		Self { move_speed, sensitivity }
	}

	/// Applies one frame of input. Mouse counts are used as-is; only
	/// keyboard movement is scaled by `dt`. Returns whether the camera moved.
	pub fn update_camera(&self, camera: &mut Camera, mouse_delta: (f32, f32), intent: MoveIntent, dt: f32) -> bool {
		let mut moved = false;

		let (dx, dy) = mouse_delta;
		if dx != 0.0 || dy != 0.0 {
			camera.rotate(dx, dy, self.sensitivity);
			moved = true;
		}

		let forward = camera.forward();
		let right = camera.right();
		let mut move_vector = Vector3::zero();
		if intent.forward {
			move_vector += forward * self.move_speed;
		}
		if intent.backward {
			move_vector -= forward * self.move_speed;
		}
		if intent.left {
			move_vector -= right * self.move_speed;
		}
		if intent.right {
			move_vector += right * self.move_speed;
		}

		if move_vector.magnitude2() > 0.0 {
			camera.eye += move_vector * dt;
			moved = true;
		}

		camera.update_target();
		moved
	}
}
