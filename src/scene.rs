use cgmath::Point3;

use crate::{camera, input::FrameInput, light, material::MaterialPreset, primitives};

pub const CAMERA_START: Point3<f32> = Point3::new(0.0, 2.0, 12.0);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
	Sphere,
	Cube,
	Pyramid,
}

impl Shape {
	pub fn name(&self) -> &'static str {
		match self {
			Shape::Sphere => "sphere",
			Shape::Cube => "cube",
			Shape::Pyramid => "pyramid",
		}
	}

	pub fn geometry(&self, size: f32) -> primitives::MeshData {
		match self {
			Shape::Sphere => primitives::sphere(size, primitives::SPHERE_SLICES, primitives::SPHERE_STACKS),
			Shape::Cube => primitives::cube(size),
			Shape::Pyramid => primitives::pyramid(size),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
	pub shape: Shape,
	pub position: Point3<f32>,
	pub color: [f32; 4],
	pub size: f32,
	/// `None` keeps whatever material the previous draw left in effect.
	pub material: Option<MaterialPreset>,
}

impl SceneObject {
	pub fn new(shape: Shape, position: Point3<f32>, color: [f32; 4], size: f32, material: MaterialPreset) -> Self {
		Self {
			shape,
			position,
			color,
			size,
			material: Some(material),
		}
	}

	/// Like `new`, but resolves the material by preset name.
	pub fn with_material_name(shape: Shape, position: Point3<f32>, color: [f32; 4], size: f32, material: &str) -> Self {
		let preset = MaterialPreset::from_name(material);
		if preset.is_none() {
			log::warn!("unknown material {:?} on {}, previous material stays in effect", material, shape.name());
		}
		Self {
			shape,
			position,
			color,
			size,
			material: preset,
		}
	}

	pub fn transform(&self) -> cgmath::Matrix4<f32> {
		cgmath::Matrix4::from_translation(cgmath::Vector3::new(self.position.x, self.position.y, self.position.z))
	}
}

pub struct Scene {
	pub camera: camera::Camera,
	pub camera_controller: camera::CameraController,
	pub lights: light::LightRig,
	objects: Vec<SceneObject>,
	camera_moved: bool,
}

impl Scene {
	pub fn new(aspect: f32) -> Self {
		Self {
			camera: camera::Camera::new(CAMERA_START, aspect),
			camera_controller: camera::CameraController::default(),
			lights: light::LightRig::new(),
			objects: vec![],
			camera_moved: true,
		}
	}

	/// The room with its four objects.
	pub fn with_default_objects(aspect: f32) -> Self {
		let mut scene = Self::new(aspect);
		scene.add_object(SceneObject::new(
			Shape::Sphere, Point3::new(-2.0, 1.0, -1.0), [0.8, 0.2, 0.2, 1.0], 0.7, MaterialPreset::PolishedMetal,
		));
		scene.add_object(SceneObject::new(
			Shape::Cube, Point3::new(2.0, 1.0, -2.0), [0.2, 0.8, 0.2, 1.0], 0.6, MaterialPreset::RoughPlastic,
		));
		scene.add_object(SceneObject::new(
			Shape::Pyramid, Point3::new(-1.0, 0.5, -3.0), [0.2, 0.2, 0.8, 1.0], 0.5, MaterialPreset::ReflectiveGlass,
		));
		scene.add_object(SceneObject::new(
			Shape::Sphere, Point3::new(1.0, 0.5, -1.0), [0.7, 0.5, 0.2, 1.0], 0.4, MaterialPreset::MatMaterial,
		));
		scene
	}

	pub fn add_object(&mut self, obj: SceneObject) {
		self.objects.push(obj);
	}

	pub fn objects(&self) -> &[SceneObject] {
		&self.objects
	}

	pub fn camera_moved(&self) -> bool {
		self.camera_moved
	}

	pub fn set_aspect(&mut self, width: u32, height: u32) {
		self.camera.aspect = width.max(1) as f32 / height.max(1) as f32;
	}

	/// Advances camera and light state by one frame.
	pub fn update(&mut self, input: &FrameInput, dt: f32) {
		if input.rotate_light_ccw {
			self.lights.rotate(light::RotateDirection::CounterClockwise, dt);
		}
		if input.rotate_light_cw {
			self.lights.rotate(light::RotateDirection::Clockwise, dt);
		}

		if self.camera_controller.update_camera(&mut self.camera, input.mouse_delta, input.movement, dt) {
			self.camera_moved = true;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::camera::MoveIntent;
	use crate::material::MaterialState;

	const EPS: f32 = 1e-4;

	#[test]
	fn default_scene_holds_four_objects() {
		let scene = Scene::with_default_objects(1024.0 / 768.0);
		let shapes: Vec<_> = scene.objects().iter().map(|o| o.shape).collect();
		assert_eq!(shapes, vec![Shape::Sphere, Shape::Cube, Shape::Pyramid, Shape::Sphere]);
		assert_eq!(scene.objects()[2].material, Some(MaterialPreset::ReflectiveGlass));
		assert_eq!(scene.camera.eye, CAMERA_START);
	}

	#[test]
	fn unknown_material_name_inherits_previous() {
		let mut scene = Scene::new(1.0);
		scene.add_object(SceneObject::with_material_name(
			Shape::Cube, Point3::new(0.0, 0.0, 0.0), [1.0; 4], 1.0, "brushed_metal",
		));
		scene.add_object(SceneObject::with_material_name(
			Shape::Cube, Point3::new(1.0, 0.0, 0.0), [1.0; 4], 1.0, "unobtainium",
		));
		assert_eq!(scene.objects()[1].material, None);

		let mut state = MaterialState::default();
		let resolved: Vec<_> = scene.objects().iter().map(|o| state.apply(o.material)).collect();
		assert_eq!(resolved[0], MaterialPreset::BrushedMetal.coefficients());
		assert_eq!(resolved[1], resolved[0]);
	}

	#[test]
	fn update_rotates_light_and_moves_camera() {
		let mut scene = Scene::new(1.0);
		let input = FrameInput {
			movement: MoveIntent { backward: true, ..Default::default() },
			rotate_light_ccw: true,
			..Default::default()
		};
		scene.update(&input, 0.1);

		assert!((scene.lights.angle() - 18.0).abs() < EPS);
		assert!((scene.camera.eye.z - 12.2).abs() < EPS);
		assert!(scene.camera_moved());
		let look = scene.camera.target - scene.camera.eye;
		assert!((look.z + 1.0).abs() < EPS);
	}

	#[test]
	fn opposing_light_keys_cancel() {
		let mut scene = Scene::new(1.0);
		let input = FrameInput {
			rotate_light_ccw: true,
			rotate_light_cw: true,
			..Default::default()
		};
		scene.update(&input, 0.25);
		assert!(scene.lights.angle().abs() < EPS);
	}

	#[test]
	fn aspect_tracks_window_size() {
		let mut scene = Scene::new(1.0);
		scene.set_aspect(1600, 900);
		assert!((scene.camera.aspect - 16.0 / 9.0).abs() < EPS);
		scene.set_aspect(0, 0);
		assert_eq!(scene.camera.aspect, 1.0);
	}

	#[test]
	fn object_transform_is_a_translation() {
		let obj = SceneObject::new(Shape::Pyramid, Point3::new(-1.0, 0.5, -3.0), [1.0; 4], 0.5, MaterialPreset::ReflectiveGlass);
		let m = obj.transform();
		assert_eq!(m.w.x, -1.0);
		assert_eq!(m.w.y, 0.5);
		assert_eq!(m.w.z, -3.0);
	}
}
