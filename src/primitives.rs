//! Procedural geometry for the room and the scene primitives.
//!
//! Everything here is pure: a shape and a size go in, vertex and index data
//! in object-local space come out.

use cgmath::{InnerSpace, Vector3};

use crate::model::ModelVertex;

/// Half-extent of the room. The floor sits at y = 0 and the ceiling at y = ROOM_SIZE.
pub const ROOM_SIZE: f32 = 8.0;
pub const ROOM_COLOR: [f32; 4] = [0.2, 0.2, 0.2, 1.0];

/// Subdivisions used for scene spheres.
pub const SPHERE_SLICES: u32 = 64;
pub const SPHERE_STACKS: u32 = 64;

#[derive(Debug, Clone, Default)]
pub struct MeshData {
	pub vertices: Vec<ModelVertex>,
	pub indices: Vec<u32>,
}

impl MeshData {
	pub fn triangle_count(&self) -> usize {
		self.indices.len() / 3
	}
}

#[derive(Default)]
struct MeshBuilder {
	data: MeshData,
}

impl MeshBuilder {
	fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3]) -> u32 {
		let idx = self.data.vertices.len() as u32;
		self.data.vertices.push(ModelVertex { position, normal });
		idx
	}

	fn add_triangle(&mut self, normal: [f32; 3], corners: [[f32; 3]; 3]) {
		for corner in corners {
			let idx = self.push_vertex(corner, normal);
			self.data.indices.push(idx);
		}
	}

	// split as (0, 1, 2) and (0, 2, 3)
	fn add_quad(&mut self, normal: [f32; 3], corners: [[f32; 3]; 4]) {
		let base = self.data.vertices.len() as u32;
		for corner in corners {
			self.push_vertex(corner, normal);
		}
		self.data.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
	}

	fn finish(self) -> MeshData {
		self.data
	}
}

/// The open box the scene sits in. All six normals face into the room.
pub fn room() -> MeshData {
	let s = ROOM_SIZE;
	let mut builder = MeshBuilder::default();

	// floor
	builder.add_quad([0.0, 1.0, 0.0], [[-s, 0.0, -s], [s, 0.0, -s], [s, 0.0, s], [-s, 0.0, s]]);
	// ceiling
	builder.add_quad([0.0, -1.0, 0.0], [[-s, s, -s], [s, s, -s], [s, s, s], [-s, s, s]]);

	// walls
	builder.add_quad([0.0, 0.0, 1.0], [[-s, 0.0, -s], [s, 0.0, -s], [s, s, -s], [-s, s, -s]]);
	builder.add_quad([-1.0, 0.0, 0.0], [[s, 0.0, -s], [s, 0.0, s], [s, s, s], [s, s, -s]]);
	builder.add_quad([1.0, 0.0, 0.0], [[-s, 0.0, -s], [-s, 0.0, s], [-s, s, s], [-s, s, -s]]);
	builder.add_quad([0.0, 0.0, -1.0], [[-s, 0.0, s], [s, 0.0, s], [s, s, s], [-s, s, s]]);

	builder.finish()
}

/// UV sphere centered on the origin with smooth per-vertex normals.
///
/// `slices` divide the sphere around the vertical axis and `stacks` from pole
/// to pole. Rows and columns are duplicated at the seam so every ring has
/// `slices + 1` vertices.
pub fn sphere(radius: f32, slices: u32, stacks: u32) -> MeshData {
	let slices = slices.max(3);
	let stacks = stacks.max(2);
	let mut data = MeshData::default();

	for stack in 0..=stacks {
		let phi = std::f32::consts::PI * stack as f32 / stacks as f32;
		let (sin_phi, cos_phi) = phi.sin_cos();
		for slice in 0..=slices {
			let theta = std::f32::consts::TAU * slice as f32 / slices as f32;
			let (sin_theta, cos_theta) = theta.sin_cos();
			let normal = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
			data.vertices.push(ModelVertex {
				position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
				normal,
			});
		}
	}

	let ring = slices + 1;
	for stack in 0..stacks {
		for slice in 0..slices {
			let a = stack * ring + slice;
			let b = a + ring;
			// degenerate triangles at the poles are skipped
			if stack != 0 {
				data.indices.extend_from_slice(&[a, a + 1, b]);
			}
			if stack != stacks - 1 {
				data.indices.extend_from_slice(&[a + 1, b + 1, b]);
			}
		}
	}

	data
}

/// Axis-aligned cube with half-extent `size` and one flat normal per face.
pub fn cube(size: f32) -> MeshData {
	let s = size;
	let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
		([0.0, 0.0, 1.0], [[-s, -s, s], [s, -s, s], [s, s, s], [-s, s, s]]),
		([0.0, 0.0, -1.0], [[-s, -s, -s], [-s, s, -s], [s, s, -s], [s, -s, -s]]),
		([0.0, 1.0, 0.0], [[-s, s, -s], [-s, s, s], [s, s, s], [s, s, -s]]),
		([0.0, -1.0, 0.0], [[-s, -s, -s], [s, -s, -s], [s, -s, s], [-s, -s, s]]),
		([1.0, 0.0, 0.0], [[s, -s, -s], [s, s, -s], [s, s, s], [s, -s, s]]),
		([-1.0, 0.0, 0.0], [[-s, -s, -s], [-s, -s, s], [-s, s, s], [-s, s, -s]]),
	];

	let mut builder = MeshBuilder::default();
	for (normal, corners) in faces {
		builder.add_quad(normal, corners);
	}
	builder.finish()
}

/// Normals used for the pyramid sides, in front, right, back, left order.
///
/// These average the two axes a side leans along instead of using the true
/// plane normal of the triangle.
pub fn pyramid_side_normals() -> [[f32; 3]; 4] {
	[
		Vector3::new(0.0, 1.0, 1.0).normalize().into(),
		Vector3::new(1.0, 1.0, 0.0).normalize().into(),
		Vector3::new(0.0, 1.0, -1.0).normalize().into(),
		Vector3::new(-1.0, 1.0, 0.0).normalize().into(),
	]
}

/// Square pyramid with its apex at (0, size, 0) and its base at y = -size.
pub fn pyramid(size: f32) -> MeshData {
	let s = size;
	let apex = [0.0, s, 0.0];
	let sides = [
		[apex, [-s, -s, s], [s, -s, s]],
		[apex, [s, -s, s], [s, -s, -s]],
		[apex, [s, -s, -s], [-s, -s, -s]],
		[apex, [-s, -s, -s], [-s, -s, s]],
	];

	let mut builder = MeshBuilder::default();
	for (normal, corners) in pyramid_side_normals().into_iter().zip(sides) {
		builder.add_triangle(normal, corners);
	}
	builder.add_quad([0.0, -1.0, 0.0], [[-s, -s, s], [s, -s, s], [s, -s, -s], [-s, -s, -s]]);
	builder.finish()
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f32 = 1e-5;

	fn length(v: [f32; 3]) -> f32 {
		(v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
	}

	fn assert_vec_eq(a: [f32; 3], b: [f32; 3]) {
		for i in 0..3 {
			assert!((a[i] - b[i]).abs() < EPS, "{:?} != {:?}", a, b);
		}
	}

	fn assert_indices_in_range(data: &MeshData) {
		let n = data.vertices.len() as u32;
		assert!(data.indices.iter().all(|&i| i < n));
		assert_eq!(data.indices.len() % 3, 0);
	}

	#[test]
	fn room_has_six_inward_faces() {
		let data = room();
		assert_eq!(data.vertices.len(), 24);
		assert_eq!(data.triangle_count(), 12);
		assert_indices_in_range(&data);

		// every normal points from its face toward the room center
		let center = [0.0, ROOM_SIZE / 2.0, 0.0];
		for v in &data.vertices {
			let to_center = [
				center[0] - v.position[0],
				center[1] - v.position[1],
				center[2] - v.position[2],
			];
			let dot = to_center[0] * v.normal[0] + to_center[1] * v.normal[1] + to_center[2] * v.normal[2];
			assert!(dot > 0.0, "normal {:?} at {:?} faces outward", v.normal, v.position);
		}
	}

	#[test]
	fn room_spans_floor_to_ceiling() {
		let data = room();
		let min_y = data.vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
		let max_y = data.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
		let max_x = data.vertices.iter().map(|v| v.position[0].abs()).fold(0.0, f32::max);
		assert_eq!(min_y, 0.0);
		assert_eq!(max_y, ROOM_SIZE);
		assert_eq!(max_x, ROOM_SIZE);
	}

	#[test]
	fn sphere_normals_are_smooth_and_unit() {
		let radius = 0.7;
		let data = sphere(radius, SPHERE_SLICES, SPHERE_STACKS);
		assert_eq!(data.vertices.len(), ((SPHERE_SLICES + 1) * (SPHERE_STACKS + 1)) as usize);
		assert_indices_in_range(&data);
		for v in &data.vertices {
			assert!((length(v.normal) - 1.0).abs() < EPS);
			assert!((length(v.position) - radius).abs() < EPS);
			assert_vec_eq(v.normal, [v.position[0] / radius, v.position[1] / radius, v.position[2] / radius]);
		}
	}

	#[test]
	fn sphere_skips_pole_degenerates() {
		let data = sphere(1.0, 8, 4);
		// two caps of one triangle per slice plus two per slice in the middle bands
		assert_eq!(data.triangle_count(), 8 + 8 + 2 * 8 * 2);
	}

	#[test]
	fn cube_faces_have_flat_normals() {
		let size = 0.6;
		let data = cube(size);
		assert_eq!(data.vertices.len(), 24);
		assert_eq!(data.triangle_count(), 12);
		assert_indices_in_range(&data);

		for face in data.vertices.chunks(4) {
			let normal = face[0].normal;
			assert!(face.iter().all(|v| v.normal == normal));
			// every corner lies on the plane the normal points at
			for v in face {
				let d = v.position[0] * normal[0] + v.position[1] * normal[1] + v.position[2] * normal[2];
				assert!((d - size).abs() < EPS);
			}
		}
	}

	#[test]
	fn cube_winding_is_counter_clockwise_from_outside() {
		let data = cube(1.0);
		for tri in data.indices.chunks(3) {
			let a = Vector3::from(data.vertices[tri[0] as usize].position);
			let b = Vector3::from(data.vertices[tri[1] as usize].position);
			let c = Vector3::from(data.vertices[tri[2] as usize].position);
			let n = Vector3::from(data.vertices[tri[0] as usize].normal);
			assert!((b - a).cross(c - a).dot(n) > 0.0);
		}
	}

	#[test]
	fn pyramid_uses_averaged_side_normals() {
		let size = 0.5;
		let data = pyramid(size);
		assert_eq!(data.vertices.len(), 4 * 3 + 4);
		assert_eq!(data.triangle_count(), 4 + 2);
		assert_indices_in_range(&data);

		let h = std::f32::consts::FRAC_1_SQRT_2;
		let expected = [[0.0, h, h], [h, h, 0.0], [0.0, h, -h], [-h, h, 0.0]];
		for (side, normal) in data.vertices.chunks(3).take(4).zip(expected) {
			assert_vec_eq(side[0].position, [0.0, size, 0.0]);
			for v in side {
				assert_vec_eq(v.normal, normal);
			}
		}
		for v in &data.vertices[12..] {
			assert_vec_eq(v.normal, [0.0, -1.0, 0.0]);
			assert_eq!(v.position[1], -size);
		}
	}
}
