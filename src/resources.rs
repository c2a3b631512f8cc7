use std::collections::HashMap;

use crate::{model, primitives, scene::Shape};

/// Key for one generated mesh. Sizes are compared bit for bit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MeshKey {
	Room,
	Primitive(Shape, u32),
}

impl MeshKey {
	pub fn primitive(shape: Shape, size: f32) -> Self {
		MeshKey::Primitive(shape, size.to_bits())
	}

	pub fn label(&self) -> String {
		match self {
			MeshKey::Room => "room".to_string(),
			MeshKey::Primitive(shape, bits) => format!("{} {}", shape.name(), f32::from_bits(*bits)),
		}
	}

	pub fn geometry(&self) -> primitives::MeshData {
		match self {
			MeshKey::Room => primitives::room(),
			MeshKey::Primitive(shape, bits) => shape.geometry(f32::from_bits(*bits)),
		}
	}
}

/// Static geometry uploaded once and shared by every object that needs it.
#[derive(Default)]
pub struct MeshCache {
	meshes: HashMap<MeshKey, model::Mesh>,
}

impl MeshCache {
	pub fn get_or_create(&mut self, device: &wgpu::Device, key: MeshKey) -> &model::Mesh {
		self.meshes.entry(key).or_insert_with(|| {
			let data = key.geometry();
			log::debug!("uploading mesh {} ({} triangles)", key.label(), data.triangle_count());
			model::Mesh::from_data(device, &key.label(), &data)
		})
	}

	pub fn get(&self, key: &MeshKey) -> Option<&model::Mesh> {
		self.meshes.get(key)
	}
}
