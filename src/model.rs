use wgpu::util::DeviceExt;

use crate::material::MaterialCoefficients;
use crate::primitives::MeshData;

pub trait Vertex {
	fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
	pub position: [f32; 3],
	pub normal: [f32; 3],
}

impl Vertex for ModelVertex {
	fn desc() -> wgpu::VertexBufferLayout<'static> {
		use std::mem;
		wgpu::VertexBufferLayout {
			array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
			step_mode: wgpu::VertexStepMode::Vertex,
			attributes: &[
				wgpu::VertexAttribute { // position
					offset: 0,
					shader_location: 0,
					format: wgpu::VertexFormat::Float32x3,
				},
				wgpu::VertexAttribute { // normal
					offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
					shader_location: 1,
					format: wgpu::VertexFormat::Float32x3,
				},
			],
		}
	}
}

/// Geometry uploaded once into vertex and index buffers.
pub struct Mesh {
	name: String,
	pub vertex_buffer: wgpu::Buffer,
	pub index_buffer: wgpu::Buffer,
	pub num_elements: u32,
}

impl Mesh {
	pub fn from_data(device: &wgpu::Device, name: &str, data: &MeshData) -> Self {
		let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
			label: Some(&format!("{} Vertex Buffer", name)),
			contents: bytemuck::cast_slice(&data.vertices),
			usage: wgpu::BufferUsages::VERTEX,
		});
		let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
			label: Some(&format!("{} Index Buffer", name)),
			contents: bytemuck::cast_slice(&data.indices),
			usage: wgpu::BufferUsages::INDEX,
		});

		Self {
			name: name.to_string(),
			vertex_buffer,
			index_buffer,
			num_elements: data.indices.len() as u32,
		}
	}
}

pub trait DrawModel<'a> {
	fn draw_mesh(
		&mut self,
		mesh: &'a Mesh,
		object_bind_group: &'a wgpu::BindGroup,
	);
}

impl<'a, 'b> DrawModel<'b> for wgpu::RenderPass<'a> where 'b: 'a, {
	fn draw_mesh(&mut self, mesh: &'b Mesh, object_bind_group: &'b wgpu::BindGroup) {
		self.insert_debug_marker(&mesh.name);
		self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
		self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
		self.set_bind_group(1, object_bind_group, &[]);
		self.draw_indexed(0..mesh.num_elements, 0, 0..1);
	}
}

/// Per-object uniform: placement plus the surface resolved for it.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
	pub model: [[f32; 4]; 4],
	pub ambient: [f32; 4],
	pub diffuse: [f32; 4],
	pub specular: [f32; 4],
	/// x = shininess
	pub shininess: [f32; 4],
}

impl ObjectUniform {
	pub fn new(transform: cgmath::Matrix4<f32>, surface: &MaterialCoefficients) -> Self {
		Self {
			model: transform.into(),
			ambient: surface.ambient,
			diffuse: surface.diffuse,
			specular: surface.specular,
			shininess: [surface.shininess, 0.0, 0.0, 0.0],
		}
	}
}
