use crate::{
	camera,
	error::StartupError,
	light,
	material::{MaterialCoefficients, MaterialState},
	model::{self, DrawModel, Vertex},
	primitives,
	resources::{MeshCache, MeshKey},
	scene, texture,
};
use cgmath::SquareMatrix;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
	r: 0.3,
	g: 0.3,
	b: 0.3,
	a: 1.0,
};

/// One drawable with its own uniform buffer, written once at creation.
struct RenderObject {
	mesh: MeshKey,
	#[allow(unused)]
	buffer: wgpu::Buffer,
	bind_group: wgpu::BindGroup,
}

pub struct Renderer {
	surface: wgpu::Surface<'static>,
	is_surface_configured: bool,
	device: wgpu::Device,
	queue: wgpu::Queue,
	config: wgpu::SurfaceConfiguration,
	max_dimension: u32,

	// uniform buffers
	// rewritten every frame
	camera_buffer: wgpu::Buffer,
	camera_bind_group: wgpu::BindGroup,
	light_buffer: wgpu::Buffer,
	light_bind_group: wgpu::BindGroup,

	// written once per object
	object_bind_group_layout: wgpu::BindGroupLayout,
	meshes: MeshCache,
	room: RenderObject,
	objects: Vec<RenderObject>,
	material_state: MaterialState,

	// rendering
	depth_texture: texture::Texture,
	render_pipeline: wgpu::RenderPipeline,
}

/// Shrinks a requested surface size to fit the device's texture limit,
/// keeping the aspect ratio.
fn fit_surface_size(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
	let largest = width.max(height);
	if largest <= max_dimension {
		return (width, height);
	}
	let fit = |n: u32| (n as u64 * max_dimension as u64 / largest as u64).clamp(1, max_dimension as u64) as u32;
	(fit(width), fit(height))
}

fn uniform_layout_entry(visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
	wgpu::BindGroupLayoutEntry {
		binding: 0,
		visibility,
		ty: wgpu::BindingType::Buffer {
			ty: wgpu::BufferBindingType::Uniform,
			has_dynamic_offset: false,
			min_binding_size: None,
		},
		count: None,
	}
}

impl Renderer {
	pub async fn new(window: Arc<Window>) -> Result<Self, StartupError> {
		let size = window.inner_size();

		let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
			backends: wgpu::Backends::PRIMARY,
			..Default::default()
		});

		let surface = instance.create_surface(window)?;

		let adapter = instance.request_adapter(&wgpu::RequestAdapterOptions {
			power_preference: wgpu::PowerPreference::default(),
			compatible_surface: Some(&surface),
			force_fallback_adapter: false,
		}).await?;

		let info = adapter.get_info();
		log::info!("using adapter {} ({:?})", info.name, info.backend);

		let (device, queue) = adapter.request_device(&wgpu::DeviceDescriptor {
			label: None,
			required_features: wgpu::Features::empty(),
			experimental_features: wgpu::ExperimentalFeatures::disabled(),
			required_limits: wgpu::Limits::default(),
			memory_hints: Default::default(),
			trace: wgpu::Trace::Off,
		}).await?;

		let max_dimension = device.limits().max_texture_dimension_2d;
		let surface_caps = surface.get_capabilities(&adapter);

		// lighting is computed for a linear framebuffer, so skip the sRGB encode
		let surface_format = surface_caps.formats.iter()
			.find(|f| !f.is_srgb())
			.or(surface_caps.formats.first())
			.copied()
			.ok_or(StartupError::NoSurfaceFormat)?;
		let (width, height) = fit_surface_size(size.width.max(1), size.height.max(1), max_dimension);
		if (width, height) != (size.width, size.height) {
			log::warn!("window size {}x{} exceeds the device limit, using {}x{}", size.width, size.height, width, height);
		}
		let config = wgpu::SurfaceConfiguration {
			usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
			format: surface_format,
			width,
			height,
			present_mode: wgpu::PresentMode::AutoVsync,
			alpha_mode: surface_caps.alpha_modes[0],
			view_formats: vec![],
			desired_maximum_frame_latency: 2,
		};

		// camera: vertex + fragment (view position for specular)
		let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
			label: Some("Camera Buffer"),
			contents: bytemuck::cast_slice(&[camera::CameraUniform::new()]),
			usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
		});
		let camera_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
			entries: &[uniform_layout_entry(wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT)],
			label: Some("camera_bind_group_layout"),
		});
		let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
			layout: &camera_bind_group_layout,
			entries: &[wgpu::BindGroupEntry {
				binding: 0,
				resource: camera_buffer.as_entire_binding(),
			}],
			label: Some("camera_bind_group"),
		});

		// object: model matrix and surface coefficients
		let object_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
			entries: &[uniform_layout_entry(wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT)],
			label: Some("object_bind_group_layout"),
		});

		// lights
		let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
			label: Some("Light Buffer"),
			contents: bytemuck::cast_slice(&[light::LightRig::new().setup()]),
			usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
		});
		let light_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
			entries: &[uniform_layout_entry(wgpu::ShaderStages::FRAGMENT)],
			label: Some("light_bind_group_layout"),
		});
		let light_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
			layout: &light_bind_group_layout,
			entries: &[wgpu::BindGroupEntry {
				binding: 0,
				resource: light_buffer.as_entire_binding(),
			}],
			label: Some("light_bind_group"),
		});

		let depth_texture = texture::Texture::create_depth_texture(&device, &config, "depth_texture");

		let render_pipeline = {
			let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
				label: Some("Render Pipeline Layout"),
				bind_group_layouts: &[
					&camera_bind_group_layout,
					&object_bind_group_layout,
					&light_bind_group_layout,
				],
				immediate_size: 0,
			});

			let shader = wgpu::ShaderModuleDescriptor {
				label: Some("Lit Shader"),
				source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
			};

			create_render_pipeline(
				"Lit Render Pipeline",
				&device,
				&layout,
				config.format,
				Some(texture::Texture::DEPTH_FORMAT),
				&[model::ModelVertex::desc()],
				shader,
			)
		};

		let mut meshes = MeshCache::default();
		meshes.get_or_create(&device, MeshKey::Room);
		let room_uniform = model::ObjectUniform::new(
			cgmath::Matrix4::identity(),
			&MaterialCoefficients::ROOM.track_color(primitives::ROOM_COLOR),
		);
		let room = create_render_object(&device, &object_bind_group_layout, MeshKey::Room, &room_uniform);

		let mut renderer = Self {
			surface,
			is_surface_configured: false,
			device,
			queue,
			config,
			max_dimension,

			camera_buffer,
			camera_bind_group,
			light_buffer,
			light_bind_group,

			object_bind_group_layout,
			meshes,
			room,
			objects: vec![],
			material_state: MaterialState::default(),

			depth_texture,
			render_pipeline,
		};
		if size.width > 0 && size.height > 0 {
			renderer.update_size(size.width, size.height);
		}

		Ok(renderer)
	}

	pub fn size(&self) -> (u32, u32) {
		(self.config.width, self.config.height)
	}

	pub fn update_size(&mut self, width: u32, height: u32) {
		if width == 0 || height == 0 {
			return;
		}
		let (width, height) = fit_surface_size(width, height, self.max_dimension);
		self.config.width = width;
		self.config.height = height;
		self.surface.configure(&self.device, &self.config);
		self.is_surface_configured = true;
		self.depth_texture = texture::Texture::create_depth_texture(&self.device, &self.config, "depth_texture");
	}

	/// Uploads geometry and uniforms for objects added since the last call.
	///
	/// Surfaces are resolved in list order, so an object without a material
	/// inherits the one before it.
	pub fn sync_objects(&mut self, scene: &scene::Scene) {
		for obj in scene.objects().iter().skip(self.objects.len()) {
			let key = MeshKey::primitive(obj.shape, obj.size);
			self.meshes.get_or_create(&self.device, key);

			let surface = self.material_state.apply(obj.material).track_color(obj.color);
			let uniform = model::ObjectUniform::new(obj.transform(), &surface);
			let render_object = create_render_object(&self.device, &self.object_bind_group_layout, key, &uniform);
			self.objects.push(render_object);
		}
	}

	pub fn update_camera(&self, camera: &camera::Camera) {
		let mut camera_uniform = camera::CameraUniform::new();
		camera_uniform.update_view_proj(camera);
		self.queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera_uniform]));
	}

	pub fn update_light(&self, lighting: &light::LightingUniform) {
		self.queue.write_buffer(&self.light_buffer, 0, bytemuck::cast_slice(&[*lighting]));
	}

	pub fn render(&mut self, scene: &scene::Scene) -> Result<(), wgpu::SurfaceError> {
		self.sync_objects(scene);
		self.update_camera(&scene.camera);
		// full light state every frame
		self.update_light(&scene.lights.setup());

		if !self.is_surface_configured {
			return Ok(());
		}

		let output = self.surface.get_current_texture()?;

		let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

		let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
			label: Some("Render Encoder"),
		});

		{
			let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
				label: Some("Render Pass"),
				color_attachments: &[Some(wgpu::RenderPassColorAttachment {
					view: &view,
					resolve_target: None,
					ops: wgpu::Operations {
						load: wgpu::LoadOp::Clear(CLEAR_COLOR),
						store: wgpu::StoreOp::Store,
					},
					depth_slice: None,
				})],
				depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
					view: &self.depth_texture.view,
					depth_ops: Some(wgpu::Operations {
						load: wgpu::LoadOp::Clear(1.0),
						store: wgpu::StoreOp::Store,
					}),
					stencil_ops: None,
				}),
				occlusion_query_set: None,
				timestamp_writes: None,
				multiview_mask: None,
			});

			render_pass.set_pipeline(&self.render_pipeline);
			render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
			render_pass.set_bind_group(2, &self.light_bind_group, &[]);

			// room first, then objects in insertion order
			for obj in std::iter::once(&self.room).chain(&self.objects) {
				if let Some(mesh) = self.meshes.get(&obj.mesh) {
					render_pass.draw_mesh(mesh, &obj.bind_group);
				}
			}
		}

		self.queue.submit(std::iter::once(encoder.finish()));
		output.present();

		Ok(())
	}
}

fn create_render_object(
	device: &wgpu::Device,
	layout: &wgpu::BindGroupLayout,
	mesh: MeshKey,
	uniform: &model::ObjectUniform,
) -> RenderObject {
	let label = mesh.label();
	let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
		label: Some(&format!("{} Object Buffer", label)),
		contents: bytemuck::cast_slice(&[*uniform]),
		usage: wgpu::BufferUsages::UNIFORM,
	});
	let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
		layout,
		entries: &[wgpu::BindGroupEntry {
			binding: 0,
			resource: buffer.as_entire_binding(),
		}],
		label: Some(&format!("{} object_bind_group", label)),
	});

	RenderObject { mesh, buffer, bind_group }
}

fn create_render_pipeline(
	label: &str,
	device: &wgpu::Device,
	layout: &wgpu::PipelineLayout,
	color_format: wgpu::TextureFormat,
	depth_format: Option<wgpu::TextureFormat>,
	vertex_layouts: &[wgpu::VertexBufferLayout],
	shader: wgpu::ShaderModuleDescriptor,
) -> wgpu::RenderPipeline {
	let shader = device.create_shader_module(shader);

	device.create_render_pipeline(&wgpu::RenderPipelineDescriptor{
		label: Some(label),
		layout: Some(layout),
		vertex: wgpu::VertexState {
			module: &shader,
			entry_point: Some("vs_main"),
			buffers: vertex_layouts,
			compilation_options: Default::default(),
		},
		fragment: Some(wgpu::FragmentState {
			module: &shader,
			entry_point: Some("fs_main"),
			targets: &[Some(wgpu::ColorTargetState {
				format: color_format,
				blend: Some(wgpu::BlendState::ALPHA_BLENDING),
				write_mask: wgpu::ColorWrites::ALL,
			})],
			compilation_options: Default::default(),
		}),
		primitive: wgpu::PrimitiveState {
			topology: wgpu::PrimitiveTopology::TriangleList,
			strip_index_format: None,
			front_face: wgpu::FrontFace::Ccw,
			// room faces and pyramid sides are seen from both sides
			cull_mode: None,
			polygon_mode: wgpu::PolygonMode::Fill,
			unclipped_depth: false,
			conservative: false,
		},
		depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
			format,
			depth_write_enabled: true,
			depth_compare: wgpu::CompareFunction::Less,
			stencil: wgpu::StencilState::default(),
			bias: wgpu::DepthBiasState::default(),
		}),
		multisample: wgpu::MultisampleState {
			count: 1,
			mask: !0,
			alpha_to_coverage_enabled: false,
		},
		multiview_mask: None,
		cache: None,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn surface_size_within_limit_is_kept() {
		assert_eq!(fit_surface_size(1024, 768, 8192), (1024, 768));
		assert_eq!(fit_surface_size(8192, 8192, 8192), (8192, 8192));
	}

	#[test]
	fn oversized_surface_is_scaled_to_limit() {
		assert_eq!(fit_surface_size(20000, 10000, 8192), (8192, 4096));
		assert_eq!(fit_surface_size(100, 16384, 8192), (50, 8192));
		assert_eq!(fit_surface_size(100_000, 1, 8192), (8192, 1));
	}
}
