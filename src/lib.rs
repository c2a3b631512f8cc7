pub mod camera;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod light;
pub mod material;
pub mod model;
pub mod primitives;
pub mod renderer;
pub mod resources;
pub mod scene;
mod texture;

use std::sync::Arc;
use std::time::Instant;

use winit::{
	application::ApplicationHandler,
	dpi::PhysicalSize,
	event::*,
	event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
	keyboard::{KeyCode, PhysicalKey},
	window::{CursorGrabMode, Window},
};

use config::Config;
use error::StartupError;

pub const WINDOW_TITLE: &str = "3D Graphics Scene";

pub struct State {
	window: Arc<Window>,
	renderer: renderer::Renderer,
	scene: scene::Scene,
	input: input::InputHandler,
	clock: clock::FrameClock,
}

impl State {
	pub fn new(window: Arc<Window>, renderer: renderer::Renderer) -> Self {
		let (width, height) = renderer.size();
		let mut scene = scene::Scene::with_default_objects(1.0);
		scene.set_aspect(width, height);

		Self {
			window,
			renderer,
			scene,
			input: input::InputHandler::new(),
			clock: clock::FrameClock::new(clock::TARGET_FPS, Instant::now()),
		}
	}

	pub fn resize(&mut self, width: u32, height: u32) {
		if width > 0 && height > 0 {
			self.renderer.update_size(width, height);
			self.scene.set_aspect(width, height);
		}
	}

	pub fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: PhysicalKey, key_state: ElementState) {
		if key == PhysicalKey::Code(KeyCode::Escape) && key_state.is_pressed() {
			event_loop.exit();
		} else {
			self.input.process_key(key, key_state);
		}
	}

	fn update(&mut self) {
		let dt = self.clock.tick(Instant::now());
		let frame = self.input.take_frame();
		self.scene.update(&frame, dt);
	}

	pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
		self.renderer.render(&self.scene)
	}
}

fn capture_cursor(window: &Window) {
	let grabbed = window
		.set_cursor_grab(CursorGrabMode::Locked)
		.or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
	if let Err(e) = grabbed {
		log::warn!("unable to grab cursor: {}", e);
	}
	window.set_cursor_visible(false);
}

pub struct App {
	config: Config,
	state: Option<State>,
	startup_error: Option<StartupError>,
}

impl App {
	pub fn new(config: Config) -> Self {
		Self {
			config,
			state: None,
			startup_error: None,
		}
	}

	fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<State, StartupError> {
		let window_attributes = Window::default_attributes()
			.with_title(WINDOW_TITLE)
			.with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

		let window = Arc::new(event_loop.create_window(window_attributes)?);
		log::info!("created {}x{} window", self.config.width, self.config.height);

		let renderer = pollster::block_on(renderer::Renderer::new(window.clone()))?;
		capture_cursor(&window);

		Ok(State::new(window, renderer))
	}
}

impl ApplicationHandler for App {
	fn resumed(&mut self, event_loop: &ActiveEventLoop) {
		if self.state.is_some() {
			return;
		}

		match self.start(event_loop) {
			Ok(state) => self.state = Some(state),
			Err(e) => {
				self.startup_error = Some(e);
				event_loop.exit();
			}
		}
	}

	fn window_event(
		&mut self,
		event_loop: &ActiveEventLoop,
		_window_id: winit::window::WindowId,
		event: WindowEvent,
	) {
		let state = match &mut self.state {
			Some(state) => state,
			None => return,
		};

		match event {
			WindowEvent::CloseRequested => event_loop.exit(),
			WindowEvent::Resized(size) => state.resize(size.width, size.height),
			WindowEvent::RedrawRequested => {
				state.update();
				match state.render() {
					Ok(_) => {},
					Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
						let size = state.window.inner_size();
						state.resize(size.width, size.height);
					}
					Err(e) => {
						log::error!("Unable to render {}", e);
					}
				}
			}
			WindowEvent::KeyboardInput {
				event:
					KeyEvent {
						physical_key,
						state: key_state,
						..
					},
					..
			} => state.handle_key(event_loop, physical_key, key_state),
			WindowEvent::MouseWheel { delta, .. } => {
				state.scene.lights.adjust_intensity(input::scroll_lines(delta));
			}
			WindowEvent::Focused(false) => state.input.reset(),
			_ => {}
		}
	}

	fn device_event(
		&mut self,
		_event_loop: &ActiveEventLoop,
		_device_id: DeviceId,
		event: DeviceEvent,
	) {
		if let (Some(state), DeviceEvent::MouseMotion { delta }) = (&mut self.state, event) {
			state.input.process_mouse_motion(delta);
		}
	}

	fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
		let Some(state) = &self.state else {
			return;
		};

		if state.clock.is_due(Instant::now()) {
			state.window.request_redraw();
		}
		event_loop.set_control_flow(ControlFlow::WaitUntil(state.clock.next_frame()));
	}
}

pub fn run(config: Config) -> anyhow::Result<()> {
	let event_loop = EventLoop::new().map_err(StartupError::from)?;
	let mut app = App::new(config);
	event_loop.run_app(&mut app)?;

	if let Some(e) = app.startup_error.take() {
		return Err(e.into());
	}

	Ok(())
}
