use thiserror::Error;

/// Failures that abort startup. None of them are retried.
#[derive(Debug, Error)]
pub enum StartupError {
	#[error("failed to create event loop: {0}")]
	EventLoop(#[from] winit::error::EventLoopError),

	#[error("failed to create window: {0}")]
	Window(#[from] winit::error::OsError),

	#[error("failed to create rendering surface: {0}")]
	Surface(#[from] wgpu::CreateSurfaceError),

	#[error("no compatible graphics adapter: {0}")]
	Adapter(#[from] wgpu::RequestAdapterError),

	#[error("failed to create graphics device: {0}")]
	Device(#[from] wgpu::RequestDeviceError),

	#[error("surface reports no supported formats")]
	NoSurfaceFormat,
}
