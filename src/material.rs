//! Named material presets and the per-surface coefficients they resolve to.

/// Ambient, diffuse and specular reflectance plus a specular exponent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MaterialCoefficients {
	pub ambient: [f32; 4],
	pub diffuse: [f32; 4],
	pub specular: [f32; 4],
	pub shininess: f32,
}

impl MaterialCoefficients {
	/// Flat, nearly black coefficients the room is drawn with.
	pub const ROOM: Self = Self {
		ambient: [0.02, 0.02, 0.02, 1.0],
		diffuse: [0.07, 0.07, 0.07, 1.0],
		specular: [0.0, 0.0, 0.0, 1.0],
		shininess: 1.0,
	};

	/// Surface seen by the shader once a vertex color is layered on top.
	///
	/// Ambient and diffuse follow the color; specular and shininess stay
	/// with the material.
	pub fn track_color(&self, color: [f32; 4]) -> Self {
		Self {
			ambient: color,
			diffuse: color,
			..*self
		}
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MaterialPreset {
	PolishedMetal,
	RoughPlastic,
	ReflectiveGlass,
	BrushedMetal,
	MatMaterial,
}

impl MaterialPreset {
	pub const ALL: [MaterialPreset; 5] = [
		MaterialPreset::PolishedMetal,
		MaterialPreset::RoughPlastic,
		MaterialPreset::ReflectiveGlass,
		MaterialPreset::BrushedMetal,
		MaterialPreset::MatMaterial,
	];

	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|preset| preset.name() == name)
	}

	pub fn name(&self) -> &'static str {
		match self {
			MaterialPreset::PolishedMetal => "polished_metal",
			MaterialPreset::RoughPlastic => "rough_plastic",
			MaterialPreset::ReflectiveGlass => "reflective_glass",
			MaterialPreset::BrushedMetal => "brushed_metal",
			MaterialPreset::MatMaterial => "mat_material",
		}
	}

	pub fn coefficients(&self) -> MaterialCoefficients {
		match self {
			MaterialPreset::PolishedMetal => MaterialCoefficients {
				ambient: [0.1, 0.1, 0.1, 1.0],
				diffuse: [0.1, 0.1, 0.1, 1.0],
				specular: [0.9, 0.9, 0.9, 1.0],
				shininess: 100.0,
			},
			MaterialPreset::RoughPlastic => MaterialCoefficients {
				ambient: [0.1, 0.1, 0.1, 1.0],
				diffuse: [0.2, 0.2, 0.2, 1.0],
				specular: [0.0, 0.0, 0.0, 1.0],
				shininess: 5.0,
			},
			MaterialPreset::ReflectiveGlass => MaterialCoefficients {
				ambient: [0.05, 0.05, 0.05, 0.7],
				diffuse: [0.1, 0.1, 0.1, 0.7],
				specular: [0.1, 0.1, 0.1, 0.7],
				shininess: 70.0,
			},
			MaterialPreset::BrushedMetal => MaterialCoefficients {
				ambient: [0.1, 0.1, 0.1, 1.0],
				diffuse: [0.3, 0.1, 0.1, 1.0],
				specular: [0.1, 0.1, 0.1, 1.0],
				shininess: 5.0,
			},
			MaterialPreset::MatMaterial => MaterialCoefficients {
				ambient: [0.1, 0.1, 0.1, 1.0],
				diffuse: [0.1, 0.1, 0.1, 1.0],
				specular: [0.0, 0.0, 0.0, 1.0],
				shininess: 0.0,
			},
		}
	}
}

/// The material currently in effect while a frame's draw list is walked.
///
/// Applying a preset replaces it. Applying nothing, or a name that matches no
/// preset, leaves whatever was set before in place.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MaterialState {
	current: MaterialCoefficients,
}

impl Default for MaterialState {
	fn default() -> Self {
		Self::new(MaterialCoefficients::ROOM)
	}
}

impl MaterialState {
	pub fn new(initial: MaterialCoefficients) -> Self {
		Self { current: initial }
	}

	pub fn current(&self) -> MaterialCoefficients {
		self.current
	}

	pub fn apply(&mut self, preset: Option<MaterialPreset>) -> MaterialCoefficients {
		if let Some(preset) = preset {
			self.current = preset.coefficients();
		}
		self.current
	}

	/// Returns false when `name` is not a known preset.
	pub fn apply_named(&mut self, name: &str) -> bool {
		let preset = MaterialPreset::from_name(name);
		self.apply(preset);
		preset.is_some()
	}
}
