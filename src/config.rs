//! Command-line configuration.
//!
//! `room_viewer [WIDTH HEIGHT]`: both dimensions or neither.

use thiserror::Error;

pub const DEFAULT_WIDTH: u32 = 1024;
pub const DEFAULT_HEIGHT: u32 = 768;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
	#[error("invalid {name} {value:?}: expected a positive integer")]
	InvalidDimension { name: &'static str, value: String },

	#[error("a width was given without a height")]
	MissingHeight,

	#[error("unexpected argument {0:?}")]
	UnexpectedArgument(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
	pub width: u32,
	pub height: u32,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			width: DEFAULT_WIDTH,
			height: DEFAULT_HEIGHT,
		}
	}
}

fn parse_dimension(name: &'static str, value: String) -> Result<u32, ConfigError> {
	match value.parse::<u32>() {
		Ok(n) if n > 0 => Ok(n),
		_ => Err(ConfigError::InvalidDimension { name, value }),
	}
}

impl Config {
	/// Parses arguments after the program name.
	pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = String>,
	{
		let mut args = args.into_iter();
		let Some(width) = args.next() else {
			return Ok(Self::default());
		};
		let width = parse_dimension("width", width)?;
		let height = parse_dimension("height", args.next().ok_or(ConfigError::MissingHeight)?)?;

		if let Some(extra) = args.next() {
			return Err(ConfigError::UnexpectedArgument(extra));
		}

		Ok(Self { width, height })
	}
}
