use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// A user-facing configuration field, named the way it appears in error
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigField {
	Name,
	DestinationPath,
	PythonVersion,
	Description,
	Author,
	Email,
	Template,
}

impl ConfigField {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Name => "name",
			Self::DestinationPath => "destinationPath",
			Self::PythonVersion => "pythonVersion",
			Self::Description => "description",
			Self::Author => "author",
			Self::Email => "email",
			Self::Template => "template",
		}
	}
}

impl fmt::Display for ConfigField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum PybakeError {
	#[error(transparent)]
	#[diagnostic(code(pybake::io_error))]
	Io(#[from] std::io::Error),

	#[error("i/o failure at `{path}`: {source}")]
	#[diagnostic(
		code(pybake::file_system),
		help("any partially written project is left in place; remove it before retrying")
	)]
	FileSystem {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid value for `{field}`: {reason}")]
	#[diagnostic(code(pybake::invalid_config))]
	InvalidConfig { field: ConfigField, reason: String },

	#[error("path conflict at `{path}`: {reason}")]
	#[diagnostic(
		code(pybake::path_conflict),
		help("choose another name or destination, or pass `--overwrite` to write into an existing directory")
	)]
	PathConflict { path: String, reason: String },

	#[error("failed to render template `{template}`: {reason}")]
	#[diagnostic(code(pybake::template_render))]
	TemplateRender { template: String, reason: String },

	#[error("duplicate manifest path: `{0}`")]
	#[diagnostic(
		code(pybake::duplicate_manifest_path),
		help("each manifest entry must render to a unique relative path")
	)]
	DuplicateManifestPath(String),

	#[error("failed to parse defaults file: {0}")]
	#[diagnostic(
		code(pybake::defaults_parse),
		help("check that pybake.toml is valid TOML with a [defaults] section")
	)]
	DefaultsParse(String),
}

impl PybakeError {
	pub(crate) fn invalid(field: ConfigField, reason: impl Into<String>) -> Self {
		Self::InvalidConfig {
			field,
			reason: reason.into(),
		}
	}

	/// The configuration field this error refers to, if any.
	pub fn field(&self) -> Option<ConfigField> {
		match self {
			Self::InvalidConfig { field, .. } => Some(*field),
			_ => None,
		}
	}
}

pub type PybakeResult<T> = Result<T, PybakeError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
