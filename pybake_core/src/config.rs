use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::PybakeError;
use crate::PybakeResult;
use crate::TemplateKind;

/// Python version used when neither the caller nor a defaults file supplies
/// one.
pub const DEFAULT_PYTHON_VERSION: &str = "3.12";

/// Supported defaults file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["pybake.toml", ".pybake.toml", ".config/pybake.toml"];

/// Fallback values applied to fields the caller leaves unset.
///
/// ```toml
/// [defaults]
/// python_version = "3.11"
/// author = "Jane Doe"
/// email = "jane@example.com"
/// description = "Yet another Python project"
/// template = "minimal"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ProjectDefaults {
	#[serde(default)]
	pub python_version: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub author: Option<String>,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub template: Option<TemplateKind>,
}

#[derive(Debug, Default, Deserialize)]
struct DefaultsFile {
	#[serde(default)]
	defaults: ProjectDefaults,
}

impl ProjectDefaults {
	/// Resolve the defaults file path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load defaults from the first discovered file at `root`. Returns `None`
	/// if no candidate exists.
	pub fn load(root: &Path) -> PybakeResult<Option<ProjectDefaults>> {
		let Some(path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %path.display(), "loading defaults file");
		let content = std::fs::read_to_string(&path)?;
		Self::parse(&content).map(Some)
	}

	/// Parse the contents of a defaults file.
	pub fn parse(content: &str) -> PybakeResult<ProjectDefaults> {
		let file: DefaultsFile =
			toml::from_str(content).map_err(|e| PybakeError::DefaultsParse(e.to_string()))?;
		Ok(file.defaults)
	}

	/// The python version to fall back to.
	pub fn python_version(&self) -> &str {
		self.python_version
			.as_deref()
			.unwrap_or(DEFAULT_PYTHON_VERSION)
	}
}
