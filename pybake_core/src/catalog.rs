//! The catalog of project templates that `pybake` can generate.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::ConfigField;
use crate::ManifestEntry;
use crate::PybakeError;
use crate::manifest::MINIMAL_MANIFEST;
use crate::manifest::STANDARD_MANIFEST;

/// A selectable project template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
	/// Every generated file, including git hooks and the CI workflow.
	#[default]
	Standard,
	/// Packaging, sources and tests only.
	Minimal,
}

impl TemplateKind {
	/// All catalog entries in display order.
	pub const ALL: [TemplateKind; 2] = [Self::Standard, Self::Minimal];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Standard => "standard",
			Self::Minimal => "minimal",
		}
	}

	pub fn title(self) -> &'static str {
		match self {
			Self::Standard => "Standard Python Project",
			Self::Minimal => "Minimal Python Project",
		}
	}

	pub fn description(self) -> &'static str {
		match self {
			Self::Standard => "Complete Python project with all modern tools",
			Self::Minimal => "Basic Python project with essential tools",
		}
	}

	/// Tooling referenced by the generated files.
	pub fn features(self) -> &'static [&'static str] {
		match self {
			Self::Standard => &[
				"uv for dependency management",
				"pyright for static analysis",
				"ruff for linting and formatting",
				"beartype for runtime type checking",
				"pytest for testing",
				"pre-commit for git hooks",
				"GitHub Actions for CI/CD",
			],
			Self::Minimal => &[
				"uv for dependency management",
				"ruff for linting and formatting",
				"pytest for testing",
			],
		}
	}

	/// The static manifest materialized for this template.
	pub fn manifest(self) -> &'static [ManifestEntry] {
		match self {
			Self::Standard => &STANDARD_MANIFEST,
			Self::Minimal => &MINIMAL_MANIFEST,
		}
	}
}

impl fmt::Display for TemplateKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for TemplateKind {
	type Err = PybakeError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let value = value.trim();
		Self::ALL
			.into_iter()
			.find(|kind| kind.as_str().eq_ignore_ascii_case(value))
			.ok_or_else(|| {
				let known: Vec<_> = Self::ALL.iter().map(|kind| kind.as_str()).collect();
				PybakeError::invalid(
					ConfigField::Template,
					format!("unknown template `{value}` (available: {})", known.join(", ")),
				)
			})
	}
}

/// Serializable summary of a catalog entry, used by `list-templates`.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateSummary {
	pub name: &'static str,
	pub title: &'static str,
	pub description: &'static str,
	pub features: &'static [&'static str],
	/// Relative path templates of the files this template generates.
	pub files: Vec<&'static str>,
}

impl From<TemplateKind> for TemplateSummary {
	fn from(kind: TemplateKind) -> Self {
		Self {
			name: kind.as_str(),
			title: kind.title(),
			description: kind.description(),
			features: kind.features(),
			files: kind.manifest().iter().map(|entry| entry.path).collect(),
		}
	}
}

/// Summaries of every catalog entry.
pub fn template_summaries() -> Vec<TemplateSummary> {
	TemplateKind::ALL.into_iter().map(TemplateSummary::from).collect()
}
