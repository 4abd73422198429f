use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::ConfigField;
use crate::PybakeError;
use crate::PybakeResult;
use crate::TemplateKind;
use crate::config::ProjectDefaults;

/// Author rendered into generated files when none is configured.
pub const DEFAULT_AUTHOR: &str = "Your Name";
/// Email rendered into generated files when none is configured.
pub const DEFAULT_EMAIL: &str = "your.email@example.com";

/// Characters that are rejected in project names because at least one
/// common filesystem refuses them.
const RESERVED_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const PYTHON_KEYWORDS: &[&str] = &[
	"and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
	"else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
	"nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

/// Raw, possibly incomplete user input for a new project.
#[derive(Debug, Clone, Default)]
pub struct RawProjectInput {
	pub name: Option<String>,
	pub destination_path: Option<PathBuf>,
	pub python_version: Option<String>,
	pub description: Option<String>,
	pub author: Option<String>,
	pub email: Option<String>,
	pub template: Option<String>,
	/// Defaults to `true` when unset.
	pub interactive: Option<bool>,
	/// Allow generating into an existing, non-empty project directory.
	pub overwrite: bool,
}

/// A validated project configuration. Only obtainable through
/// [`resolve_config`], so every instance upholds the naming invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
	name: String,
	package_name: String,
	destination_path: PathBuf,
	python_version: String,
	description: String,
	author: Option<String>,
	email: Option<String>,
	template: TemplateKind,
	interactive: bool,
	overwrite: bool,
}

impl ProjectConfig {
	/// The project name, used as the directory name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The import-style identifier derived from the name.
	pub fn package_name(&self) -> &str {
		&self.package_name
	}

	/// PascalCase form of the package name.
	pub fn class_name(&self) -> String {
		self.package_name
			.split('_')
			.filter(|word| !word.is_empty())
			.map(|word| {
				let mut chars = word.chars();
				chars.next().map_or_else(String::new, |first| {
					first.to_ascii_uppercase().to_string() + chars.as_str()
				})
			})
			.collect()
	}

	/// The destination root under which the project directory is created.
	pub fn destination_path(&self) -> &Path {
		&self.destination_path
	}

	/// `destination_path/name`.
	pub fn project_path(&self) -> PathBuf {
		self.destination_path.join(&self.name)
	}

	pub fn python_version(&self) -> &str {
		&self.python_version
	}

	/// Tool target tag for the python version, e.g. `py312` for `3.12`.
	pub fn python_tag(&self) -> String {
		format!("py{}", self.python_version.replace('.', ""))
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn author(&self) -> Option<&str> {
		self.author.as_deref()
	}

	pub fn email(&self) -> Option<&str> {
		self.email.as_deref()
	}

	pub fn template(&self) -> TemplateKind {
		self.template
	}

	pub fn interactive(&self) -> bool {
		self.interactive
	}

	pub fn overwrite(&self) -> bool {
		self.overwrite
	}

	/// Values exposed to template payloads.
	pub fn render_context(&self) -> RenderContext<'_> {
		RenderContext {
			name: &self.name,
			package_name: &self.package_name,
			class_name: self.class_name(),
			python_version: &self.python_version,
			python_tag: self.python_tag(),
			description: &self.description,
			author: self.author().unwrap_or(DEFAULT_AUTHOR),
			email: self.email().unwrap_or(DEFAULT_EMAIL),
			template: self.template.as_str(),
		}
	}
}

/// The variables available inside template payloads.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
	pub name: &'a str,
	pub package_name: &'a str,
	pub class_name: String,
	pub python_version: &'a str,
	pub python_tag: String,
	pub description: &'a str,
	pub author: &'a str,
	pub email: &'a str,
	pub template: &'a str,
}

/// The description used when none is supplied.
pub fn default_description(name: &str) -> String {
	format!("A Python project called {name}")
}

/// Merge raw input with defaults and validate the result.
///
/// Every field resolves from the raw input first, then `defaults`, then the
/// built-in default. A missing destination resolves to the current working
/// directory.
pub fn resolve_config(
	input: RawProjectInput,
	defaults: &ProjectDefaults,
) -> PybakeResult<ProjectConfig> {
	let name = input.name.as_deref().map(str::trim).unwrap_or_default();
	let package_name = validate_name(name)?;

	let python_version = non_empty(input.python_version)
		.unwrap_or_else(|| defaults.python_version().to_string());
	validate_python_version(&python_version)?;

	let template = match non_empty(input.template) {
		Some(template) => template.parse::<TemplateKind>()?,
		None => defaults.template.unwrap_or_default(),
	};

	let description = non_empty(input.description)
		.or_else(|| non_empty(defaults.description.clone()))
		.unwrap_or_else(|| default_description(name));
	validate_text(ConfigField::Description, &description)?;

	let author = non_empty(input.author).or_else(|| non_empty(defaults.author.clone()));
	if let Some(author) = &author {
		validate_text(ConfigField::Author, author)?;
	}

	let email = non_empty(input.email).or_else(|| non_empty(defaults.email.clone()));
	if let Some(email) = &email {
		validate_email(email)?;
	}

	let destination_path = match input.destination_path {
		Some(path) if path.as_os_str().is_empty() => {
			return Err(PybakeError::invalid(
				ConfigField::DestinationPath,
				"must not be empty",
			));
		}
		Some(path) => path,
		None => std::env::current_dir()?,
	};
	validate_destination(&destination_path.join(name), input.overwrite)?;

	let config = ProjectConfig {
		name: name.to_string(),
		package_name,
		destination_path,
		python_version,
		description,
		author,
		email,
		template,
		interactive: input.interactive.unwrap_or(true),
		overwrite: input.overwrite,
	};

	tracing::debug!(
		name = %config.name,
		package = %config.package_name,
		template = %config.template,
		"resolved project config"
	);

	Ok(config)
}

fn non_empty(value: Option<String>) -> Option<String> {
	value
		.map(|value| value.trim().to_string())
		.filter(|value| !value.is_empty())
}

/// Derive an import-style identifier from a project name: ASCII
/// alphanumerics are lowercased and every run of other characters becomes a
/// single underscore. Leading and trailing separators are dropped.
pub fn derive_identifier(name: &str) -> String {
	let mut identifier = String::with_capacity(name.len());
	let mut pending_separator = false;

	for ch in name.chars() {
		if ch.is_ascii_alphanumeric() {
			if pending_separator && !identifier.is_empty() {
				identifier.push('_');
			}
			pending_separator = false;
			identifier.push(ch.to_ascii_lowercase());
		} else {
			pending_separator = true;
		}
	}

	identifier
}

/// Returns true when `value` is a lowercase underscore identifier usable as a
/// python module name.
pub fn is_valid_identifier(value: &str) -> bool {
	let mut chars = value.chars();
	let Some(first) = chars.next() else {
		return false;
	};

	(first.is_ascii_lowercase() || first == '_')
		&& chars.all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
		&& !PYTHON_KEYWORDS.contains(&value)
}

/// Validate a project name and return its derived identifier.
pub fn validate_name(name: &str) -> PybakeResult<String> {
	let invalid = |reason: String| PybakeError::invalid(ConfigField::Name, reason);

	if name.is_empty() {
		return Err(invalid("must not be empty".into()));
	}

	if name == "." || name == ".." {
		return Err(invalid(format!("`{name}` is not a valid directory name")));
	}

	if let Some(ch) = name
		.chars()
		.find(|ch| ch.is_control() || RESERVED_NAME_CHARS.contains(ch))
	{
		return Err(invalid(format!("contains the unsupported character {ch:?}")));
	}

	let identifier = derive_identifier(name);
	if identifier.is_empty() {
		return Err(invalid(format!(
			"`{name}` contains no letters or digits to build a package name from"
		)));
	}

	if identifier.starts_with(|ch: char| ch.is_ascii_digit()) {
		return Err(invalid(format!(
			"package name `{identifier}` must not start with a digit"
		)));
	}

	if !is_valid_identifier(&identifier) {
		return Err(invalid(format!(
			"package name `{identifier}` is a reserved python keyword"
		)));
	}

	Ok(identifier)
}

/// Validate a `major.minor` python version such as `3.12`.
pub fn validate_python_version(version: &str) -> PybakeResult<()> {
	let is_number = |part: &str| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit());
	let valid = version
		.split_once('.')
		.is_some_and(|(major, minor)| is_number(major) && is_number(minor));

	if valid {
		Ok(())
	} else {
		Err(PybakeError::invalid(
			ConfigField::PythonVersion,
			format!("`{version}` does not match the `major.minor` pattern (e.g. `3.12`)"),
		))
	}
}

fn validate_email(email: &str) -> PybakeResult<()> {
	let valid = !email.contains(|ch: char| ch.is_whitespace() || ch.is_control())
		&& email
			.split_once('@')
			.is_some_and(|(local, domain)| {
				!local.is_empty() && !domain.is_empty() && !domain.contains('@')
			});

	if valid {
		Ok(())
	} else {
		Err(PybakeError::invalid(
			ConfigField::Email,
			format!("`{email}` is not an email address"),
		))
	}
}

/// Free text is rendered into TOML and python string literals, which cannot
/// hold line breaks or raw control characters. Tabs are escaped when quoted.
fn validate_text(field: ConfigField, value: &str) -> PybakeResult<()> {
	if value.contains(['\r', '\n']) {
		return Err(PybakeError::invalid(field, "must be a single line"));
	}

	if let Some(ch) = value.chars().find(|ch| ch.is_control() && *ch != '\t') {
		return Err(PybakeError::invalid(
			field,
			format!("contains the unsupported character {ch:?}"),
		));
	}

	Ok(())
}

fn validate_destination(project_path: &Path, overwrite: bool) -> PybakeResult<()> {
	let display = project_path.display();

	if project_path.is_file() {
		return Err(PybakeError::invalid(
			ConfigField::DestinationPath,
			format!("`{display}` already exists and is a file"),
		));
	}

	if !overwrite && project_path.exists() {
		return Err(PybakeError::invalid(
			ConfigField::DestinationPath,
			format!("`{display}` already exists"),
		));
	}

	Ok(())
}
