//! The static template manifest: every file a generated project contains,
//! in write order, paired with the function that produces its contents.

use std::fmt;
use std::path::Component;
use std::path::PathBuf;

use minijinja::Environment;
use minijinja::UndefinedBehavior;

use crate::ProjectConfig;
use crate::PybakeError;
use crate::PybakeResult;

/// Produces the contents of one generated file from the project config.
pub type ContentProducer = fn(&ProjectConfig) -> PybakeResult<String>;

/// One file of a generated project.
#[derive(Clone, Copy)]
pub struct ManifestEntry {
	/// Stable template name, used in diagnostics and logs.
	pub name: &'static str,
	/// Relative output path. May reference template variables such as
	/// `{{ package_name }}`.
	pub path: &'static str,
	pub produce: ContentProducer,
}

impl fmt::Debug for ManifestEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ManifestEntry")
			.field("name", &self.name)
			.field("path", &self.path)
			.finish_non_exhaustive()
	}
}

impl ManifestEntry {
	/// Render the relative output path for `config`. The result must be a
	/// plain relative path that stays inside the project directory.
	pub fn relative_path(&self, config: &ProjectConfig) -> PybakeResult<PathBuf> {
		let rendered = render_payload(self.name, self.path, config)?;
		let path = PathBuf::from(rendered.trim());

		let is_contained = !path.as_os_str().is_empty()
			&& path
				.components()
				.all(|component| matches!(component, Component::Normal(_)));
		if !is_contained {
			return Err(PybakeError::TemplateRender {
				template: self.name.to_string(),
				reason: format!(
					"output path `{}` must be relative and stay inside the project",
					path.display()
				),
			});
		}

		Ok(path)
	}

	/// Render the file contents for `config`.
	pub fn contents(&self, config: &ProjectConfig) -> PybakeResult<String> {
		(self.produce)(config)
	}
}

/// Render a template payload through minijinja with the config's variables.
///
/// Undefined variables are errors so a typo in a payload never silently
/// produces an empty value.
pub fn render_payload(name: &str, source: &str, config: &ProjectConfig) -> PybakeResult<String> {
	let render_error = |e: minijinja::Error| {
		PybakeError::TemplateRender {
			template: name.to_string(),
			reason: e.to_string(),
		}
	};

	let mut env = Environment::new();
	env.set_keep_trailing_newline(true);
	env.set_undefined_behavior(UndefinedBehavior::Strict);
	env.add_filter("quoted", quoted);
	env.add_template(name, source).map_err(render_error)?;

	let template = env.get_template(name).map_err(render_error)?;
	template
		.render(config.render_context())
		.map_err(render_error)
}

/// Wrap a value in double quotes, escaping it for TOML basic strings and
/// python string literals.
fn quoted(value: &str) -> String {
	let mut output = String::with_capacity(value.len() + 2);
	output.push('"');
	for ch in value.chars() {
		match ch {
			'"' => output.push_str("\\\""),
			'\\' => output.push_str("\\\\"),
			'\t' => output.push_str("\\t"),
			_ => output.push(ch),
		}
	}
	output.push('"');
	output
}

macro_rules! payload {
	($producer:ident, $name:literal, $file:literal) => {
		fn $producer(config: &ProjectConfig) -> PybakeResult<String> {
			render_payload($name, include_str!(concat!("../templates/", $file)), config)
		}
	};
}

payload!(pyproject, "pyproject", "pyproject.toml.jinja");
payload!(python_version, "python-version", "python-version.jinja");
payload!(gitignore, "gitignore", "gitignore.jinja");
payload!(readme, "readme", "README.md.jinja");
payload!(pre_commit, "pre-commit", "pre-commit-config.yaml.jinja");
payload!(ci_workflow, "ci-workflow", "ci.yml.jinja");
payload!(package_init, "package-init", "package_init.py.jinja");
payload!(package_main, "package-main", "main.py.jinja");
payload!(tests_init, "tests-init", "tests_init.py.jinja");
payload!(tests_module, "tests-module", "test_package.py.jinja");

const PYPROJECT: ManifestEntry = ManifestEntry {
	name: "pyproject",
	path: "pyproject.toml",
	produce: pyproject,
};
const PYTHON_VERSION: ManifestEntry = ManifestEntry {
	name: "python-version",
	path: ".python-version",
	produce: python_version,
};
const GITIGNORE: ManifestEntry = ManifestEntry {
	name: "gitignore",
	path: ".gitignore",
	produce: gitignore,
};
const README: ManifestEntry = ManifestEntry {
	name: "readme",
	path: "README.md",
	produce: readme,
};
const PRE_COMMIT: ManifestEntry = ManifestEntry {
	name: "pre-commit",
	path: ".pre-commit-config.yaml",
	produce: pre_commit,
};
const CI_WORKFLOW: ManifestEntry = ManifestEntry {
	name: "ci-workflow",
	path: ".github/workflows/ci.yml",
	produce: ci_workflow,
};
const PACKAGE_INIT: ManifestEntry = ManifestEntry {
	name: "package-init",
	path: "src/{{ package_name }}/__init__.py",
	produce: package_init,
};
const PACKAGE_MAIN: ManifestEntry = ManifestEntry {
	name: "package-main",
	path: "src/{{ package_name }}/main.py",
	produce: package_main,
};
const TESTS_INIT: ManifestEntry = ManifestEntry {
	name: "tests-init",
	path: "tests/__init__.py",
	produce: tests_init,
};
const TESTS_MODULE: ManifestEntry = ManifestEntry {
	name: "tests-module",
	path: "tests/test_{{ package_name }}.py",
	produce: tests_module,
};

/// Every file of the `standard` template, in write order.
pub static STANDARD_MANIFEST: [ManifestEntry; 10] = [
	PYPROJECT,
	PYTHON_VERSION,
	GITIGNORE,
	README,
	PRE_COMMIT,
	CI_WORKFLOW,
	PACKAGE_INIT,
	PACKAGE_MAIN,
	TESTS_INIT,
	TESTS_MODULE,
];

/// The `minimal` template: no git hooks and no CI workflow.
pub static MINIMAL_MANIFEST: [ManifestEntry; 8] = [
	PYPROJECT,
	PYTHON_VERSION,
	GITIGNORE,
	README,
	PACKAGE_INIT,
	PACKAGE_MAIN,
	TESTS_INIT,
	TESTS_MODULE,
];
