use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

pub mod prompt;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Create new Python projects with modern tooling setup.",
	long_about = "pybake generates a ready-to-use Python project directory from fixed \
	              templates: packaging metadata, source layout, tests, git hooks and a CI \
	              workflow.\n\nQuick start:\n  pybake create my-project   Create a new \
	              project\n  pybake list-templates      Show the available templates\n  \
	              pybake info                Show tool information"
)]
pub struct PybakeCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Enable verbose output, including debug logs on stderr.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a new Python project with modern tooling setup.
	///
	/// Generates `<path>/<project_name>/` with `pyproject.toml`, a `src/`
	/// package, tests, git hooks and a CI workflow. Missing values fall back
	/// to `pybake.toml` defaults in the current directory, then to built-in
	/// defaults. Refuses to write into an existing non-empty directory unless
	/// `--overwrite` is passed, and even then never replaces existing files.
	Create(CreateArgs),
	/// List available project templates.
	ListTemplates {
		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Show information about the CLI tool.
	Info,
}

#[derive(Debug, Clone, clap::Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct CreateArgs {
	/// Name of the project to create.
	pub project_name: String,

	/// Path where to create the project. Defaults to the current directory.
	#[arg(long, short)]
	pub path: Option<PathBuf>,

	/// Python version requirement in `major.minor` form.
	#[arg(long = "python")]
	pub python_version: Option<String>,

	/// Project description.
	#[arg(long, short)]
	pub description: Option<String>,

	/// Project author.
	#[arg(long, short)]
	pub author: Option<String>,

	/// Author email.
	#[arg(long, short)]
	pub email: Option<String>,

	/// Project template to use. See `pybake list-templates`.
	#[arg(long, short)]
	pub template: Option<String>,

	/// Write into an existing, non-empty project directory. Existing files
	/// are never replaced.
	#[arg(long, default_value_t = false)]
	pub overwrite: bool,

	/// Print the files that would be created without writing anything.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,

	/// Disable interactive prompts for missing values.
	#[arg(long, default_value_t = false)]
	pub no_interactive: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
