use std::io::IsTerminal;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use pybake_cli::Commands;
use pybake_cli::CreateArgs;
use pybake_cli::OutputFormat;
use pybake_cli::PybakeCli;
use pybake_cli::prompt::DialoguerPrompter;
use pybake_cli::prompt::confirm_creation;
use pybake_cli::prompt::gather;
use pybake_core::DEFAULT_AUTHOR;
use pybake_core::DEFAULT_EMAIL;
use pybake_core::MaterializeReport;
use pybake_core::ProjectConfig;
use pybake_core::ProjectDefaults;
use pybake_core::RawProjectInput;
use pybake_core::TemplateKind;
use pybake_core::create_project;
use pybake_core::plan;
use pybake_core::resolve_config;
use pybake_core::template_summaries;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,cyan) => {
		if color_enabled() {
			format!("{}", $text.cyan())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = PybakeCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Create(create)) => run_create(create),
		Some(Commands::ListTemplates { format }) => run_list_templates(*format),
		Some(Commands::Info) => run_info(),
		None => {
			eprintln!("No subcommand specified. Run `pybake --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<pybake_core::PybakeError>() {
			Ok(pybake_err) => {
				let report: miette::Report = (*pybake_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr, filtered by `RUST_LOG` when set.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.without_time()
		.init();
}

fn current_dir() -> PathBuf {
	std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn print_section(title: &str) {
	println!();
	println!("{}", colored!(title, bold));
}

fn print_field(label: &str, value: impl std::fmt::Display) {
	println!("{label:<28} {value}");
}

fn run_create(args: &CreateArgs) -> Result<(), Box<dyn std::error::Error>> {
	let defaults = ProjectDefaults::load(&current_dir())?.unwrap_or_default();

	let mut input = RawProjectInput {
		name: Some(args.project_name.clone()),
		destination_path: args.path.clone(),
		python_version: args.python_version.clone(),
		description: args.description.clone(),
		author: args.author.clone(),
		email: args.email.clone(),
		template: args.template.clone(),
		interactive: Some(!args.no_interactive),
		overwrite: args.overwrite,
	};

	// Prompts need a terminal; piped input behaves like `--no-interactive`.
	let prompting = !args.no_interactive && std::io::stdin().is_terminal();
	if !args.no_interactive && !prompting {
		tracing::debug!("stdin is not a terminal, skipping prompts");
	}

	let mut prompter = DialoguerPrompter::new(color_enabled());
	if prompting {
		let destination = args.path.clone().unwrap_or_else(current_dir);
		if !gather(&mut input, &defaults, &destination, &mut prompter)? {
			cancel();
		}
	}

	let config = resolve_config(input, &defaults)?;
	print_summary(&config);

	if args.dry_run {
		let files = plan(&config, config.template().manifest())?;
		println!();
		println!(
			"Dry run: would create {} file(s) in {}",
			files.len(),
			config.project_path().display()
		);
		for file in files {
			println!("  {}", file.relative_path.display());
		}
		return Ok(());
	}

	if prompting {
		println!();
		if !confirm_creation(&mut prompter)? {
			cancel();
		}
	}

	let report = create_project(&config)?;
	print_success(&report, &config);

	Ok(())
}

fn cancel() -> ! {
	eprintln!("{}", colored!("Operation cancelled.", yellow));
	process::exit(1);
}

fn print_summary(config: &ProjectConfig) {
	print_section("Project Summary");
	print_field("Name", colored!(config.name(), cyan));
	print_field("Package", config.package_name());
	print_field("Path", config.project_path().display());
	print_field("Python", config.python_version());
	print_field("Description", config.description());
	print_field("Author", config.author().unwrap_or(DEFAULT_AUTHOR));
	print_field("Email", config.email().unwrap_or(DEFAULT_EMAIL));
	print_field("Template", config.template());

	print_section("Tools");
	for feature in config.template().features() {
		println!("  • {feature}");
	}
}

fn print_success(report: &MaterializeReport, config: &ProjectConfig) {
	println!();
	println!(
		"{} Created {} file(s) in {}",
		colored!("✓", green),
		report.written.len(),
		report.root.display()
	);
	if report.merged_into_existing {
		println!("  (existing files in the directory were left untouched)");
	}

	println!();
	println!("Next steps:");
	println!("  1. cd {}", shell_path(&report.root));
	println!("  2. git init");
	println!("  3. uv sync");
	println!("  4. uv run pytest");
	println!("  5. Start coding in src/{}/", config.package_name());
}

/// Quote a path for display in a shell command when it contains spaces.
fn shell_path(path: &Path) -> String {
	let display = path.display().to_string();
	if display.contains(char::is_whitespace) {
		format!("\"{display}\"")
	} else {
		display
	}
}

fn run_list_templates(format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let summaries = template_summaries();

	match format {
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&summaries)?);
		}
		OutputFormat::Text => {
			println!("{}", colored!("Available project templates:", bold));
			for summary in &summaries {
				println!();
				println!(
					"  {:<12} {} - {}",
					colored!(summary.name, cyan),
					summary.title,
					summary.description
				);
				for feature in summary.features {
					println!("    • {feature}");
				}
			}
		}
	}

	Ok(())
}

fn run_info() -> Result<(), Box<dyn std::error::Error>> {
	let root = current_dir();
	let defaults_path = ProjectDefaults::resolve_path(&root);
	let defaults = ProjectDefaults::load(&root)?.unwrap_or_default();

	println!("{}", colored!("PyBake CLI", bold));
	print_field("Version", env!("CARGO_PKG_VERSION"));

	print_section("Defaults");
	print_field(
		"Defaults file",
		defaults_path
			.as_ref()
			.map_or_else(|| "none".to_string(), |path| path.display().to_string()),
	);
	print_field("Python", defaults.python_version());
	print_field(
		"Template",
		defaults.template.unwrap_or(TemplateKind::Standard),
	);

	print_section("Generated projects include");
	for feature in TemplateKind::Standard.features() {
		println!("  • {feature}");
	}

	println!();
	println!("Use `pybake create <name>` to start a new project.");

	Ok(())
}
