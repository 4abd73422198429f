//! Interactive prompts for project metadata the user did not pass as flags.

use std::io;
use std::path::Path;

use dialoguer::Confirm;
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use dialoguer::theme::SimpleTheme;
use dialoguer::theme::Theme;
use pybake_core::DEFAULT_AUTHOR;
use pybake_core::DEFAULT_EMAIL;
use pybake_core::ProjectDefaults;
use pybake_core::RawProjectInput;
use pybake_core::default_description;
use pybake_core::validate_name;

/// Source of answers for interactive questions.
pub trait Prompter {
	/// Ask `label`, returning the answer or `default` when the answer is
	/// blank.
	fn ask(&mut self, label: &str, default: &str) -> io::Result<String>;

	/// Ask a yes/no `question`.
	fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool>;
}

/// Terminal prompts rendered on stderr.
pub struct DialoguerPrompter {
	theme: Box<dyn Theme>,
}

impl DialoguerPrompter {
	pub fn new(use_color: bool) -> Self {
		let theme: Box<dyn Theme> = if use_color {
			Box::new(ColorfulTheme::default())
		} else {
			Box::new(SimpleTheme)
		};

		Self { theme }
	}
}

impl Prompter for DialoguerPrompter {
	fn ask(&mut self, label: &str, default: &str) -> io::Result<String> {
		let answer: String = Input::with_theme(self.theme.as_ref())
			.with_prompt(label)
			.default(default.to_string())
			.interact_text()
			.map_err(|dialoguer::Error::IO(error)| error)?;

		Ok(answer.trim().to_string())
	}

	fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool> {
		let answer = Confirm::with_theme(self.theme.as_ref())
			.with_prompt(question)
			.default(default)
			.interact()
			.map_err(|dialoguer::Error::IO(error)| error)?;

		Ok(answer)
	}
}

/// Run the interactive questions of `create` against `destination`. Returns
/// `false` when the user cancels.
///
/// The name is validated first so an invalid name fails before any question
/// is asked.
pub fn gather(
	input: &mut RawProjectInput,
	defaults: &ProjectDefaults,
	destination: &Path,
	prompter: &mut impl Prompter,
) -> Result<bool, Box<dyn std::error::Error>> {
	let name = input.name.as_deref().unwrap_or_default().trim();
	validate_name(name)?;
	let project_path = destination.join(name);

	if !confirm_existing(input, &project_path, prompter)? {
		return Ok(false);
	}

	fill_missing(input, defaults, prompter)?;

	Ok(true)
}

/// Ask for the author, email and description when neither the flags nor the
/// defaults file supply them.
pub fn fill_missing(
	input: &mut RawProjectInput,
	defaults: &ProjectDefaults,
	prompter: &mut impl Prompter,
) -> io::Result<()> {
	if is_blank(input.author.as_deref()) && is_blank(defaults.author.as_deref()) {
		input.author = Some(prompter.ask("Author name", DEFAULT_AUTHOR)?);
	}

	if is_blank(input.email.as_deref()) && is_blank(defaults.email.as_deref()) {
		input.email = Some(prompter.ask("Author email", DEFAULT_EMAIL)?);
	}

	if is_blank(input.description.as_deref()) && is_blank(defaults.description.as_deref()) {
		let name = input.name.as_deref().unwrap_or_default().trim();
		input.description = Some(prompter.ask("Project description", &default_description(name))?);
	}

	Ok(())
}

/// Offer to write into an existing project directory. Returns `false` when
/// the user declines.
pub fn confirm_existing(
	input: &mut RawProjectInput,
	project_path: &Path,
	prompter: &mut impl Prompter,
) -> io::Result<bool> {
	if input.overwrite || !project_path.is_dir() {
		return Ok(true);
	}

	let question = format!(
		"Project `{}` already exists. Add the new files next to its contents?",
		project_path.display()
	);
	let accepted = prompter.confirm(&question, false)?;
	input.overwrite = accepted;

	Ok(accepted)
}

/// Final confirmation after the project summary has been shown.
pub fn confirm_creation(prompter: &mut impl Prompter) -> io::Result<bool> {
	prompter.confirm("Proceed with project creation?", true)
}

fn is_blank(value: Option<&str>) -> bool {
	value.is_none_or(|value| value.trim().is_empty())
}
