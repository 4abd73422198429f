mod common;

use predicates::prelude::*;
use pybake_core::AnyEmptyResult;
use rstest::rstest;

#[test]
fn can_create_project() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::pybake_cmd()
		.current_dir(tmp.path())
		.args(["create", "demo", "--no-interactive", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Project Summary"))
		.stdout(predicate::str::contains("Created 10 file(s)"))
		.stdout(predicate::str::contains("Next steps"));

	let root = tmp.path().join("demo");
	for file in [
		"src/demo/__init__.py",
		"src/demo/main.py",
		"pyproject.toml",
		".gitignore",
		"README.md",
		".github/workflows/ci.yml",
		"tests/test_demo.py",
	] {
		let contents = std::fs::read_to_string(root.join(file))?;
		assert!(!contents.is_empty(), "{file} should not be empty");
	}

	Ok(())
}

#[test]
fn create_uses_flag_values() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::pybake_cmd()
		.current_dir(tmp.path())
		.args([
			"create",
			"My Project",
			"--no-interactive",
			"--python",
			"3.11",
			"--description",
			"Crunches numbers",
			"--author",
			"Ada Lovelace",
			"--email",
			"ada@example.com",
		])
		.assert()
		.success();

	let root = tmp.path().join("My Project");
	let pyproject = std::fs::read_to_string(root.join("pyproject.toml"))?;
	assert!(pyproject.contains("name = \"My Project\""));
	assert!(pyproject.contains("description = \"Crunches numbers\""));
	assert!(pyproject.contains("requires-python = \">=3.11\""));
	assert!(pyproject.contains("email = \"ada@example.com\""));
	assert!(root.join("src/my_project/main.py").is_file());
	assert!(root.join("tests/test_my_project.py").is_file());

	Ok(())
}

#[rstest]
#[case::python_version(&["--python", "latest"], "pythonVersion")]
#[case::email(&["--email", "not-an-email"], "email")]
#[case::template(&["--template", "web"], "template")]
fn create_rejects_invalid_fields(#[case] extra: &[&str], #[case] field: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::pybake_cmd()
		.current_dir(tmp.path())
		.args(["create", "demo", "--no-interactive"])
		.args(extra)
		.assert()
		.code(2)
		.stderr(predicate::str::contains(format!("`{field}`")));

	assert!(!tmp.path().join("demo").exists());

	Ok(())
}

#[rstest]
#[case::leading_digit("123")]
#[case::keyword("import")]
#[case::no_letters("--")]
fn create_rejects_invalid_name(#[case] name: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::pybake_cmd()
		.current_dir(tmp.path())
		.args(["create", "--no-interactive", "--", name])
		.assert()
		.code(2)
		.stderr(predicate::str::contains("`name`"));

	Ok(())
}

#[test]
fn create_refuses_existing_project() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let root = tmp.path().join("demo");
	std::fs::create_dir_all(&root)?;
	std::fs::write(root.join("README.md"), "existing readme")?;

	common::pybake_cmd()
		.current_dir(tmp.path())
		.args(["create", "demo", "--no-interactive"])
		.assert()
		.code(2)
		.stderr(predicate::str::contains("destinationPath"));

	assert_eq!(std::fs::read_to_string(root.join("README.md"))?, "existing readme");
	assert_eq!(std::fs::read_dir(&root)?.count(), 1);

	Ok(())
}

#[test]
fn overwrite_never_replaces_existing_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let root = tmp.path().join("demo");
	std::fs::create_dir_all(&root)?;
	std::fs::write(root.join("README.md"), "existing readme")?;

	common::pybake_cmd()
		.current_dir(tmp.path())
		.args(["create", "demo", "--no-interactive", "--overwrite"])
		.assert()
		.code(2)
		.stderr(predicate::str::contains("path conflict"))
		.stderr(predicate::str::contains("README.md"));

	assert_eq!(std::fs::read_to_string(root.join("README.md"))?, "existing readme");

	Ok(())
}

#[test]
fn overwrite_adds_files_next_to_unrelated_content() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let root = tmp.path().join("demo");
	std::fs::create_dir_all(&root)?;
	std::fs::write(root.join("notes.txt"), "keep me")?;

	common::pybake_cmd()
		.current_dir(tmp.path())
		.args(["create", "demo", "--no-interactive", "--overwrite"])
		.assert()
		.success()
		.stdout(predicate::str::contains("left untouched"));

	assert_eq!(std::fs::read_to_string(root.join("notes.txt"))?, "keep me");
	assert!(root.join("pyproject.toml").is_file());

	Ok(())
}

#[test]
fn dry_run_writes_nothing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::pybake_cmd()
		.current_dir(tmp.path())
		.args(["create", "demo", "--no-interactive", "--dry-run"])
		.assert()
		.success()
		.stdout(predicate::str::contains("Dry run: would create 10 file(s)"))
		.stdout(predicate::str::contains("src/demo/__init__.py"));

	assert!(!tmp.path().join("demo").exists());

	Ok(())
}

#[test]
fn minimal_template_from_flag() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::pybake_cmd()
		.current_dir(tmp.path())
		.args(["create", "demo", "--no-interactive", "--template", "minimal"])
		.assert()
		.success()
		.stdout(predicate::str::contains("Created 8 file(s)"));

	assert!(!tmp.path().join("demo/.github").exists());

	Ok(())
}

#[test]
fn create_requires_a_name() {
	common::pybake_cmd()
		.arg("create")
		.assert()
		.failure()
		.stderr(predicate::str::contains("PROJECT_NAME"));
}

#[test]
fn verbose_logs_written_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::pybake_cmd()
		.current_dir(tmp.path())
		.args(["--verbose", "create", "demo", "--no-interactive"])
		.assert()
		.success()
		.stderr(predicate::str::contains("wrote file"));

	Ok(())
}

#[test]
fn missing_subcommand_exits_with_usage_hint() {
	common::pybake_cmd()
		.assert()
		.code(1)
		.stderr(predicate::str::contains("pybake --help"));
}
