mod common;

use predicates::prelude::*;
use pybake_core::AnyEmptyResult;

#[test]
fn create_applies_pybake_toml_defaults() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("pybake.toml"),
		"[defaults]\npython_version = \"3.10\"\nauthor = \"Team Defaults\"\ntemplate = \
		 \"minimal\"\n",
	)?;

	common::pybake_cmd()
		.current_dir(tmp.path())
		.args(["create", "demo", "--no-interactive"])
		.assert()
		.success()
		.stdout(predicate::str::contains("Team Defaults"));

	let pyproject = std::fs::read_to_string(tmp.path().join("demo/pyproject.toml"))?;
	assert!(pyproject.contains("requires-python = \">=3.10\""));
	assert!(pyproject.contains("name = \"Team Defaults\""));
	assert!(!tmp.path().join("demo/.pre-commit-config.yaml").exists());

	Ok(())
}

#[test]
fn flags_override_pybake_toml_defaults() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join(".pybake.toml"),
		"[defaults]\npython_version = \"3.10\"\n",
	)?;

	common::pybake_cmd()
		.current_dir(tmp.path())
		.args(["create", "demo", "--no-interactive", "--python", "3.13"])
		.assert()
		.success();

	let version = std::fs::read_to_string(tmp.path().join("demo/.python-version"))?;
	assert_eq!(version, "3.13\n");

	Ok(())
}

#[test]
fn info_resolves_dot_config_pybake_toml() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(
		tmp.path().join(".config/pybake.toml"),
		"[defaults]\npython_version = \"3.9\"\n",
	)?;

	let expected_path = tmp.path().join(".config/pybake.toml").display().to_string();

	common::pybake_cmd()
		.current_dir(tmp.path())
		.arg("info")
		.assert()
		.success()
		.stdout(predicate::str::contains("Defaults file"))
		.stdout(predicate::str::contains(expected_path))
		.stdout(predicate::str::contains("3.9"));

	Ok(())
}

#[test]
fn malformed_defaults_file_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("pybake.toml"), "[defaults\n")?;

	common::pybake_cmd()
		.current_dir(tmp.path())
		.args(["create", "demo", "--no-interactive"])
		.assert()
		.code(2)
		.stderr(predicate::str::contains("failed to parse defaults file"));

	assert!(!tmp.path().join("demo").exists());

	Ok(())
}
