//! `pybake_core` is the core library for [pybake](https://github.com/pybake/pybake), a generator for new Python projects. It resolves user input into a validated [`ProjectConfig`] and materializes a static template manifest into a fresh project directory.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Raw input (CLI flags, prompts) + pybake.toml defaults
//!   → Configuration resolver (merges, validates, derives the package name)
//!   → Template manifest (ordered relative paths + content producers)
//!   → Planner (renders every entry through minijinja, rejects duplicate paths)
//!   → Materializer (checks the destination, writes files in manifest order)
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Defaults loaded from `pybake.toml`.
//! - [`project`] — Raw input, the validated [`ProjectConfig`], and the resolver.
//! - [`manifest`] — The static manifests and template payload rendering.
//! - [`catalog`] — The selectable templates listed by `pybake list-templates`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pybake_core::ProjectDefaults;
//! use pybake_core::RawProjectInput;
//! use pybake_core::create_project;
//! use pybake_core::resolve_config;
//!
//! let input = RawProjectInput {
//! 	name: Some("My Project".into()),
//! 	destination_path: Some("/tmp".into()),
//! 	..Default::default()
//! };
//! let config = resolve_config(input, &ProjectDefaults::default()).unwrap();
//! assert_eq!(config.package_name(), "my_project");
//!
//! let report = create_project(&config).unwrap();
//! println!("created {} files in {}", report.written.len(), report.root.display());
//! ```

pub use catalog::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use manifest::ContentProducer;
pub use manifest::ManifestEntry;
pub use project::*;

pub mod catalog;
pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod manifest;
pub mod project;
