use std::collections::HashSet;
use std::fs::Metadata;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::ManifestEntry;
use crate::ProjectConfig;
use crate::PybakeError;
use crate::PybakeResult;

/// A manifest entry rendered for a specific project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
	/// Name of the manifest entry that produced this file.
	pub template: &'static str,
	/// Path relative to the project directory.
	pub relative_path: PathBuf,
	pub contents: String,
}

/// Result of materializing a project tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
	/// The project directory, `destination_path/name`.
	pub root: PathBuf,
	/// Files written, relative to `root`, in manifest order.
	pub written: Vec<PathBuf>,
	/// True when the project directory already existed with content.
	pub merged_into_existing: bool,
}

/// Render every manifest entry without touching the filesystem.
///
/// Fails on the first render error, or when two entries resolve to the same
/// relative path.
pub fn plan(config: &ProjectConfig, manifest: &[ManifestEntry]) -> PybakeResult<Vec<RenderedFile>> {
	let mut seen = HashSet::with_capacity(manifest.len());
	let mut files = Vec::with_capacity(manifest.len());

	for entry in manifest {
		let relative_path = entry.relative_path(config)?;
		if !seen.insert(relative_path.clone()) {
			return Err(PybakeError::DuplicateManifestPath(
				relative_path.display().to_string(),
			));
		}

		let contents = entry.contents(config)?;
		tracing::debug!(
			template = entry.name,
			path = %relative_path.display(),
			bytes = contents.len(),
			"rendered file"
		);

		files.push(RenderedFile {
			template: entry.name,
			relative_path,
			contents,
		});
	}

	Ok(files)
}

/// Create `destination_path/name` and write every manifest entry into it.
///
/// All entries are rendered and the destination is checked before the first
/// write. Writes happen in manifest order. An I/O failure partway through is
/// reported with the failing path and the files already written are left in
/// place.
pub fn materialize(
	config: &ProjectConfig,
	manifest: &[ManifestEntry],
) -> PybakeResult<MaterializeReport> {
	let files = plan(config, manifest)?;
	let root = config.project_path();
	let merged_into_existing = check_destination(&root, &files, config.overwrite())?;

	if merged_into_existing {
		tracing::warn!(
			path = %root.display(),
			"writing into an existing non-empty directory"
		);
	}

	create_dir(&root)?;

	let mut written = Vec::with_capacity(files.len());
	for file in files {
		let path = root.join(&file.relative_path);
		if let Some(parent) = path.parent() {
			create_dir(parent)?;
		}

		std::fs::write(&path, &file.contents).map_err(|source| {
			PybakeError::FileSystem {
				path: path.display().to_string(),
				source,
			}
		})?;
		tracing::debug!(path = %path.display(), "wrote file");
		written.push(file.relative_path);
	}

	tracing::info!(
		path = %root.display(),
		files = written.len(),
		"project created"
	);

	Ok(MaterializeReport {
		root,
		written,
		merged_into_existing,
	})
}

/// Materialize the manifest of the config's selected template.
pub fn create_project(config: &ProjectConfig) -> PybakeResult<MaterializeReport> {
	materialize(config, config.template().manifest())
}

/// Ensure writing `files` into `root` cannot clobber anything. Returns true
/// when `root` is an existing, non-empty directory that overwrite allows
/// writing into.
fn check_destination(root: &Path, files: &[RenderedFile], overwrite: bool) -> PybakeResult<bool> {
	let conflict = |path: &Path, reason: &str| {
		PybakeError::PathConflict {
			path: path.display().to_string(),
			reason: reason.to_string(),
		}
	};

	let Some(metadata) = existing(root, std::fs::metadata(root))? else {
		return Ok(false);
	};

	if !metadata.is_dir() {
		return Err(conflict(root, "already exists and is not a directory"));
	}

	if is_empty_dir(root)? {
		return Ok(false);
	}

	if !overwrite {
		return Err(conflict(root, "directory already exists and is not empty"));
	}

	// Overwrite only permits adding files next to unrelated content. Every
	// parent directory a file needs must be a directory or absent.
	for file in files {
		let mut path = root.to_path_buf();
		let mut components = file.relative_path.components().peekable();

		while let Some(component) = components.next() {
			path.push(component);

			if components.peek().is_none() {
				if existing(&path, std::fs::symlink_metadata(&path))?.is_some() {
					return Err(conflict(&path, "file already exists"));
				}
				break;
			}

			match existing(&path, std::fs::metadata(&path))? {
				Some(metadata) if metadata.is_dir() => {}
				Some(_) => return Err(conflict(&path, "already exists and is not a directory")),
				None => break,
			}
		}
	}

	Ok(true)
}

/// Metadata for `path`, or `None` when nothing exists there.
fn existing(path: &Path, metadata: io::Result<Metadata>) -> PybakeResult<Option<Metadata>> {
	match metadata {
		Ok(metadata) => Ok(Some(metadata)),
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
		Err(source) => {
			Err(PybakeError::FileSystem {
				path: path.display().to_string(),
				source,
			})
		}
	}
}

fn is_empty_dir(path: &Path) -> PybakeResult<bool> {
	let mut entries = std::fs::read_dir(path).map_err(|source| {
		PybakeError::FileSystem {
			path: path.display().to_string(),
			source,
		}
	})?;
	Ok(entries.next().is_none())
}

fn create_dir(path: &Path) -> PybakeResult<()> {
	std::fs::create_dir_all(path).map_err(|source| {
		PybakeError::FileSystem {
			path: path.display().to_string(),
			source,
		}
	})
}
