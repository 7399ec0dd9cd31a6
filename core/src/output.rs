//! All-or-nothing writing of the run's output files.
//!
//! Every artifact is first written to a `.tmp` sibling. Only when all of them
//! have been flushed are they renamed into place.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::OutputError;

/// A named output file and its complete contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

fn stage(artifact: &Artifact, staged: &Path) -> Result<(), OutputError> {
    let write_error = |source| OutputError::Write {
        path: artifact.path.clone(),
        source,
    };

    let file = File::create(staged).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(artifact.contents.as_bytes())
        .map_err(write_error)?;
    writer.flush().map_err(write_error)?;
    Ok(())
}

/// Contents a target held before this run replaced it.
fn snapshot(path: &Path) -> Result<Option<Vec<u8>>, OutputError> {
    if !path.is_file() {
        return Ok(None);
    }
    fs::read(path)
        .map(Some)
        .map_err(|source| OutputError::Commit {
            path: path.to_path_buf(),
            source,
        })
}

/// Put committed targets back the way they were, newest first.
fn roll_back(committed: &[(&Artifact, Option<Vec<u8>>)]) {
    for (artifact, previous) in committed.iter().rev() {
        let restored = match previous {
            Some(bytes) => fs::write(&artifact.path, bytes),
            None => fs::remove_file(&artifact.path),
        };
        if let Err(e) = restored {
            tracing::warn!(
                path = %artifact.path.display(),
                error = %e,
                "Failed to roll back artifact"
            );
        }
    }
}

fn remove_staged(paths: &[PathBuf]) {
    for path in paths {
        let _ = fs::remove_file(path);
    }
}

/// Write all artifacts, or none of them.
///
/// A failed rename rolls back the targets already committed in this call and
/// removes every staged file that is still pending.
pub fn commit_artifacts(artifacts: &[Artifact]) -> Result<(), OutputError> {
    let mut staged = Vec::with_capacity(artifacts.len());

    for artifact in artifacts {
        let tmp = staging_path(&artifact.path);
        let result = stage(artifact, &tmp);
        staged.push(tmp);
        if let Err(e) = result {
            remove_staged(&staged);
            return Err(e);
        }
    }

    let mut committed = Vec::with_capacity(artifacts.len());
    for (i, (artifact, tmp)) in artifacts.iter().zip(&staged).enumerate() {
        let renamed = snapshot(&artifact.path).and_then(|previous| {
            fs::rename(tmp, &artifact.path)
                .map(|()| previous)
                .map_err(|source| OutputError::Commit {
                    path: artifact.path.clone(),
                    source,
                })
        });

        match renamed {
            Ok(previous) => committed.push((artifact, previous)),
            Err(e) => {
                roll_back(&committed);
                remove_staged(&staged[i..]);
                return Err(e);
            }
        }
    }

    for (artifact, _) in &committed {
        tracing::info!(
            path = %artifact.path.display(),
            bytes = artifact.contents.len(),
            "Wrote artifact"
        );
    }

    Ok(())
}
