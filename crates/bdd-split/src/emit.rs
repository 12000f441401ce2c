//! Assembled scenarios and the emitters that persist them.
//!
//! The splitter hands every surviving scenario to a [`FeatureEmitter`].
//! [`DirectoryEmitter`] writes real files below an output root that it
//! empties once when created; [`MemoryEmitter`] keeps everything in memory.
//! A file is never overwritten: [`ensure_unique_paths`] rejects colliding
//! scenarios before anything is written, and [`DirectoryEmitter`] refuses
//! to replace an existing file.

use std::collections::HashSet;
use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs::OpenOptions;
use cap_std::{ambient_authority, fs_utf8::Dir};
use tracing::{debug, info};

use crate::error::SplitError;

/// One scenario ready to be written as a standalone feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledScenario {
    /// Feature heading and description lines.
    pub narrative: Vec<String>,
    /// Background lines, empty when the feature has none.
    pub background: Vec<String>,
    /// Tag line, heading and step lines.
    pub scenario: Vec<String>,
    /// Scenario title after substitution.
    pub name: String,
    /// Directory relative to the output root.
    pub source_dir: Utf8PathBuf,
    /// Filename within `source_dir`.
    pub file_name: String,
}

impl AssembledScenario {
    /// Path of the file relative to the output root.
    #[must_use]
    pub fn relative_path(&self) -> Utf8PathBuf {
        self.source_dir.join(&self.file_name)
    }

    /// Complete feature text: narrative, background and scenario separated
    /// by blank lines, ending with a newline.
    #[must_use]
    pub fn text(&self) -> String {
        let sections: Vec<String> = [&self.narrative, &self.background, &self.scenario]
            .into_iter()
            .filter(|section| !section.is_empty())
            .map(|section| section.join("\n"))
            .collect();
        let mut text = sections.join("\n\n");
        text.push('\n');
        text
    }
}

/// Check that no two scenarios share a relative path.
///
/// # Errors
///
/// Returns [`SplitError::DuplicateOutput`] naming the first repeated path.
pub fn ensure_unique_paths<'a, I>(scenarios: I) -> Result<(), SplitError>
where
    I: IntoIterator<Item = &'a AssembledScenario>,
{
    let mut seen = HashSet::new();
    for scenario in scenarios {
        let path = scenario.relative_path();
        if !seen.insert(path.clone()) {
            return Err(SplitError::DuplicateOutput {
                path: path.into_string(),
            });
        }
    }
    Ok(())
}

/// Destination for assembled scenarios.
pub trait FeatureEmitter {
    /// Persist one scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when the scenario cannot be stored.
    fn emit(&mut self, scenario: &AssembledScenario) -> Result<(), SplitError>;
}

impl<E: FeatureEmitter + ?Sized> FeatureEmitter for &mut E {
    fn emit(&mut self, scenario: &AssembledScenario) -> Result<(), SplitError> {
        (**self).emit(scenario)
    }
}

/// Emitter collecting scenarios in memory.
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    scenarios: Vec<AssembledScenario>,
}

impl MemoryEmitter {
    /// Create an empty emitter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scenarios emitted so far, in emission order.
    #[must_use]
    pub fn scenarios(&self) -> &[AssembledScenario] {
        &self.scenarios
    }

    /// Consume the emitter, returning the collected scenarios.
    #[must_use]
    pub fn into_scenarios(self) -> Vec<AssembledScenario> {
        self.scenarios
    }
}

impl FeatureEmitter for MemoryEmitter {
    fn emit(&mut self, scenario: &AssembledScenario) -> Result<(), SplitError> {
        self.scenarios.push(scenario.clone());
        Ok(())
    }
}

/// Emitter writing feature files below an output root.
#[derive(Debug)]
pub struct DirectoryEmitter {
    root: Utf8PathBuf,
    dir: Dir,
    written: usize,
}

impl DirectoryEmitter {
    /// Create the output root if needed and remove everything inside it.
    ///
    /// Call once per run; every later [`emit`](FeatureEmitter::emit) adds
    /// files without clearing anything.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Io`] when the root cannot be created, opened or
    /// emptied.
    pub fn create(root: impl AsRef<Utf8Path>) -> Result<Self, SplitError> {
        let root = root.as_ref().to_owned();
        Dir::create_ambient_dir_all(&root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())?;
        clear_dir(&dir)?;
        info!(root = %root, "reset destination directory");
        Ok(Self {
            root,
            dir,
            written: 0,
        })
    }

    /// The output root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Number of files written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }
}

fn clear_dir(dir: &Dir) -> io::Result<()> {
    for entry in dir.entries()? {
        let entry = entry?;
        let name = entry.file_name()?;
        if entry.file_type()?.is_dir() {
            dir.remove_dir_all(&name)?;
        } else {
            dir.remove_file(&name)?;
        }
    }
    Ok(())
}

impl FeatureEmitter for DirectoryEmitter {
    fn emit(&mut self, scenario: &AssembledScenario) -> Result<(), SplitError> {
        if !scenario.source_dir.as_str().is_empty() {
            self.dir.create_dir_all(&scenario.source_dir)?;
        }
        let relative = scenario.relative_path();
        let mut file = self
            .dir
            .open_with(&relative, OpenOptions::new().write(true).create_new(true))?;
        file.write_all(scenario.text().as_bytes())?;
        self.written += 1;
        debug!(path = %self.root.join(&relative), "wrote scenario file");
        Ok(())
    }
}
