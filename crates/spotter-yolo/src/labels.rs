//! Class label lists.

use std::fs;
use std::io;
use std::ops::Index;
use std::path::Path;

use thiserror::Error;

/// Errors from building or loading a label list.
#[derive(Error, Debug)]
pub enum LabelsError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("label list is empty")]
    Empty,
}

/// Ordered class names, index-aligned with the probability tail of a
/// detection row.
///
/// A list always holds at least one name, so a decoder built from it has a
/// well-defined class count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labels {
    names: Vec<String>,
}

impl Labels {
    /// Wrap an ordered list of names.
    pub fn new(names: Vec<String>) -> Result<Self, LabelsError> {
        if names.is_empty() {
            return Err(LabelsError::Empty);
        }
        Ok(Self { names })
    }

    /// Convenience constructor from string literals.
    pub fn from_names<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
    ) -> Result<Self, LabelsError> {
        Self::new(names.into_iter().map(Into::into).collect())
    }

    /// Read one label per line from a plain text file. Surrounding
    /// whitespace is trimmed and blank lines are skipped, so the common
    /// trailing newline does not produce a phantom class.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LabelsError> {
        let raw = fs::read_to_string(path)?;
        Self::new(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Number of classes, `C`.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of a class, if the index is known.
    pub fn get(&self, class_id: usize) -> Option<&str> {
        self.names.get(class_id).map(String::as_str)
    }

    /// All names in class order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Index<usize> for Labels {
    type Output = str;

    fn index(&self, class_id: usize) -> &str {
        &self.names[class_id]
    }
}
