//! # Host Editor
//!
//! boltview does not draw anything itself. It drives a text buffer owned by a
//! host editor, and [`Host`] is the part of that editor's surface it needs:
//! the path of the document being viewed, reading and replacing buffer lines,
//! and setting buffer options.
//!
//! [`BufferHost`] keeps the buffer in process. The command-line client uses it
//! as its scratch buffer, and tests use it to observe what an operation did to
//! the editor.

use crate::error::{BoltError, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub trait Host {
    /// Full path of the document the buffer was opened for.
    fn current_path(&self) -> Result<PathBuf>;

    fn buffer_lines(&self) -> Result<Vec<String>>;

    /// Replaces lines `start..end` (0-based, end exclusive) with `lines`.
    /// `end == None` replaces through the end of the buffer.
    fn set_buffer_lines(&mut self, start: usize, end: Option<usize>, lines: &[String])
        -> Result<()>;

    fn set_buffer_option(&mut self, name: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct BufferHost {
    path: Option<PathBuf>,
    lines: Vec<String>,
    options: BTreeMap<String, String>,
}

impl BufferHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }
}

impl Host for BufferHost {
    fn current_path(&self) -> Result<PathBuf> {
        self.path
            .clone()
            .ok_or_else(|| BoltError::Host("buffer has no file name".to_string()))
    }

    fn buffer_lines(&self) -> Result<Vec<String>> {
        Ok(self.lines.clone())
    }

    fn set_buffer_lines(
        &mut self,
        start: usize,
        end: Option<usize>,
        lines: &[String],
    ) -> Result<()> {
        let len = self.lines.len();
        let end = end.unwrap_or(len);
        if start > end || end > len {
            return Err(BoltError::Host(format!(
                "line range {}..{} is outside a buffer of {} lines",
                start, end, len
            )));
        }
        self.lines.splice(start..end, lines.iter().cloned());
        Ok(())
    }

    fn set_buffer_option(&mut self, name: &str, value: &str) -> Result<()> {
        self.options.insert(name.to_string(), value.to_string());
        Ok(())
    }
}
