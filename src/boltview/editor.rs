use crate::error::{BoltError, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["nvim", "vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(BoltError::Host(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
///
/// The editor string may carry arguments (`code --wait`).
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| BoltError::Host("Editor command is empty".to_string()))?;

    debug!(editor = %editor, path = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| BoltError::Host(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(BoltError::Host(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    Ok(fs::read_to_string(path)?)
}

/// Joins buffer lines into file content, one line per row with a trailing
/// newline.
pub fn lines_to_text<L: AsRef<str>>(lines: &[L]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
    }
    text
}

/// Splits file content back into buffer lines. Windows line endings are
/// accepted.
pub fn text_to_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Opens the editor on `lines` in a temporary file named with `extension`
/// (so the editor can pick a filetype) and returns the edited lines.
pub fn edit_lines<L: AsRef<str>>(lines: &[L], extension: &str) -> Result<Vec<String>> {
    let mut file = tempfile::Builder::new()
        .prefix("boltview_edit")
        .suffix(&format!(".{}", extension.trim_start_matches('.')))
        .tempfile()?;
    file.write_all(lines_to_text(lines).as_bytes())?;
    file.flush()?;

    let edited = open_in_editor(file.path())?;
    Ok(text_to_lines(&edited))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_to_text() {
        assert_eq!(lines_to_text(&["a", "\tk => v"]), "a\n\tk => v\n");
        assert_eq!(lines_to_text::<&str>(&[]), "");
    }

    #[test]
    fn test_text_to_lines_keeps_indent() {
        assert_eq!(text_to_lines("a\n\tk => v\n"), vec!["a", "\tk => v"]);
    }

    #[test]
    fn test_text_to_lines_crlf() {
        assert_eq!(text_to_lines("a\r\n  k => v\r\n"), vec!["a", "  k => v"]);
    }

    #[test]
    fn test_roundtrip() {
        let lines = vec!["users".to_string(), "\talice => admin".to_string()];
        assert_eq!(text_to_lines(&lines_to_text(&lines)), lines);
    }
}
