//! # Line Projection
//!
//! The store is shown to the editor as plain text, one line per bucket and one
//! indented line per entry:
//!
//! ```text
//! users
//! 	alice => admin
//! 	bob => viewer
//! sessions
//! ```
//!
//! Bucket lines carry the bucket name verbatim. Entry lines are recognised by
//! their leading whitespace and split on `=>`. The key may not contain spaces
//! or `=`; the value runs to the end of the line and must start with a
//! non-blank character.
//!
//! Not every stored entry has a line. Keys and values are raw bytes, and an
//! entry is only shown when its line reads back as exactly the same key and
//! value: non-UTF-8 bytes, line breaks, leading blanks in the value, empty
//! values and keys holding a space or `=` all fall outside the format.
//! [`project`] separates those out so an edited buffer never touches them.
//!
//! Nothing here touches the store. [`render`] produces lines from listings,
//! [`parse_line`] and [`resolve`] classify individual lines for the cursor
//! operations, and [`parse_buffer`] + [`diff`] turn a whole edited buffer into
//! the list of store [`Edit`]s that reproduce it.

use crate::error::{BoltError, Result};
use crate::model::{Bucket, Entry, PutMode};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str;

static HAS_LEADING_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]+.*$").expect("leading space pattern"));

static ENTRY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]+([^ =]*)[ \t]*=>[ \t]*([^ \t].*)$").expect("entry line pattern")
});

pub const DEFAULT_INDENT: &str = "\t";

/// A single buffer line, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank,
    Bucket(String),
    Entry { key: String, value: String },
}

/// What the line under the cursor refers to in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineTarget {
    Bucket {
        name: String,
    },
    Entry {
        bucket: String,
        key: String,
        value: String,
    },
}

/// One store mutation derived from an edited buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    CreateBucket(String),
    PutEntry {
        bucket: String,
        key: Vec<u8>,
        value: Vec<u8>,
        mode: PutMode,
    },
    DeleteEntry {
        bucket: String,
        key: Vec<u8>,
    },
    DeleteBucket(String),
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::CreateBucket(name) => write!(f, "create bucket {}", name),
            Edit::PutEntry {
                bucket,
                key,
                value,
                mode,
            } => {
                let verb = match mode {
                    PutMode::CreateOnly => "create",
                    PutMode::Overwrite => "update",
                };
                write!(
                    f,
                    "{} {}: {} => {}",
                    verb,
                    bucket,
                    String::from_utf8_lossy(key),
                    String::from_utf8_lossy(value)
                )
            }
            Edit::DeleteEntry { bucket, key } => {
                write!(f, "delete {}: {}", bucket, String::from_utf8_lossy(key))
            }
            Edit::DeleteBucket(name) => write!(f, "delete bucket {}", name),
        }
    }
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Whether a bucket named `name` reads back from its own line.
pub fn bucket_line_reads_back(name: &str) -> bool {
    if name.contains(is_line_break) {
        return false;
    }
    matches!(parse_line(name), Ok(Line::Bucket(parsed)) if parsed == name)
}

/// Renders a single entry line, or `None` when the line would not read back
/// as the same key and value.
pub fn entry_line(entry: &Entry, indent: &str) -> Option<String> {
    let key = str::from_utf8(&entry.key).ok()?;
    let value = str::from_utf8(&entry.value).ok()?;
    let line = format!("{}{} => {}", indent, key, value);
    if line.contains(is_line_break) {
        return None;
    }

    match parse_line(&line) {
        Ok(Line::Entry { key: k, value: v }) if k == key && v == value => Some(line),
        _ => None,
    }
}

/// Renders buckets and their entries as buffer lines. Buckets and entries
/// that have no faithful line are left out.
pub fn render(buckets: &[Bucket], indent: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for bucket in buckets {
        if !bucket_line_reads_back(&bucket.name) {
            continue;
        }
        lines.push(bucket.name.clone());
        lines.extend(bucket.entries.iter().filter_map(|e| entry_line(e, indent)));
    }
    lines
}

/// A store listing split into what the buffer shows and what it cannot.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Buckets as the rendered buffer shows them.
    pub shown: Vec<Bucket>,
    /// Entries with no faithful line, grouped by bucket. A bucket whose own
    /// name has no line is here whole and absent from `shown`.
    pub hidden: Vec<Bucket>,
}

impl Projection {
    pub fn hides_entries_of(&self, bucket: &str) -> bool {
        self.hidden
            .iter()
            .any(|b| b.name == bucket && !b.is_empty())
    }

    /// One line per bucket that is partly or wholly missing from the buffer.
    pub fn describe_hidden(&self) -> Vec<String> {
        self.hidden
            .iter()
            .map(|bucket| {
                if find_bucket(&self.shown, &bucket.name).is_some() {
                    format!(
                        "{}: {} entries cannot be shown as lines",
                        bucket.name,
                        bucket.entries.len()
                    )
                } else {
                    format!("bucket {:?} cannot be shown as a line", bucket.name)
                }
            })
            .collect()
    }
}

/// Splits a listing by whether each bucket and entry survives a trip through
/// its buffer line.
pub fn project(buckets: &[Bucket]) -> Projection {
    let mut projection = Projection::default();
    for bucket in buckets {
        if !bucket_line_reads_back(&bucket.name) {
            projection.hidden.push(bucket.clone());
            continue;
        }

        let (shown, hidden): (Vec<Entry>, Vec<Entry>) = bucket
            .entries
            .iter()
            .cloned()
            .partition(|e| entry_line(e, DEFAULT_INDENT).is_some());

        projection.shown.push(Bucket {
            name: bucket.name.clone(),
            entries: shown,
        });
        if !hidden.is_empty() {
            projection.hidden.push(Bucket {
                name: bucket.name.clone(),
                entries: hidden,
            });
        }
    }
    projection
}

pub fn has_leading_space(line: &str) -> bool {
    HAS_LEADING_SPACE.is_match(line)
}

/// Splits an indented `key => value` line. Returns `None` when the line does
/// not have that shape.
pub fn split_entry(line: &str) -> Option<(&str, &str)> {
    let caps = ENTRY_LINE.captures(line)?;
    let key = caps.get(1)?.as_str();
    let value = caps.get(2)?.as_str();
    Some((key, value))
}

pub fn parse_line(line: &str) -> Result<Line> {
    if line.trim().is_empty() {
        return Ok(Line::Blank);
    }

    if !has_leading_space(line) {
        return Ok(Line::Bucket(line.to_string()));
    }

    match split_entry(line) {
        Some(("", _)) => Err(BoltError::parse(line, "entry key is empty")),
        Some((key, value)) => Ok(Line::Entry {
            key: key.to_string(),
            value: value.to_string(),
        }),
        None => Err(BoltError::parse(line, "expected `key => value`")),
    }
}

/// Classifies the line at `row` (0-based). Entry lines are attributed to the
/// nearest bucket line above them.
pub fn resolve<L: AsRef<str>>(lines: &[L], row: usize) -> Result<LineTarget> {
    let line = lines
        .get(row)
        .map(|l| l.as_ref())
        .ok_or_else(|| BoltError::Api(format!("Line {} is outside the buffer", row + 1)))?;

    match parse_line(line)? {
        Line::Blank => Err(BoltError::parse(line, "blank line")),
        Line::Bucket(name) => Ok(LineTarget::Bucket { name }),
        Line::Entry { key, value } => {
            let bucket = lines[..row]
                .iter()
                .rev()
                .map(|l| l.as_ref())
                .find(|l| !l.trim().is_empty() && !has_leading_space(l))
                .ok_or_else(|| BoltError::parse(line, "entry has no bucket above it"))?;
            Ok(LineTarget::Entry {
                bucket: bucket.to_string(),
                key,
                value,
            })
        }
    }
}

/// Parses a whole buffer back into buckets.
///
/// Blank lines are ignored. A bucket header that appears twice merges into the
/// first occurrence, and a repeated key keeps the last value.
pub fn parse_buffer<L: AsRef<str>>(lines: &[L]) -> Result<Vec<Bucket>> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut current: Option<usize> = None;

    for line in lines {
        let line = line.as_ref();
        match parse_line(line)? {
            Line::Blank => {}
            Line::Bucket(name) => {
                let pos = match buckets.iter().position(|b| b.name == name) {
                    Some(pos) => pos,
                    None => {
                        buckets.push(Bucket::new(name));
                        buckets.len() - 1
                    }
                };
                current = Some(pos);
            }
            Line::Entry { key, value } => {
                let pos =
                    current.ok_or_else(|| BoltError::parse(line, "entry has no bucket above it"))?;
                buckets[pos].upsert(Entry::new(key, value));
            }
        }
    }

    Ok(buckets)
}

fn find_bucket<'a>(set: &'a [Bucket], name: &str) -> Option<&'a Bucket> {
    set.iter().find(|b| b.name == name)
}

/// Computes the store edits that turn `before` into `after`.
///
/// Edits are ordered so that each one can run on its own: buckets are created
/// first, then new entries are written, then changed entries are overwritten,
/// then removed entries are deleted, and finally removed buckets (which are
/// empty by then) are dropped.
pub fn diff(before: &[Bucket], after: &[Bucket]) -> Vec<Edit> {
    let mut edits = Vec::new();

    for bucket in after {
        if find_bucket(before, &bucket.name).is_none() {
            edits.push(Edit::CreateBucket(bucket.name.clone()));
        }
    }

    for mode in [PutMode::CreateOnly, PutMode::Overwrite] {
        for bucket in after {
            let old = find_bucket(before, &bucket.name);
            for entry in &bucket.entries {
                let wanted = match old.and_then(|b| b.get(&entry.key)) {
                    None => PutMode::CreateOnly,
                    Some(prev) if prev.value != entry.value => PutMode::Overwrite,
                    Some(_) => continue,
                };
                if wanted != mode {
                    continue;
                }
                edits.push(Edit::PutEntry {
                    bucket: bucket.name.clone(),
                    key: entry.key.clone(),
                    value: entry.value.clone(),
                    mode,
                });
            }
        }
    }

    for bucket in before {
        let new = find_bucket(after, &bucket.name);
        for entry in &bucket.entries {
            if new.and_then(|b| b.get(&entry.key)).is_none() {
                edits.push(Edit::DeleteEntry {
                    bucket: bucket.name.clone(),
                    key: entry.key.clone(),
                });
            }
        }
    }

    for bucket in before {
        if find_bucket(after, &bucket.name).is_none() {
            edits.push(Edit::DeleteBucket(bucket.name.clone()));
        }
    }

    edits
}
