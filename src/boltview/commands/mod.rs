use crate::config::BoltConfig;
use crate::error::{BoltError, Result};
use crate::model::Bucket;

pub mod apply;
pub mod config;
pub mod create;
pub mod cursor;
pub mod delete;
pub mod list;
pub mod load;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Buckets touched by the operation, as they are afterwards
    pub affected_buckets: Vec<Bucket>,
    /// Buckets read by a listing operation
    pub listed_buckets: Vec<Bucket>,
    /// Buffer lines produced by a rendering operation
    pub lines: Vec<String>,
    pub config: Option<BoltConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_buckets(mut self, buckets: Vec<Bucket>) -> Self {
        self.affected_buckets = buckets;
        self
    }

    pub fn with_listed_buckets(mut self, buckets: Vec<Bucket>) -> Self {
        self.listed_buckets = buckets;
        self
    }

    pub fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_config(mut self, config: BoltConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Checks the positional arguments a host function was called with.
pub(crate) fn expect_args<'a, const N: usize>(
    what: &'static str,
    args: &'a [String],
) -> Result<[&'a str; N]> {
    if args.len() != N {
        return Err(BoltError::Arity {
            what,
            got: args.len(),
        });
    }
    let mut out = [""; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.as_str();
    }
    Ok(out)
}
