//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every boltview operation, whichever host drives it.
//!
//! [`BoltApi`] owns the one store handle a document needs together with the
//! configuration, and forwards each call to `commands/*.rs`. It does no I/O of
//! its own beyond what the store and the [`Host`] do.
//!
//! ## Host functions
//!
//! Editors call boltview by function name with string arguments.
//! [`HostFunction`] lists those names and [`BoltApi::call`] dispatches them,
//! so a plugin host only has to forward `(name, args)` pairs.
//!
//! ## Generic Over KvStore
//!
//! - Production: `BoltApi<RedbStore>`
//! - Testing: `BoltApi<InMemoryStore>`

use crate::commands::{self, CmdResult};
use crate::config::BoltConfig;
use crate::error::{BoltError, Result};
use crate::host::Host;
use crate::model::PutMode;
use crate::store::db::RedbStore;
use crate::store::KvStore;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Function names registered with the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostFunction {
    Load,
    CreateBucket,
    CreateEntry,
    CreateEntryAnyway,
    DeleteEntry,
    DeleteBucket,
    CreateBucketEntry,
    DeleteBucketEntry,
}

impl HostFunction {
    pub const ALL: [HostFunction; 8] = [
        HostFunction::Load,
        HostFunction::CreateBucket,
        HostFunction::CreateEntry,
        HostFunction::CreateEntryAnyway,
        HostFunction::DeleteEntry,
        HostFunction::DeleteBucket,
        HostFunction::CreateBucketEntry,
        HostFunction::DeleteBucketEntry,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HostFunction::Load => "BoltviewerLoad",
            HostFunction::CreateBucket => "BoltviewerCreateBucket",
            HostFunction::CreateEntry => "BoltviewerCreateEntry",
            HostFunction::CreateEntryAnyway => "BoltviewerCreateEntryAnyway",
            HostFunction::DeleteEntry => "BoltviewerDeleteEntry",
            HostFunction::DeleteBucket => "BoltviewerDeleteBucket",
            HostFunction::CreateBucketEntry => "BoltviewerCreateBucketEntry",
            HostFunction::DeleteBucketEntry => "BoltviewerDeleteBucketEntry",
        }
    }
}

impl fmt::Display for HostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HostFunction {
    type Err = BoltError;

    fn from_str(s: &str) -> Result<Self> {
        HostFunction::ALL
            .into_iter()
            .find(|func| func.name() == s)
            .ok_or_else(|| BoltError::UnknownFunction(s.to_string()))
    }
}

/// The main API facade for boltview operations.
pub struct BoltApi<S: KvStore> {
    store: S,
    config: BoltConfig,
}

impl BoltApi<RedbStore> {
    /// Opens the store file at `path`.
    pub fn open<P: AsRef<Path>>(path: P, config: BoltConfig) -> Result<Self> {
        let store = RedbStore::open(path, config.create_if_missing)?;
        Ok(Self::new(store, config))
    }

    /// Opens the store for the document the host buffer was opened on.
    pub fn open_for_host<H: Host>(host: &H, config: BoltConfig) -> Result<Self> {
        let path = host.current_path()?;
        Self::open(path, config)
    }
}

impl<S: KvStore> BoltApi<S> {
    pub fn new(store: S, config: BoltConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &BoltConfig {
        &self.config
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.store, &self.config.indent)
    }

    pub fn load<H: Host>(&self, host: &mut H) -> Result<CmdResult> {
        commands::load::run(&self.store, host, &self.config)
    }

    pub fn create_bucket(&mut self, args: &[String]) -> Result<CmdResult> {
        commands::create::bucket(&mut self.store, args)
    }

    pub fn create_entry(&mut self, args: &[String], mode: PutMode) -> Result<CmdResult> {
        commands::create::entry(&mut self.store, args, mode)
    }

    pub fn delete_bucket(&mut self, args: &[String]) -> Result<CmdResult> {
        commands::delete::bucket(&mut self.store, args)
    }

    pub fn delete_entry(&mut self, args: &[String]) -> Result<CmdResult> {
        commands::delete::entry(&mut self.store, args)
    }

    /// Creates whatever the buffer line at `row` (0-based) describes.
    pub fn create_at<H: Host>(&mut self, host: &H, row: usize, mode: PutMode) -> Result<CmdResult> {
        commands::cursor::create_at(&mut self.store, host, row, mode)
    }

    /// Deletes whatever the buffer line at `row` (0-based) describes.
    pub fn delete_at<H: Host>(&mut self, host: &mut H, row: usize) -> Result<CmdResult> {
        commands::cursor::delete_at(&mut self.store, host, row)
    }

    pub fn apply<L: AsRef<str>>(&mut self, lines: &[L]) -> Result<CmdResult> {
        commands::apply::run(&mut self.store, lines)
    }

    /// Dispatches a host function call.
    ///
    /// The cursor functions take the 1-based line number the editor reports,
    /// optionally followed by `anyway` to overwrite an existing key.
    pub fn call<H: Host>(&mut self, host: &mut H, function: &str, args: &[String]) -> Result<CmdResult> {
        match function.parse::<HostFunction>()? {
            HostFunction::Load => self.load(host),
            HostFunction::CreateBucket => self.create_bucket(args),
            HostFunction::CreateEntry => self.create_entry(args, PutMode::CreateOnly),
            HostFunction::CreateEntryAnyway => self.create_entry(args, PutMode::Overwrite),
            HostFunction::DeleteEntry => self.delete_entry(args),
            HostFunction::DeleteBucket => self.delete_bucket(args),
            HostFunction::CreateBucketEntry => {
                let (row, mode) = parse_cursor_args(args)?;
                self.create_at(host, row, mode)
            }
            HostFunction::DeleteBucketEntry => {
                let (row, mode) = parse_cursor_args(args)?;
                if mode == PutMode::Overwrite {
                    return Err(BoltError::Api("anyway only applies to create".to_string()));
                }
                self.delete_at(host, row)
            }
        }
    }
}

fn parse_cursor_args(args: &[String]) -> Result<(usize, PutMode)> {
    let (line, mode) = match args {
        [line] => (line, PutMode::CreateOnly),
        [line, flag] if flag == "anyway" => (line, PutMode::Overwrite),
        [_, flag] => return Err(BoltError::Api(format!("unexpected argument: {}", flag))),
        _ => {
            return Err(BoltError::Arity {
                what: "line",
                got: args.len(),
            })
        }
    };

    let row = line
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| BoltError::Api(format!("invalid line number: {}", line)))?;
    Ok((row, mode))
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, MessageLevel};
