//! # Boltview Architecture
//!
//! Boltview shows an embedded key-value store as editable text inside a text
//! editor and writes the edits back. It is a library with a thin command-line
//! client; an editor plugin host is just another client of the same API.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Argument parsing, terminal output, exit codes            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - BoltApi<S: KvStore>, host function dispatch              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, returns CmdResult              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────┐ ┌───────────────────┐ ┌─────────────┐
//! │  projection.rs       │ │  store/           │ │  host.rs    │
//! │  lines <-> buckets   │ │  KvStore, redb    │ │  Host trait │
//! └──────────────────────┘ └───────────────────┘ └─────────────┘
//! ```
//!
//! ## The Line Projection
//!
//! One line per bucket, one indented `key => value` line per entry. See
//! [`projection`] for the exact patterns.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. The editor is reached only through [`host::Host`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and implementations
//! - [`projection`]: Rendering and parsing of buffer lines
//! - [`host`]: The host editor surface
//! - [`model`]: Core data types (`Bucket`, `Entry`, `PutMode`)
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod host;
pub mod model;
pub mod projection;
pub mod store;
