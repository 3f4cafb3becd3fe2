//! # Bookstore Architecture
//!
//! Bookstore is a **UI-agnostic inventory library** for a small book catalog,
//! with a thin command-line client on top.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Facade over commands, saves snapshots after mutations    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - One function per user action, returns `CmdResult`        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/)                                             │
//! │  - `Catalog`: ids, CRUD, stats, JSON/XML snapshots          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the
//! process. Diagnostics go through `tracing`; the binary decides where they
//! end up.
//!
//! ## Errors
//!
//! Every fallible call returns [`error::Result`]. Callers can tell apart
//! bad input ([`error::BookstoreError::Validation`]), unknown ids
//! ([`error::BookstoreError::NotFound`]) and failed snapshot I/O
//! ([`error::BookstoreError::Persistence`]). None of them leave the
//! catalog in a partially modified state.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each user action
//! - [`store`]: The catalog and its snapshot formats
//! - [`model`]: `Book`, validation, partial updates
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
