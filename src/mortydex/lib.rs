//! # Mortydex Architecture
//!
//! Mortydex is a **UI-agnostic catalog browser library** for the Rick and Morty
//! character catalog, with a command-line client on top. Characters come
//! read-only from a remote GraphQL API; everything the user adds (favorites,
//! soft deletes, comments, filter selections) lives in a local key-value
//! store.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Installs the tracing subscriber                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns backend, catalog and loaded user state              │
//! │  - Thin dispatch to commands, returns Result<CmdResult>     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, no printing                    │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                              │
//!                 ▼                              ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Engine (filter.rs, sort.rs) │ │  Catalog (catalog/)        │
//! │  Pure list transformations   │ │  GraphQL / file / static   │
//! └──────────────────────────────┘ └────────────────────────────┘
//!                 │
//!                 ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait: FileBackend, MemBackend            │
//! │  - MembershipStore (favorites, deleted), CommentStore       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Visible List
//!
//! catalog → applied filter selection → minus soft-deleted → sorted by name.
//! A soft-deleted character never reaches the primary list, not even through
//! the starred filter; it shows up only in the deleted view.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Logic for each operation
//! - [`filter`]: Filter selections and the filter engine
//! - [`sort`]: Locale-aware name ordering
//! - [`catalog`]: Remote catalog clients
//! - [`store`]: Key-value storage and the stores built on it
//! - [`model`]: Core data types (`Character`, `CharacterDetail`, `Comment`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod sort;
pub mod store;
