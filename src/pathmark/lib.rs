//! # Pathmark Architecture
//!
//! Pathmark keeps a tree of named groups ("nodes") holding bookmarked paths
//! ("items"): local files, folders, UNC shares and URLs. The whole tree lives
//! in one JSON document.
//!
//! Like any library with a CLI client, it is layered so that only the
//! outermost layer knows about terminals:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, sets up logging        │
//! │  - Saves the document after mutating commands               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Opens the document (seed, quarantine, auto-repair)       │
//! │  - Dispatches to commands and tracks unsaved changes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Resolves selectors (`General/Files#2`) to ids            │
//! │  - Returns `CmdResult` data and messages                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - HierarchicalStore: id maps, invariants, repair           │
//! │  - DocumentBackend: FsBackend (production), MemBackend      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ids, not references
//!
//! Nodes and items never point at each other directly. Each record carries
//! its parent's id and each node lists its children's ids, so the same tree
//! can be written to and read from JSON without any fix-up pass. The price is
//! that a hand-edited document can disagree with itself; see
//! [`store::integrity`] for how that is detected and repaired.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade every front-end talks to
//! - [`commands`]: Business logic for each command
//! - [`store`]: The hierarchical store and its persistence backends
//! - [`model`]: `Node`, `Item`, updates and path classification
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
