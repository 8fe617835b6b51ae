//! # Shoebox Architecture
//!
//! Shoebox is a **UI-agnostic record keeper**: three independent local
//! collections (notes, products, to-dos) with create/read/update/delete,
//! search, filter and sort, mirrored to a key-value blob store on every
//! mutation and rehydrated on open. There is no rendering, no prompting and
//! no terminal I/O anywhere in this crate — a view renderer (web, TUI,
//! whatever) sits on top and talks to the [`api::Shoebox`] facade.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  View renderer (external)                                   │
//! │  - Draws the query output, owns forms, tabs and the         │
//! │    delete-confirmation prompt                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade: three stores + three edit sessions          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (store/records.rs, query.rs, session.rs, domain/)     │
//! │  - One generic record store, query engine and edit session, │
//! │    instantiated per domain descriptor                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract BlobStore trait                                 │
//! │  - FileBackend (production), MemBackend (testing)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: One Pattern, Three Domains
//!
//! Notes, products and to-dos are the same lifecycle — validate raw form
//! input, prepend, flush, re-derive the visible slice — differing only in
//! fields, predicates and comparators. Those differences live in the
//! [`domain::Domain`] descriptors; everything else is written once.
//!
//! ## Persistence Contract
//!
//! Every mutating operation flushes its full collection synchronously
//! before returning, so the in-memory and persisted states never diverge
//! observably. The store is single-threaded; backends use interior
//! mutability instead of locks, and each flush is a whole-blob overwrite.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade — entry point for all operations
//! - [`domain`]: Per-domain descriptors (notes, products, to-dos)
//! - [`store`]: Blob-store boundary, backends and the generic record store
//! - [`query`]: Derived views: search, category/status filters, sorting
//! - [`session`]: The create-vs-update edit session state machine
//! - [`refresh`]: Scheduled view recomputation for date-based statuses
//! - [`model`]: The record envelope and id type
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod model;
pub mod query;
pub mod refresh;
pub mod session;
pub mod store;
