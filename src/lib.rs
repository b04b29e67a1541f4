//! # dirlookup
//!
//! Resolve a username to a single person record in an organization's
//! directory.
//!
//! Two independent lookup paths are combined: a finger query against a
//! login host (which usually knows the person's full name) and a directory
//! search (an HTML web directory, or a finger-based text directory). The
//! directory's answers are parsed into uniform candidate records and
//! narrowed down to exactly one person by name and e-mail matching.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  Transport   │──▶│    Parser    │──▶│    Refine    │
//! │ finger / web │   │ text / html  │   │ name / email │
//! └──────────────┘   └──────────────┘   └──────┬───────┘
//!                                              ▼
//!                                       ┌──────────────┐
//!                                       │   Resolver   │
//!                                       └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! dirlookup resolve costan
//! dirlookup resolve costan --json
//! dirlookup search "Li, Yan Ping"
//! dirlookup finger devadas --host linux.mit.edu
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Candidate and resolved records |
//! | [`transport`] | Collaborator traits and transport errors |
//! | [`finger`] | Finger protocol client |
//! | [`webdir`] | Web directory HTTP client |
//! | [`parse`] | Text and HTML response parsers |
//! | [`names`] | Name vectors and name flipping |
//! | [`directory`] | Backend + response format pairing |
//! | [`refine`] | Candidate disambiguation |
//! | [`resolve`] | Resolution pipeline |
//! | [`logging`] | `tracing` subscriber setup |

pub mod config;
pub mod directory;
pub mod finger;
pub mod logging;
pub mod models;
pub mod names;
pub mod parse;
pub mod refine;
pub mod resolve;
pub mod transport;
pub mod webdir;
