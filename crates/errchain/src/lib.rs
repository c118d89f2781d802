//! # errchain — composable error chains
//!
//! A zero-dependency crate for composing several errors into one error
//! value, while still being able to ask "is this error, or anything it
//! wraps, equal to X" and to pull a typed error back out.
//!
//! ## Design
//!
//! [`new`] turns an ordered sequence of optional errors into one
//! `Option<BoxError>`:
//!
//! - **no errors**: `None`
//! - **one error**: that error, unchanged (same allocation, not wrapped)
//! - **two or more**: a [`Chain`], a singly linked, immutable list owning
//!   every error in order
//!
//! Matching works on any `&dyn Error`, chain or not. [`walk`] visits the
//! error, every chain slot, and whatever each slot wraps (via `source()`,
//! or the payload of a `std::io::Error`), depth-first in input order.
//! [`is`], [`find`] and [`is_io_kind`] are built on it.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::io;
//! use errchain::{chain, Chain};
//!
//! #[derive(Debug, PartialEq)]
//! struct Shutdown;
//!
//! impl std::fmt::Display for Shutdown {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         f.write_str("shutting down")
//!     }
//! }
//!
//! impl std::error::Error for Shutdown {}
//!
//! let err = chain![
//!     "request aborted",
//!     Shutdown,
//!     io::Error::new(io::ErrorKind::UnexpectedEof, "EOF"),
//! ]
//! .unwrap();
//!
//! // Rendering nests the rest of the chain in parentheses.
//! assert_eq!(err.to_string(), "request aborted (shutting down (EOF))");
//!
//! // Matching
//! assert!(errchain::is(&*err, &Shutdown));
//! assert!(errchain::is_io_kind(&*err, io::ErrorKind::UnexpectedEof));
//!
//! // Extraction
//! let io_err = errchain::find::<io::Error>(&*err).unwrap();
//! assert_eq!(io_err.kind(), io::ErrorKind::UnexpectedEof);
//! assert_eq!(err.downcast_ref::<Chain>().map(Chain::len), Some(3));
//! ```
//!
//! ## Dependencies
//!
//! Zero. By design.

mod chain;
#[macro_use]
mod macros;
mod convert;
mod walk;

// ── Public API ────────────────────────────────────────────────────

pub use chain::{collect, from_errors, join, new, Chain, Slots};
pub use convert::ResultExt;
pub use walk::{find, is, is_io_kind, walk, Walk};

/// Owned, thread-safe error value. Every chain slot holds one.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
