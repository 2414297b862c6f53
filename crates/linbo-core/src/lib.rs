//! # linbo-core - Core Domain Types
//!
//! Foundation crate for the LINBO kiosk. Provides the backend state model,
//! operating system descriptors, the client configuration snapshot, geometry
//! primitives, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, toml, tracing).
//!
//! ## Public API
//!
//! ### Backend State (`state`)
//! - [`BackendState`] - State published by the backend, totally ordered by an explicit rank table
//!
//! ### Operating Systems (`os`)
//! - [`OsDescriptor`] - One configured operating system
//! - [`StartAction`] - Start, Sync or Reinstall
//! - [`OsId`] - Index of an OS in the configuration
//!
//! ### Client Configuration (`client`)
//! - [`ClientConfig`] - Host details and OS list exposed by the backend
//! - [`DownloadMethod`] - Cache download method
//!
//! ### Geometry (`geometry`)
//! - [`Rect`], [`Size`], [`Point`] - Integer layout primitives
//! - [`clamp_dim()`] - Clamp a computed dimension to at least one unit
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use linbo_core::prelude::*;
//! ```

pub mod client;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod os;
pub mod prelude;
pub mod state;

// Re-export commonly used types at crate root for convenience
pub use client::{ClientConfig, DownloadMethod};
pub use error::{Error, Result, ResultExt};
pub use geometry::{clamp_dim, scale, Point, Rect, Size, MIN_DIMENSION};
pub use os::{EnabledActions, OsDescriptor, OsId, StartAction};
pub use state::BackendState;
