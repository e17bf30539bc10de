//! Mesh file I/O for the slicer.
//!
//! Loads and saves triangle soups in STL (Stereolithography) format, binary
//! and ASCII, auto-detected on load. The soup feeds directly into the
//! spatial index build.
//!
//! # Example
//!
//! ```no_run
//! use slicer_io::{load_stl, save_stl};
//!
//! let triangles = load_stl("model.stl").unwrap();
//! save_stl(&triangles, "copy.stl", true).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod stl;

pub use error::{IoError, IoResult};
pub use stl::{load_stl, save_stl};
