#![deny(clippy::all)]

//! phpx CLI
//!
//! The file-system collaborator around the pure `phpx-compiler` core:
//! configuration loading, console logging, and the directory walker that
//! finds template files and writes their compiled PHP next to them.

pub mod config;
pub mod logger;
pub mod walker;
