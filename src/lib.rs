//! # wwivcfg - WWIV 4.x CONFIG.DAT codec and editor
//!
//! WWIV 4.x bulletin board systems keep every system setting in
//! `CONFIG.DAT`, a single 6228-byte packed binary record written by DOS
//! tools that no longer run anywhere convenient. wwivcfg reads, edits, and
//! writes that record byte-for-byte so existing boards and their archives
//! stay usable.
//!
//! ## Features
//!
//! - **Byte-exact codec**: the full record layout with explicit
//!   little-endian fields, fixed-width NUL-terminated strings, and the
//!   nested security level, auto-validation, and archiver tables. One
//!   field table drives decoding and encoding, so the directions cannot
//!   drift apart.
//! - **Restriction flags**: the 16-bit user restriction mask with its
//!   16-character display ruler and a parser that reverses it exactly.
//! - **Factory defaults**: the record a stock installation starts from,
//!   including the graduated 256-level security ladder.
//! - **Safe file handling**: advisory-locked reads and writes, exact-size
//!   enforcement, and optional `.bak` backups before overwriting.
//! - **JSON sidecar**: lossless export and import for editing with modern
//!   tools.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use wwivcfg::legacy::ConfigRecord;
//! use wwivcfg::store;
//!
//! fn main() -> anyhow::Result<()> {
//!     let path = Path::new("CONFIG.DAT");
//!     let bytes = store::read_record_file(path)?;
//!     let mut rec = ConfigRecord::decode(&bytes)?;
//!
//!     rec.system_name = "Amber Shores BBS".to_string();
//!
//!     rec.validate()?;
//!     store::write_record_file(path, &rec.encode(), true)?;
//!     Ok(())
//! }
//! ```
//!
//! Working with restriction masks needs no file at all:
//!
//! ```rust
//! use wwivcfg::legacy::restrict::{RestrictionFlags, RESTRICT_POST, RESTRICT_VALIDATE};
//!
//! let mut flags = RestrictionFlags::from_mask(RESTRICT_VALIDATE);
//! flags.toggle(RESTRICT_POST);
//! assert_eq!(flags.to_string(), "  M  P          ");
//! assert_eq!(RestrictionFlags::parse("m p"), flags);
//! ```
//!
//! ## Module Organization
//!
//! - [`cursor`] - Offset-tracked little-endian reader and writer primitives
//! - [`legacy`] - The record layout, types, codec, and restriction flags
//! - [`store`] - Locked file reads and writes with size enforcement
//! - [`report`] - Plain-text views of a decoded record

pub mod cursor;
pub mod legacy;
pub mod report;
pub mod store;
