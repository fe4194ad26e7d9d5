//! The directory entry, long filename and short-name generation core of a
//! FAT12/16/32 file system library.
//!
//! This crate owns the 32-byte on-disk directory record, the long filename
//! (VFAT/LFN) protocol that chains synthetic records onto a short-name
//! anchor, the 8.3 short-name generator, and the in-memory directory table
//! that parses a raw sector stream into logical entries and serializes it
//! back. The block device, FAT table, boot sector and volume lifecycle are
//! external collaborators sketched as traits in [`external`]; this crate
//! does not implement them.
//!
//! ## Cargo Features
//!
//! - **alloc**: heap allocation without full `std`; required for LFN
//!   assembly, the directory table's entry vector, and the short-name
//!   generator's used-name snapshot.
//! - **std**: standard library support (implies `alloc`); enables `chrono`
//!   timestamp conversions and `tracing` diagnostics.
//! - **lfn**: long filename (VFAT) support — [`LfnChain`] and the
//!   short-name generator. Implies `alloc`.
//! - **compat-clamp-time**: clamp out-of-range timestamps instead of
//!   returning an error, matching the legacy behavior of foreign volumes
//!   written by older tools.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(not(target_endian = "little"))]
compile_error!("This crate only supports little endian systems");

// `DirectoryTable::insert`/`rename` drive the short-name generator and LFN
// chain assembler directly, so the table itself needs the `lfn` feature
// (which implies `alloc`) rather than bare `alloc`.
#[cfg(feature = "lfn")]
pub mod directory_table;
pub mod error;
pub mod external;
#[cfg(feature = "lfn")]
pub mod lfn;
pub mod raw;
pub mod short_entry;
#[cfg(feature = "lfn")]
pub mod short_name;
pub mod time;

#[cfg(feature = "lfn")]
pub use directory_table::{DirectoryKind, DirectoryTable, EntryRef, ShortEntryHandle};
pub use error::{Error, Warn};
pub use raw::{EntryClass, FileAttributes, RawEntry, RawDirectoryView};
pub use short_entry::ShortEntry;
pub use time::{FatDate, FatTime};

#[cfg(feature = "lfn")]
pub use lfn::LfnChain;
