//! Error kinds surfaced by the directory core, and non-fatal diagnostics
//! recovered locally while parsing.

/// Errors surfaced to the caller.
///
/// None of these are retried internally; the core is stateless between
/// calls with respect to transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A start-cluster value is out of range for the FAT type of the
    /// containing directory (e.g. a FAT16 directory given a cluster above
    /// `0xFFFF`).
    #[error("cluster value {0:#x} is out of range for this FAT type")]
    InvalidCluster(u32),

    /// A long name contains a code point outside the UCS-2 BMP.
    #[error("name contains a code point outside the UCS-2 basic multilingual plane")]
    UnsupportedName,

    /// No numeric tail up to `~99999` produced a name absent from the
    /// used-name set.
    #[error("exhausted numeric tail suffixes while generating a short name")]
    ShortNameExhausted,

    /// The containing directory has no room for a new entry and cannot
    /// grow (the fixed-size root of a FAT12/16 volume).
    #[error("directory is full and cannot grow")]
    DirectoryFull,

    /// A parse-time structural violation that cannot be recovered from,
    /// e.g. a `0x00` terminator followed by non-zero bytes that cannot be
    /// safely reinterpreted.
    #[error("directory structure is corrupt: {0}")]
    Corrupt(&'static str),

    /// A timestamp field was out of the representable DOS range and
    /// `compat-clamp-time` was not enabled to silently clamp it.
    #[error("timestamp field out of DOS-representable range")]
    InvalidTimestamp,
}

/// Non-fatal diagnostics recovered locally while parsing a directory.
///
/// These are never returned from a fallible operation; they are reported
/// through [`tracing`] (when the `std` feature is enabled) and otherwise
/// dropped. None of them invalidate the surrounding parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warn {
    /// An LFN chain's sequence numbers or checksum did not line up with its
    /// anchor; the chain was discarded and the anchor kept with its short
    /// name only.
    LfnBroken,
    /// A `0x00` terminator was found but non-zero bytes followed it within
    /// the allocated directory clusters.
    TrailingGarbage,
    /// A raw entry's attribute byte set bits outside the six defined flags.
    UnknownAttributeBits,
}

impl Warn {
    /// Report this diagnostic through `tracing`, a no-op without `std`.
    pub fn report(self) {
        #[cfg(feature = "std")]
        {
            match self {
                Warn::LfnBroken => tracing::warn!("lfn chain broken, falling back to short name"),
                Warn::TrailingGarbage => {
                    tracing::warn!("non-zero bytes after directory terminator, ignoring")
                }
                Warn::UnknownAttributeBits => {
                    tracing::warn!("directory entry has unknown attribute bits set")
                }
            }
        }
    }
}
