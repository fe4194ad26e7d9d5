//! The raw 32-byte directory record codec.
//!
//! A [`RawEntry`] packs and unpacks one on-disk record with no interpretation
//! of its fields beyond the boundaries needed to classify it. [`crate::short_entry::ShortEntry`]
//! and [`crate::lfn`] interpret the bytes further.

/// Offset of the attribute byte (`DIR_Attr`) within a 32-byte record.
pub const ATTR_OFFSET: usize = 0x0b;

/// First byte of a free-and-terminal entry: this record and every record
/// after it to the end of the allocated directory are unused.
pub const NAME_FREE_TERMINAL: u8 = 0x00;
/// First byte of a deleted entry.
pub const NAME_DELETED: u8 = 0xe5;
/// First byte used to escape a name that legitimately starts with `0xE5`.
pub const NAME_ESCAPED_E5: u8 = 0x05;

bitflags::bitflags! {
    /// `DIR_Attr` — the attribute byte of a directory record.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FileAttributes: u8 {
        const READ_ONLY    = 0x01;
        const HIDDEN       = 0x02;
        const SYSTEM       = 0x04;
        const VOLUME_LABEL = 0x08;
        const DIRECTORY    = 0x10;
        const ARCHIVE      = 0x20;
    }
}

impl FileAttributes {
    /// The exact mask that marks a record as an LFN slot rather than a
    /// short-name entry. No other attribute combination carries this
    /// meaning.
    pub const LFN_MARKER: FileAttributes = FileAttributes::from_bits_truncate(
        FileAttributes::READ_ONLY.bits()
            | FileAttributes::HIDDEN.bits()
            | FileAttributes::SYSTEM.bits()
            | FileAttributes::VOLUME_LABEL.bits(),
    );

    /// Bits outside the six defined attribute flags.
    fn unknown_bits(self) -> bool {
        self.bits() & !0x3f != 0
    }
}

/// How a [`RawEntry`] classifies, without interpreting name/time/cluster
/// fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryClass {
    /// `name[0] == 0x00`: free, and every entry after it is also free.
    Free,
    /// `name[0] == 0xE5`: a deleted slot, reusable.
    Deleted,
    /// Attribute byte is exactly [`FileAttributes::LFN_MARKER`].
    Lfn,
    /// Anything else: a short-name (file, directory, or volume label) entry.
    Short,
}

/// A single 32-byte on-disk directory record.
///
/// `RawEntry` is a pure value type: packing/unpacking bytes, with no
/// semantics attached to individual fields beyond what's needed to
/// classify the record. Dirty tracking and parent propagation live one
/// layer up, in [`crate::short_entry::ShortEntry`] and
/// [`crate::directory_table::DirectoryTable`].
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RawEntry {
    bytes: [u8; 32],
}

impl core::fmt::Debug for RawEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawEntry")
            .field("first_byte", &self.bytes[0])
            .field("attributes", &self.read_flag_byte())
            .finish()
    }
}

impl RawEntry {
    /// A record with every byte zeroed (a free, terminal slot).
    pub const ZERO: RawEntry = RawEntry { bytes: [0; 32] };

    /// Load a record from a borrowed 32-byte buffer.
    pub fn load(bytes: &[u8; 32]) -> Self {
        Self { bytes: *bytes }
    }

    /// The record's bytes, ready to be written back to storage.
    pub fn bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Mutable access to the record's bytes.
    pub fn bytes_mut(&mut self) -> &mut [u8; 32] {
        &mut self.bytes
    }

    /// `DIR_Attr` at offset [`ATTR_OFFSET`].
    pub fn read_flag_byte(&self) -> u8 {
        self.bytes[ATTR_OFFSET]
    }

    /// Overwrite `DIR_Attr`.
    pub fn write_flag_byte(&mut self, value: u8) {
        self.bytes[ATTR_OFFSET] = value;
    }

    /// Classify this record from byte 0 and the attribute byte.
    pub fn classify(&self) -> EntryClass {
        match self.bytes[0] {
            NAME_FREE_TERMINAL => EntryClass::Free,
            NAME_DELETED => EntryClass::Deleted,
            _ => {
                let attrs = FileAttributes::from_bits_truncate(self.read_flag_byte());
                if attrs == FileAttributes::LFN_MARKER {
                    EntryClass::Lfn
                } else {
                    if attrs.unknown_bits() {
                        crate::error::Warn::UnknownAttributeBits.report();
                    }
                    EntryClass::Short
                }
            }
        }
    }
}

/// A zero-copy view over a run of 32-byte records, letting a
/// [`crate::directory_table::DirectoryTable`] caller read or patch raw
/// records directly in a borrowed sector buffer without a parse/copy step.
#[repr(transparent)]
pub struct RawDirectoryView {
    pub entries: [RawEntry],
}

impl RawDirectoryView {
    /// Reinterpret `bytes` (a multiple of 32 bytes) as a borrowed slice of
    /// [`RawEntry`] records.
    pub fn from_bytes(bytes: &[u8]) -> &RawDirectoryView {
        assert!(bytes.len() % 32 == 0, "directory buffer must hold whole 32-byte records");
        let entries = bytemuck::cast_slice::<u8, RawEntry>(bytes);
        // SAFETY: `RawDirectoryView` is repr(transparent) over `[RawEntry]`,
        // so the fat pointer metadata (length) carries over unchanged.
        unsafe { &*(entries as *const [RawEntry] as *const RawDirectoryView) }
    }

    /// Mutable counterpart of [`Self::from_bytes`].
    pub fn from_bytes_mut(bytes: &mut [u8]) -> &mut RawDirectoryView {
        assert!(bytes.len() % 32 == 0, "directory buffer must hold whole 32-byte records");
        let entries = bytemuck::cast_slice_mut::<u8, RawEntry>(bytes);
        // SAFETY: see `from_bytes`.
        unsafe { &mut *(entries as *mut [RawEntry] as *mut RawDirectoryView) }
    }
}
