//! The in-memory ordered sequence of logical entries backing one
//! directory.

extern crate alloc;

use alloc::vec::Vec;

use crate::error::{Error, Warn};
use crate::lfn::{LfnAssembler, LfnChain};
use crate::raw::{EntryClass, FileAttributes, RawEntry, NAME_DELETED};
use crate::short_entry::ShortEntry;
use crate::short_name;
use crate::time::{FatDate, FatTime};

/// Whether a directory is the fixed-size FAT12/16 root (cannot grow) or an
/// ordinary cluster-chain directory (FAT32 root, or any subdirectory),
/// which the enclosing filesystem can extend by allocating another
/// cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryKind {
    /// `slot_count` 32-byte records; `insert` fails with
    /// [`Error::DirectoryFull`] rather than growing.
    FixedRoot { slot_count: usize },
    /// No fixed capacity at this layer; growing clusters is the enclosing
    /// filesystem's job (the [`crate::external::FatTable`] collaborator),
    /// not this crate's.
    Growable,
}

/// One slot (or, for a live entry, a contiguous run of slots) in a
/// directory table.
#[derive(Debug, Clone)]
enum LogicalEntry {
    /// A single reusable, deleted 32-byte record, its original bytes
    /// preserved (minus the `0xE5` deletion marker already applied) so an
    /// enclosing tool can offer undelete.
    Deleted(RawEntry),
    /// The single volume-label entry permitted per filesystem; never
    /// preceded by an LFN chain.
    VolumeLabel(ShortEntry),
    /// A file or subdirectory anchor, optionally preceded by a long-name
    /// chain.
    Live { short: ShortEntry, lfn: Option<LfnChain> },
}

impl LogicalEntry {
    fn raw_slot_count(&self) -> usize {
        match self {
            LogicalEntry::Deleted(_) => 1,
            LogicalEntry::VolumeLabel(_) => 1,
            LogicalEntry::Live { lfn, .. } => 1 + lfn.as_ref().map_or(0, LfnChain::len),
        }
    }

    fn short_entry(&self) -> Option<&ShortEntry> {
        match self {
            LogicalEntry::Live { short, .. } => Some(short),
            LogicalEntry::VolumeLabel(short) => Some(short),
            LogicalEntry::Deleted(_) => None,
        }
    }
}

/// A reference to a live (non-deleted) entry within a [`DirectoryTable`],
/// identified by its position. Stable only until the next structural
/// mutation (`insert`/`remove`/`rename`) of the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRef(usize);

/// An in-memory directory: an ordered sequence of logical entries backing
/// one on-disk directory, plus a directory-level dirty flag.
#[derive(Debug)]
pub struct DirectoryTable {
    entries: Vec<LogicalEntry>,
    kind: DirectoryKind,
    is_fat32: bool,
    dirty: bool,
}

impl DirectoryTable {
    /// An empty table of the given kind.
    pub fn new(kind: DirectoryKind, is_fat32: bool) -> Self {
        Self { entries: Vec::new(), kind, is_fat32, dirty: false }
    }

    /// Parse a byte buffer (a multiple of 32 bytes) into a directory table.
    /// Scanning stops at the first free-terminal record; non-zero bytes
    /// after it are reported as [`Warn::TrailingGarbage`] and otherwise
    /// ignored, never interpreted.
    ///
    /// Fails with [`Error::Corrupt`] if `bytes` isn't a whole number of
    /// 32-byte records — a structural violation with no 32-byte boundary
    /// left to recover at.
    pub fn parse(bytes: &[u8], kind: DirectoryKind, is_fat32: bool) -> Result<Self, Error> {
        if bytes.len() % 32 != 0 {
            return Err(Error::Corrupt("directory buffer length is not a multiple of 32 bytes"));
        }

        let mut entries = Vec::new();
        let mut assembler = LfnAssembler::default();
        let mut terminated = false;

        for chunk in bytes.chunks_exact(32) {
            let raw = RawEntry::load(chunk.try_into().unwrap());
            if terminated {
                if raw != RawEntry::ZERO {
                    Warn::TrailingGarbage.report();
                }
                continue;
            }

            match raw.classify() {
                EntryClass::Free => {
                    assembler.break_on_deleted();
                    terminated = true;
                }
                EntryClass::Deleted => {
                    assembler.break_on_deleted();
                    entries.push(LogicalEntry::Deleted(raw));
                }
                EntryClass::Lfn => {
                    assembler.feed(&raw);
                }
                EntryClass::Short => {
                    let short = ShortEntry::from_raw(raw);
                    let attrs = short.attributes();
                    let long_name = assembler.finish(&short.short_name_bytes());
                    if attrs.contains(FileAttributes::VOLUME_LABEL)
                        && !attrs.contains(FileAttributes::DIRECTORY)
                    {
                        entries.push(LogicalEntry::VolumeLabel(short));
                    } else {
                        let lfn = long_name
                            .and_then(|name| LfnChain::build(&name, &short.short_name_bytes()).ok());
                        entries.push(LogicalEntry::Live { short, lfn });
                    }
                }
            }
        }

        Ok(Self { entries, kind, is_fat32, dirty: false })
    }

    /// Write every entry back out in order, zero-filling the remainder of
    /// `out` and clearing the dirty bit.
    ///
    /// Fails with [`Error::Corrupt`] if `out` isn't a whole number of
    /// 32-byte records, or is too short to hold every entry currently in
    /// the table; the table is left unchanged.
    pub fn serialize(&mut self, out: &mut [u8]) -> Result<(), Error> {
        if out.len() % 32 != 0 {
            return Err(Error::Corrupt("output buffer length is not a multiple of 32 bytes"));
        }
        if out.len() < self.used_slots() * 32 {
            return Err(Error::Corrupt("output buffer is too short to hold this directory"));
        }
        let mut pos = 0;
        for entry in &mut self.entries {
            match entry {
                LogicalEntry::Deleted(raw) => {
                    out[pos..pos + 32].copy_from_slice(raw.bytes());
                    pos += 32;
                }
                LogicalEntry::VolumeLabel(short) => {
                    out[pos..pos + 32].copy_from_slice(short.raw().bytes());
                    short.clear_dirty();
                    pos += 32;
                }
                LogicalEntry::Live { short, lfn } => {
                    if let Some(chain) = lfn {
                        for slot in chain.slots() {
                            out[pos..pos + 32].copy_from_slice(slot.bytes());
                            pos += 32;
                        }
                    }
                    out[pos..pos + 32].copy_from_slice(short.raw().bytes());
                    short.clear_dirty();
                    pos += 32;
                }
            }
        }
        out[pos..].fill(0);
        self.dirty = false;
        Ok(())
    }

    /// Total 32-byte slots currently occupied (live and deleted).
    fn used_slots(&self) -> usize {
        self.entries.iter().map(LogicalEntry::raw_slot_count).sum()
    }

    fn capacity_slots(&self) -> Option<usize> {
        match self.kind {
            DirectoryKind::FixedRoot { slot_count } => Some(slot_count),
            DirectoryKind::Growable => None,
        }
    }

    /// Uppercased short names already live in this table (the used-name
    /// snapshot for the short-name generator).
    fn used_short_names(&self) -> Vec<[u8; 11]> {
        self.entries
            .iter()
            .filter_map(LogicalEntry::short_entry)
            .map(ShortEntry::short_name_bytes)
            .collect()
    }

    /// Place `entry`, which occupies `needed` contiguous slots, preferring
    /// trailing free space (appending past the table's current slots, up to
    /// capacity), then a deleted run of sufficient length, else
    /// [`Error::DirectoryFull`] on a directory that cannot grow (spec
    /// §4.E). Reusing a deleted run is a last resort, not a first choice:
    /// spec §4.E keeps deleted entries in place precisely so a caller can
    /// still undelete them, which reusing eagerly would defeat.
    fn allocate_slots(&mut self, needed: usize, entry: LogicalEntry) -> Result<usize, Error> {
        let fits_at_tail = match self.capacity_slots() {
            Some(capacity) => self.used_slots() + needed <= capacity,
            None => true,
        };
        if fits_at_tail {
            self.entries.push(entry);
            return Ok(self.entries.len() - 1);
        }
        if let Some(run_start) = self.find_deleted_run(needed) {
            self.entries.splice(run_start..run_start + needed, [entry]);
            return Ok(run_start);
        }
        Err(Error::DirectoryFull)
    }

    /// Find the first contiguous run of `needed` [`LogicalEntry::Deleted`]
    /// slots, if any.
    fn find_deleted_run(&self, needed: usize) -> Option<usize> {
        if needed == 0 {
            return None;
        }
        let mut run_start = None;
        let mut run_len = 0;
        for (i, entry) in self.entries.iter().enumerate() {
            if matches!(entry, LogicalEntry::Deleted(_)) {
                if run_len == 0 {
                    run_start = Some(i);
                }
                run_len += 1;
                if run_len == needed {
                    return run_start;
                }
            } else {
                run_len = 0;
            }
        }
        None
    }

    /// Insert a new file or subdirectory anchor named `long_name` with the
    /// given initial attributes, generating a unique short name and, if
    /// needed, a preceding LFN chain.
    ///
    /// Allocates `k + 1` contiguous slots, preferring trailing free space,
    /// then a deleted run of sufficient length, else failing with
    /// [`Error::DirectoryFull`] on a non-growable directory.
    pub fn insert(&mut self, long_name: &str, attrs: FileAttributes) -> Result<EntryRef, Error> {
        let used = self.used_short_names();
        let is_used = |candidate: &str| {
            let bytes = short_name::to_short_name_bytes(candidate);
            used.iter().any(|u| *u == bytes)
        };
        let generated = short_name::generate(long_name, is_used)?;
        let short_name_bytes = short_name::to_short_name_bytes(&generated);

        let needs_lfn = long_name != generated;
        let lfn = if needs_lfn {
            Some(LfnChain::build(long_name, &short_name_bytes)?)
        } else {
            None
        };
        let needed_slots = 1 + lfn.as_ref().map_or(0, LfnChain::len);

        let mut short = ShortEntry::from_raw(RawEntry::ZERO);
        short.set_short_name_bytes(short_name_bytes);
        let mut raw = *short.raw();
        raw.write_flag_byte(attrs.bits());
        let short = ShortEntry::from_raw(raw);

        let entry = LogicalEntry::Live { short, lfn };
        let index = self.allocate_slots(needed_slots, entry)?;

        self.mark_dirty();
        Ok(EntryRef(index))
    }

    /// Create the volume-label entry for this table (I3: at most one per
    /// filesystem, and only meaningful in the root table). Unlike
    /// [`Self::insert`], the label is written directly into the 11-byte
    /// name field — a volume label is an 11-character string, not a
    /// base+extension pair, so it bypasses the short-name generator and
    /// never gets an LFN chain.
    pub fn set_volume_label(&mut self, label: &str) -> Result<EntryRef, Error> {
        let mut bytes = [b' '; 11];
        let mut len = 0;
        for ch in label.chars() {
            if len == 11 {
                break;
            }
            bytes[len] = ch.to_ascii_uppercase() as u8;
            len += 1;
        }

        let mut raw = RawEntry::ZERO;
        raw.bytes_mut()[0..11].copy_from_slice(&bytes);
        raw.write_flag_byte(FileAttributes::VOLUME_LABEL.bits());
        let entry = LogicalEntry::VolumeLabel(ShortEntry::from_raw(raw));
        let index = self.allocate_slots(1, entry)?;

        self.mark_dirty();
        Ok(EntryRef(index))
    }

    /// Mark the anchor and every LFN slot of `entry` deleted. The entries
    /// stay in place so flush preserves slot positions.
    pub fn remove(&mut self, entry: EntryRef) {
        let index = entry.0;
        let mut replacement = Vec::new();
        match &self.entries[index] {
            LogicalEntry::Live { short, lfn } => {
                if let Some(chain) = lfn {
                    for slot in chain.slots() {
                        let mut raw = *slot;
                        raw.bytes_mut()[0] = NAME_DELETED;
                        replacement.push(LogicalEntry::Deleted(raw));
                    }
                }
                let mut raw = *short.raw();
                raw.bytes_mut()[0] = NAME_DELETED;
                replacement.push(LogicalEntry::Deleted(raw));
            }
            LogicalEntry::VolumeLabel(short) => {
                let mut raw = *short.raw();
                raw.bytes_mut()[0] = NAME_DELETED;
                replacement.push(LogicalEntry::Deleted(raw));
            }
            LogicalEntry::Deleted(_) => return,
        }
        self.entries.splice(index..index + 1, replacement);
        self.mark_dirty();
    }

    /// Remove `entry` and insert `new_long_name` in its place, preserving
    /// the anchor's start cluster, length, and timestamps.
    pub fn rename(&mut self, entry: EntryRef, new_long_name: &str) -> Result<EntryRef, Error> {
        let (attrs, cluster, size, created, accessed, modified) = {
            let short = self.entries[entry.0]
                .short_entry()
                .expect("rename target must be a live entry");
            (
                short.attributes(),
                short.start_cluster(),
                short.size(),
                (short.creation_time(), short.creation_date()),
                short.last_access_date(),
                (short.modified_time(), short.modified_date()),
            )
        };

        self.remove(entry);
        let new_ref = self.insert(new_long_name, attrs)?;
        let mut handle = self.short_entry_mut(new_ref);
        handle.set_start_cluster(cluster).expect("cluster was already valid before rename");
        handle.set_size(size);
        handle.set_creation(created.0, created.1);
        handle.set_last_access_date(accessed);
        handle.set_modified(modified.0, modified.1);
        Ok(new_ref)
    }

    /// Set the table's own dirty bit. There is no registered flush
    /// listener in this crate — that's the enclosing filesystem's
    /// responsibility; callers poll [`Self::is_dirty`] instead.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// A mutation handle for the entry at `entry_ref`. Any setter called
    /// through the handle flips the entry's own dirty bit and marks this
    /// table dirty.
    pub fn short_entry_mut(&mut self, entry_ref: EntryRef) -> ShortEntryHandle<'_> {
        ShortEntryHandle { table: self, index: entry_ref.0 }
    }

    pub fn short_entry(&self, entry_ref: EntryRef) -> &ShortEntry {
        self.entries[entry_ref.0].short_entry().expect("entry_ref must name a live entry")
    }

    /// The long name attached to `entry_ref`, if it has an LFN chain.
    pub fn long_name(&self, entry_ref: EntryRef) -> Option<&str> {
        match &self.entries[entry_ref.0] {
            LogicalEntry::Live { lfn: Some(chain), .. } => Some(chain.name()),
            _ => None,
        }
    }

    /// Iterate over every live (non-deleted) entry, in on-disk order.
    pub fn iter_live(&self) -> impl Iterator<Item = EntryRef> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, e)| match e {
            LogicalEntry::Deleted(_) => None,
            _ => Some(EntryRef(i)),
        })
    }
}

/// A non-owning mutation handle for one live entry in a [`DirectoryTable`].
/// It holds an index into the table plus a borrow of the table, used only
/// to invoke `mark_dirty`, avoiding a cyclic owning back-reference.
pub struct ShortEntryHandle<'a> {
    table: &'a mut DirectoryTable,
    index: usize,
}

impl<'a> ShortEntryHandle<'a> {
    fn short_mut(&mut self) -> &mut ShortEntry {
        match &mut self.table.entries[self.index] {
            LogicalEntry::Live { short, .. } => short,
            LogicalEntry::VolumeLabel(short) => short,
            LogicalEntry::Deleted(_) => unreachable!("handle never names a deleted slot"),
        }
    }

    pub fn set_readonly(&mut self, value: bool) {
        self.short_mut().set_readonly(value);
        self.table.mark_dirty();
    }

    pub fn set_hidden(&mut self, value: bool) {
        self.short_mut().set_hidden(value);
        self.table.mark_dirty();
    }

    pub fn set_system(&mut self, value: bool) {
        self.short_mut().set_system(value);
        self.table.mark_dirty();
    }

    pub fn set_archive(&mut self, value: bool) {
        self.short_mut().set_archive(value);
        self.table.mark_dirty();
    }

    pub fn set_start_cluster(&mut self, cluster: u32) -> Result<(), Error> {
        let is_fat32 = self.table.is_fat32;
        let result = self.short_mut().set_start_cluster(cluster, is_fat32);
        if result.is_ok() {
            self.table.mark_dirty();
        }
        result
    }

    pub fn set_size(&mut self, size: u32) {
        self.short_mut().set_size(size);
        self.table.mark_dirty();
    }

    pub fn set_creation(&mut self, time: FatTime, date: FatDate) {
        self.short_mut().set_creation(time, date);
        self.table.mark_dirty();
    }

    pub fn set_last_access_date(&mut self, date: FatDate) {
        self.short_mut().set_last_access_date(date);
        self.table.mark_dirty();
    }

    pub fn set_modified(&mut self, time: FatTime, date: FatDate) {
        self.short_mut().set_modified(time, date);
        self.table.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> DirectoryTable {
        DirectoryTable::new(DirectoryKind::Growable, true)
    }

    #[test]
    fn parse_rejects_buffer_not_a_multiple_of_32() {
        let buf = [0u8; 40];
        let err = DirectoryTable::parse(&buf, DirectoryKind::Growable, true).unwrap_err();
        assert!(matches!(err, Error::Corrupt(_)));
    }

    #[test]
    fn serialize_rejects_buffer_too_short_for_the_table() {
        let mut dir = table();
        dir.insert("README.TXT", FileAttributes::ARCHIVE).unwrap();
        let mut buf = [0u8; 16];
        let err = dir.serialize(&mut buf).unwrap_err();
        assert!(matches!(err, Error::Corrupt(_)));
    }

    #[test]
    fn insert_and_parse_round_trip_plain_short_name() {
        let mut dir = table();
        let entry = dir.insert("README.TXT", FileAttributes::ARCHIVE).unwrap();
        assert!(dir.long_name(entry).is_none());
        assert_eq!(dir.short_entry(entry).name(), "README.TXT");

        let mut buf = vec![0u8; 32];
        dir.serialize(&mut buf).unwrap();
        assert!(!dir.is_dirty());

        let reparsed = DirectoryTable::parse(&buf, DirectoryKind::Growable, true).unwrap();
        let reentry = reparsed.iter_live().next().unwrap();
        assert_eq!(reparsed.short_entry(reentry).name(), "README.TXT");
        // P1: parse(serialize(E)) == E bytewise.
        assert_eq!(dir.short_entry(entry).raw(), reparsed.short_entry(reentry).raw());
    }

    // Two LFN slots for "readme.txt" followed by short entry "README  TXT"
    // assemble into one logical entry.
    #[test]
    fn insert_with_lfn_round_trips_through_parse() {
        let mut dir = table();
        let entry = dir.insert("readme.txt", FileAttributes::ARCHIVE).unwrap();
        assert_eq!(dir.long_name(entry), Some("readme.txt"));
        assert_eq!(dir.short_entry(entry).name(), "README.TXT");

        let slots = dir.used_slots();
        let mut buf = vec![0u8; slots * 32];
        dir.serialize(&mut buf).unwrap();

        let reparsed = DirectoryTable::parse(&buf, DirectoryKind::Growable, true).unwrap();
        let reentry = reparsed.iter_live().next().unwrap();
        assert_eq!(reparsed.long_name(reentry), Some("readme.txt"));
        assert_eq!(reparsed.short_entry(reentry).name(), "README.TXT");
    }

    // A live entry followed by two deleted entries and no terminator slot;
    // flush preserves all three, and a subsequent parse yields the same
    // sequence, terminating after them.
    #[test]
    fn deleted_entries_preserve_slot_position_across_flush() {
        let mut dir = table();
        let a = dir.insert("A.TXT", FileAttributes::ARCHIVE).unwrap();
        let b = dir.insert("B.TXT", FileAttributes::ARCHIVE).unwrap();
        let c = dir.insert("C.TXT", FileAttributes::ARCHIVE).unwrap();
        dir.remove(b);
        dir.remove(c);
        let _ = a;

        let mut buf = vec![0u8; 3 * 32];
        dir.serialize(&mut buf).unwrap();

        let reparsed = DirectoryTable::parse(&buf, DirectoryKind::Growable, true).unwrap();
        assert_eq!(reparsed.entries.len(), 3);
        assert!(matches!(reparsed.entries[0], LogicalEntry::Live { .. }));
        assert!(matches!(reparsed.entries[1], LogicalEntry::Deleted(_)));
        assert!(matches!(reparsed.entries[2], LogicalEntry::Deleted(_)));
    }

    // A directory with trailing capacity appends a new entry there rather
    // than reusing a deleted slot, since spec §4.E orders trailing free
    // space ahead of deleted-run reuse.
    #[test]
    fn insert_prefers_trailing_space_over_a_deleted_run() {
        let mut dir = table();
        let a = dir.insert("A.TXT", FileAttributes::ARCHIVE).unwrap();
        dir.remove(a);
        let b = dir.insert("B.TXT", FileAttributes::ARCHIVE).unwrap();
        assert_eq!(dir.entries.len(), 2);
        assert!(matches!(dir.entries[0], LogicalEntry::Deleted(_)));
        assert_eq!(dir.short_entry(b).name(), "B.TXT");
    }

    // Once the directory genuinely has no trailing room, a deleted run is
    // reused rather than failing.
    #[test]
    fn remove_reuses_slot_once_directory_is_full() {
        let mut dir = DirectoryTable::new(DirectoryKind::FixedRoot { slot_count: 1 }, false);
        let a = dir.insert("A.TXT", FileAttributes::ARCHIVE).unwrap();
        dir.remove(a);
        let b = dir.insert("B.TXT", FileAttributes::ARCHIVE).unwrap();
        assert_eq!(dir.entries.len(), 1);
        assert_eq!(dir.short_entry(b).name(), "B.TXT");
    }

    #[test]
    fn fixed_root_rejects_insert_once_full() {
        let mut dir = DirectoryTable::new(DirectoryKind::FixedRoot { slot_count: 1 }, false);
        dir.insert("A.TXT", FileAttributes::ARCHIVE).unwrap();
        let err = dir.insert("B.TXT", FileAttributes::ARCHIVE).unwrap_err();
        assert_eq!(err, Error::DirectoryFull);
    }

    // Rename preserves start cluster, length, and created time.
    #[test]
    fn rename_preserves_metadata() {
        let mut dir = table();
        let entry = dir.insert("OldName.txt", FileAttributes::ARCHIVE).unwrap();
        {
            let mut handle = dir.short_entry_mut(entry);
            handle.set_start_cluster(1234).unwrap();
            handle.set_size(42);
            handle
                .set_creation(FatTime::pack(10, 0, 0).unwrap(), FatDate::pack(2020, 1, 1).unwrap());
        }

        let renamed = dir.rename(entry, "NewName.txt").unwrap();
        let short = dir.short_entry(renamed);
        assert_eq!(short.start_cluster(), 1234);
        assert_eq!(short.size(), 42);
        assert_eq!(short.creation_date().year(), 2020);
    }

    // A volume label is written straight into the 11-byte name field, with
    // no short-name generation and no LFN chain.
    #[test]
    fn volume_label_round_trips_without_lfn() {
        let mut dir = table();
        let label = dir.set_volume_label("MY DISK").unwrap();
        assert_eq!(dir.long_name(label), None);
        let short = dir.short_entry(label);
        assert!(!short.is_file());
        assert!(!short.is_directory());
        assert_eq!(short.attributes(), FileAttributes::VOLUME_LABEL);

        let mut buf = vec![0u8; 32];
        dir.serialize(&mut buf).unwrap();
        let reparsed = DirectoryTable::parse(&buf, DirectoryKind::Growable, true).unwrap();
        let reentry = reparsed.iter_live().next().unwrap();
        assert_eq!(reparsed.short_entry(reentry).attributes(), FileAttributes::VOLUME_LABEL);
    }

    // An LFN slot corrupted mid-chain causes no live anchor entry to
    // disappear.
    #[test]
    fn broken_lfn_chain_keeps_anchor_without_long_name() {
        let short_bytes = short_name::to_short_name_bytes("README.TXT");
        let chain = LfnChain::build("a-longer-readme-name.txt", &short_bytes).unwrap();
        assert!(chain.len() >= 2);

        let mut buf = Vec::new();
        // Only emit the first (last-in-chain) slot, then the anchor
        // directly, breaking the sequence.
        buf.extend_from_slice(chain.slots()[0].bytes());
        let mut short = ShortEntry::from_raw(RawEntry::ZERO);
        short.set_short_name_bytes(short_bytes);
        buf.extend_from_slice(short.raw().bytes());
        buf.resize(buf.len() + 32, 0);

        let dir = DirectoryTable::parse(&buf, DirectoryKind::Growable, true).unwrap();
        let entry = dir.iter_live().next().unwrap();
        assert_eq!(dir.short_entry(entry).name(), "README.TXT");
        assert!(dir.long_name(entry).is_none());
    }
}
