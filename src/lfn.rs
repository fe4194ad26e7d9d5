//! Long filename (LFN) slot records and chains.
//!
//! A logical long name is split across a run of synthetic 32-byte records
//! immediately preceding the short-name "anchor" entry that terminates the
//! chain. Each slot carries a checksum of the anchor's 11-byte short name,
//! tying the two together.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, Warn};
use crate::raw::{FileAttributes, RawEntry};

/// UCS-2 characters packed into a single LFN slot.
pub const LFN_PART_LEN: usize = 13;
/// Bit set in the sequence byte of the first-stored (last-in-chain) slot.
pub const LAST_LONG_ENTRY_FLAG: u8 = 0x40;
/// A long name can span at most this many slots.
pub const MAX_LFN_SLOTS: usize = 20;

/// Compute the short-name checksum tying an LFN chain to its anchor:
/// `sum = rotate_right_1(sum) + S[i]`, 8-bit wrapping, over the 11-byte
/// space-padded short name.
pub fn checksum(short_name: &[u8; 11]) -> u8 {
    let mut sum: u8 = 0;
    for &byte in short_name {
        sum = ((sum >> 1) | ((sum & 1) << 7)).wrapping_add(byte);
    }
    sum
}

/// Encode a long name as UCS-2 code units, failing if any code point falls
/// outside the basic multilingual plane.
fn encode_ucs2(long_name: &str) -> Result<Vec<u16>, Error> {
    let mut units = Vec::with_capacity(long_name.len());
    for ch in long_name.chars() {
        let cp = ch as u32;
        if cp > 0xffff {
            return Err(Error::UnsupportedName);
        }
        units.push(cp as u16);
    }
    Ok(units)
}

/// Split UCS-2 units into `13`-char slots: append a single `0x0000`
/// terminator if the length isn't a multiple of 13, then pad the final
/// slot with `0xFFFF`. Returns the slots in *name* order (slot 1 first).
pub fn split_into_slots(units: &[u16]) -> Vec<[u16; LFN_PART_LEN]> {
    let mut padded = units.to_vec();
    if padded.len() % LFN_PART_LEN != 0 {
        padded.push(0x0000);
    }
    while padded.len() % LFN_PART_LEN != 0 {
        padded.push(0xffff);
    }
    padded
        .chunks_exact(LFN_PART_LEN)
        .map(|chunk| chunk.try_into().unwrap())
        .collect()
}

fn encode_slot(ordinal: u8, last: bool, checksum: u8, chars: &[u16; LFN_PART_LEN]) -> RawEntry {
    let mut raw = RawEntry::ZERO;
    let bytes = raw.bytes_mut();
    bytes[0] = if last { ordinal | LAST_LONG_ENTRY_FLAG } else { ordinal };
    for i in 0..5 {
        bytes[1 + i * 2..3 + i * 2].copy_from_slice(&chars[i].to_le_bytes());
    }
    bytes[0x0b] = FileAttributes::LFN_MARKER.bits();
    bytes[0x0c] = 0;
    bytes[0x0d] = checksum;
    for i in 0..6 {
        bytes[0x0e + i * 2..0x10 + i * 2].copy_from_slice(&chars[5 + i].to_le_bytes());
    }
    bytes[0x1a..0x1c].copy_from_slice(&0u16.to_le_bytes());
    for i in 0..2 {
        bytes[0x1c + i * 2..0x1e + i * 2].copy_from_slice(&chars[11 + i].to_le_bytes());
    }
    raw
}

struct DecodedSlot {
    ordinal: u8,
    last: bool,
    checksum: u8,
    chars: [u16; LFN_PART_LEN],
}

fn decode_slot(raw: &RawEntry) -> DecodedSlot {
    let bytes = raw.bytes();
    let seq = bytes[0];
    let mut chars = [0u16; LFN_PART_LEN];
    for i in 0..5 {
        chars[i] = u16::from_le_bytes(bytes[1 + i * 2..3 + i * 2].try_into().unwrap());
    }
    for i in 0..6 {
        chars[5 + i] = u16::from_le_bytes(bytes[0x0e + i * 2..0x10 + i * 2].try_into().unwrap());
    }
    for i in 0..2 {
        chars[11 + i] = u16::from_le_bytes(bytes[0x1c + i * 2..0x1e + i * 2].try_into().unwrap());
    }
    DecodedSlot {
        ordinal: seq & 0x1f,
        last: seq & LAST_LONG_ENTRY_FLAG != 0,
        checksum: bytes[0x0d],
        chars,
    }
}

/// A disassembled or reassembled long-filename chain: the on-disk records
/// (in disk order, i.e. last-in-chain first) plus the logical name they
/// encode.
#[derive(Debug, Clone)]
pub struct LfnChain {
    /// Disk order: sequence `k|0x40`, `k-1`, ..., `1`.
    slots: Vec<RawEntry>,
    name: String,
}

impl LfnChain {
    /// Build the slot run for `long_name`, checksummed against `short_name`.
    /// Does not include the anchor record itself.
    pub fn build(long_name: &str, short_name: &[u8; 11]) -> Result<Self, Error> {
        let units = encode_ucs2(long_name)?;
        let name_slots = split_into_slots(&units);
        let k = name_slots.len();
        if k > MAX_LFN_SLOTS {
            return Err(Error::UnsupportedName);
        }
        let sum = checksum(short_name);

        let mut slots = Vec::with_capacity(k);
        for (i, chars) in name_slots.iter().enumerate().rev() {
            let ordinal = (i + 1) as u8;
            let last = i == k - 1;
            slots.push(encode_slot(ordinal, last, sum, chars));
        }
        Ok(Self { slots, name: long_name.into() })
    }

    /// The on-disk records in disk order (emit before the anchor).
    pub fn slots(&self) -> &[RawEntry] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Incrementally assembles an [`LfnChain`] while scanning raw records in
/// disk order. Used internally by
/// [`crate::directory_table::DirectoryTable::parse`].
#[derive(Debug, Default)]
pub(crate) struct LfnAssembler {
    // Buffered slots, in the order encountered (disk order: last-in-chain
    // first), each paired with its decoded characters.
    buffered: Vec<(u8, [u16; LFN_PART_LEN])>,
    expected_checksum: Option<u8>,
    k: usize,
}

pub(crate) enum Feed {
    /// Kept buffering; chain still in progress.
    Buffering,
    /// Sequencing broke; the chain (if any) was discarded.
    Broken,
}

impl LfnAssembler {
    pub(crate) fn is_empty(&self) -> bool {
        self.buffered.is_empty()
    }

    pub(crate) fn reset(&mut self) {
        self.buffered.clear();
        self.expected_checksum = None;
        self.k = 0;
    }

    /// Feed one record already known to classify as
    /// [`crate::raw::EntryClass::Lfn`].
    pub(crate) fn feed(&mut self, raw: &RawEntry) -> Feed {
        let slot = decode_slot(raw);
        if self.buffered.is_empty() {
            if !slot.last || slot.ordinal == 0 || slot.ordinal as usize > MAX_LFN_SLOTS {
                Warn::LfnBroken.report();
                self.reset();
                return Feed::Broken;
            }
            self.k = slot.ordinal as usize;
            self.expected_checksum = Some(slot.checksum);
            self.buffered.push((slot.ordinal, slot.chars));
            Feed::Buffering
        } else {
            let expected_ordinal = self.k - self.buffered.len();
            if slot.last
                || slot.ordinal as usize != expected_ordinal
                || Some(slot.checksum) != self.expected_checksum
            {
                Warn::LfnBroken.report();
                self.reset();
                return Feed::Broken;
            }
            self.buffered.push((slot.ordinal, slot.chars));
            Feed::Buffering
        }
    }

    /// A deleted slot breaks an in-progress chain.
    pub(crate) fn break_on_deleted(&mut self) {
        if !self.buffered.is_empty() {
            Warn::LfnBroken.report();
            self.reset();
        }
    }

    /// Called when a non-LFN record follows; verify against the anchor's
    /// short name and, on success, return the recovered long name.
    pub(crate) fn finish(&mut self, anchor_short_name: &[u8; 11]) -> Option<String> {
        if self.buffered.is_empty() {
            return None;
        }
        let expected = checksum(anchor_short_name);
        let complete = self.buffered.len() == self.k && self.expected_checksum == Some(expected);
        let result = if complete {
            let mut units = Vec::with_capacity(self.k * LFN_PART_LEN);
            for (_, chars) in self.buffered.iter().rev() {
                units.extend_from_slice(chars);
            }
            let cut = units.iter().position(|&u| u == 0x0000).unwrap_or(units.len());
            let name: String = char::decode_utf16(units[..cut].iter().copied())
                .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect();
            Some(name)
        } else {
            Warn::LfnBroken.report();
            None
        };
        self.reset();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawEntry;

    fn short_name_bytes(s: &str) -> [u8; 11] {
        let mut bytes = [b' '; 11];
        bytes[..s.len()].copy_from_slice(s.as_bytes());
        bytes
    }

    #[test]
    fn checksum_is_deterministic_rotate_and_add() {
        let s1 = short_name_bytes("MYRSUM~1DOC");
        let s2 = short_name_bytes("MYRSUM~1DOC");
        assert_eq!(checksum(&s1), checksum(&s2));
    }

    #[test]
    fn build_and_assemble_round_trip_readme_txt() {
        let short = short_name_bytes("README  TXT");
        let chain = LfnChain::build("readme.txt", &short).unwrap();
        // "readme.txt" is 10 chars -> one slot, sequence (1|0x40).
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.slots()[0].bytes()[0], 1 | LAST_LONG_ENTRY_FLAG);

        let mut assembler = LfnAssembler::default();
        for slot in chain.slots() {
            assembler.feed(slot);
        }
        let name = assembler.finish(&short).unwrap();
        assert_eq!(name, "readme.txt");
    }

    // A name whose UCS-2 encoding requires 14 chars splits into 2 slots;
    // the second slot holds char 14 + terminator + 11x 0xFFFF padding.
    #[test]
    fn fourteen_char_name_splits_into_two_slots_with_padding() {
        let long_name = "aaaaaaaaaaaaaa"; // 14 chars
        let short = short_name_bytes("AAAAAAAA~1 ");
        let chain = LfnChain::build(long_name, &short).unwrap();
        assert_eq!(chain.len(), 2);
        // Disk order: first stored is the last-in-chain slot (ordinal 2).
        assert_eq!(chain.slots()[0].bytes()[0], 2 | LAST_LONG_ENTRY_FLAG);
        assert_eq!(chain.slots()[1].bytes()[0], 1);

        let decoded = decode_slot(&chain.slots()[0]);
        assert_eq!(decoded.chars[0], 'a' as u16);
        assert_eq!(decoded.chars[1], 0x0000);
        for &c in &decoded.chars[2..] {
            assert_eq!(c, 0xffff);
        }
    }

    #[test]
    fn unsupported_code_point_is_rejected() {
        // U+1F600 is outside the BMP.
        let name = "\u{1F600}";
        let short = short_name_bytes("FILE    TXT");
        assert_eq!(LfnChain::build(name, &short), Err(Error::UnsupportedName));
    }

    #[test]
    fn broken_chain_reports_warn_and_keeps_anchor_short_name_only() {
        let short = short_name_bytes("README  TXT");
        let chain = LfnChain::build("readme-long-name.txt", &short).unwrap();
        let mut assembler = LfnAssembler::default();
        // Feed only the first slot, then simulate a deletion breaking the chain.
        assembler.feed(&chain.slots()[0]);
        assembler.break_on_deleted();
        assert!(assembler.is_empty());
    }

    #[test]
    fn deleted_slot_mid_chain_discards_buffer() {
        let short = short_name_bytes("LONGNA~1TXT");
        let chain = LfnChain::build("longnamewithmorethanonechunk.txt", &short).unwrap();
        assert!(chain.len() >= 2);
        let mut assembler = LfnAssembler::default();
        assembler.feed(&chain.slots()[0]);
        assembler.break_on_deleted();
        // After the break, feeding the remaining slots out of sequence is
        // treated as a fresh (broken) chain start, not resumed.
        let feed = assembler.feed(&chain.slots()[1]);
        assert!(matches!(feed, Feed::Broken) || assembler.is_empty());
    }
}
