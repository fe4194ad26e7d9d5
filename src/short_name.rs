//! Generating a unique, rule-legal 8.3 short name from an arbitrary long
//! name.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::Error;

/// Symbols, beyond `A-Z 0-9`, legal in an 8.3 name.
const LEGAL_SYMBOLS: &[u8] = b"_^$~!#%&-{}()@'`";
/// Characters removed rather than replaced.
const SKIP_CHARS: &[u8] = b". ";

const MAX_BASE_LEN: usize = 8;
const MAX_EXT_LEN: usize = 3;
/// Exclusive upper bound of the numeric-tail loop, giving 99998 candidates
/// before [`Error::ShortNameExhausted`].
const NUMERIC_TAIL_BOUND: u32 = 99_999;

fn is_legal(byte: u8) -> bool {
    byte.is_ascii_uppercase() || byte.is_ascii_digit() || LEGAL_SYMBOLS.contains(&byte)
}

fn is_skip(byte: u8) -> bool {
    SKIP_CHARS.contains(&byte)
}

/// `tidy()`: uppercase, strip skip characters, map illegal characters to `_`.
fn tidy(input: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    for ch in input.chars() {
        let upper = ch.to_ascii_uppercase();
        if !upper.is_ascii() {
            out.push(b'_');
            continue;
        }
        let byte = upper as u8;
        if is_skip(byte) {
            continue;
        }
        if is_legal(byte) {
            out.push(byte);
        } else {
            out.push(b'_');
        }
    }
    out
}

/// Split `long_name` at its *last* `.`. A name starting with `.` has an
/// empty base and the extension taken from after the dot.
fn split_base_ext(long_name: &str) -> (&str, &str) {
    match long_name.rfind('.') {
        Some(pos) => (&long_name[..pos], &long_name[pos + 1..]),
        None => (long_name, ""),
    }
}

/// True iff every character of `s` is already legal and no skip character
/// appears — i.e. `tidy()` would be a no-op after uppercasing.
fn is_clean(s: &str) -> bool {
    s.chars().all(|ch| {
        if !ch.is_ascii() {
            return false;
        }
        let upper = ch.to_ascii_uppercase() as u8;
        is_legal(upper)
    })
}

fn candidate_string(base: &[u8], ext: &[u8]) -> String {
    let base = core::str::from_utf8(base).expect("tidy() only emits ASCII");
    if ext.is_empty() {
        String::from(base)
    } else {
        let ext = core::str::from_utf8(ext).expect("tidy() only emits ASCII");
        format!("{base}.{ext}")
    }
}

fn is_taken(candidate: &str, used: &dyn Fn(&str) -> bool) -> bool {
    used(candidate)
}

/// Generate a unique, rule-legal 8.3 short name for `long_name`.
///
/// `is_used` is queried with a candidate already uppercased; it should
/// answer as if checking (case-insensitively) against the directory's
/// current set of live short names. The snapshot must not be mutated
/// mid-generation: this function never calls `is_used` with the same
/// candidate twice after deciding it's free, and never mutates any state
/// of its own.
pub fn generate(long_name: &str, is_used: impl Fn(&str) -> bool) -> Result<String, Error> {
    let (name_part, ext_part) = split_base_ext(long_name);
    let force_suffix = !is_clean(name_part);

    let base = tidy(name_part);
    let mut ext = tidy(ext_part);
    ext.truncate(MAX_EXT_LEN);

    if !force_suffix && base.len() <= MAX_BASE_LEN {
        let candidate = candidate_string(&base, &ext);
        if !is_taken(&candidate, &is_used) {
            return Ok(candidate);
        }
    }

    for i in 1..NUMERIC_TAIL_BOUND {
        let tail = format!("~{i}");
        let prefix_len = base.len().min(MAX_BASE_LEN.saturating_sub(tail.len()));
        let mut candidate_base = Vec::with_capacity(prefix_len + tail.len());
        candidate_base.extend_from_slice(&base[..prefix_len]);
        candidate_base.extend_from_slice(tail.as_bytes());
        let candidate = candidate_string(&candidate_base, &ext);
        if !is_taken(&candidate, &is_used) {
            return Ok(candidate);
        }
    }

    Err(Error::ShortNameExhausted)
}

/// Convert a generated `"BASE.EXT"` (or extensionless `"BASE"`) short name
/// into the 11-byte space-padded on-disk form used by [`crate::short_entry`]
/// and the LFN checksum.
pub fn to_short_name_bytes(short_name: &str) -> [u8; 11] {
    let mut bytes = [b' '; 11];
    let (base, ext) = split_base_ext(short_name);
    let base = base.as_bytes();
    bytes[..base.len().min(8)].copy_from_slice(&base[..base.len().min(8)]);
    let ext = ext.as_bytes();
    bytes[8..8 + ext.len().min(3)].copy_from_slice(&ext[..ext.len().min(3)]);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    fn used_set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| String::from(*s)).collect()
    }

    fn lookup(used: &BTreeSet<String>) -> impl Fn(&str) -> bool + '_ {
        move |candidate: &str| used.contains(candidate)
    }

    // A name exactly 8 chars long with no illegal characters keeps its
    // extension and gets no tilde suffix.
    #[test]
    fn eight_char_clean_name_has_no_suffix() {
        let used = used_set(&[]);
        let name = generate("ABCDEFGH.TXT", lookup(&used)).unwrap();
        assert_eq!(name, "ABCDEFGH.TXT");
    }

    // A 9-char clean name doesn't fit in 8 chars, so it gets a ~1 suffix
    // with its prefix trimmed to 6 chars.
    #[test]
    fn nine_char_clean_name_gets_tilde_one() {
        let used = used_set(&[]);
        let name = generate("ABCDEFGHI.TXT", lookup(&used)).unwrap();
        assert_eq!(name, "ABCDEF~1.TXT");
    }

    // A non-ASCII character (U+00E9) maps to an underscore.
    #[test]
    fn unicode_char_maps_to_underscore() {
        let used = used_set(&[]);
        let name = generate("r\u{e9}sum\u{e9}.txt", lookup(&used)).unwrap();
        assert_eq!(name, "R_SUM_~1.TXT");
    }

    // A filename starting with '.' has an empty base before the dot; the
    // extension is taken from after it and truncated to 3 chars like any
    // other extension.
    #[test]
    fn leading_dot_file_has_empty_base() {
        let used = used_set(&[]);
        let name = generate(".bashrc", lookup(&used)).unwrap();
        assert_eq!(name, ".BAS");
    }

    // "My Résumé.docx" forces a numeric tail because the name contains a
    // space and a non-ASCII character ('é' maps to '_' by tidy()); see
    // DESIGN.md for the rationale behind this crate's literal tidy()
    // mapping.
    #[test]
    fn unclean_short_name_forces_suffix_even_if_it_fits() {
        let used = used_set(&[]);
        let name = generate("My R\u{e9}sum\u{e9}.docx", lookup(&used)).unwrap();
        assert_eq!(name, "MYR_SU~1.DOC");
    }

    // Renaming to "NewName.txt" when "NEWNAME.TXT" is already taken forces
    // the numeric tail, trimming the base to 6 chars.
    #[test]
    fn collisions_resolve_with_increasing_numeric_tail() {
        let used = used_set(&["NEWNAME.TXT"]);
        let name = generate("NewName.txt", lookup(&used)).unwrap();
        assert_eq!(name, "NEWNAM~1.TXT");
    }

    #[test]
    fn extensionless_name_has_no_dot() {
        let used = used_set(&[]);
        let name = generate("README", lookup(&used)).unwrap();
        assert_eq!(name, "README");
        assert!(!name.contains('.'));
    }

    #[test]
    fn exhausted_numeric_tail_is_an_error() {
        // "A A" contains a skip character, forcing the tilde loop even
        // though the tidy'd base ("AA") is short.
        let storage: Vec<String> = (1..=99_999u32).map(|i| format!("AA~{i}")).collect();
        let names: Vec<&str> = storage.iter().map(String::as_str).collect();
        let used = used_set(&names);
        let err = generate("A A", lookup(&used)).unwrap_err();
        assert_eq!(err, Error::ShortNameExhausted);
    }

    #[test]
    fn to_short_name_bytes_pads_with_spaces() {
        let bytes = to_short_name_bytes("README.TXT");
        assert_eq!(&bytes, b"README  TXT");
    }
}
