// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Code-unit helpers for UTF-16 text.

/// Offset of the first occurrence of `needle` in `haystack`.
/// An empty needle matches at 0.
pub(crate) fn find_units(haystack: &[u16], needle: &[u16]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Offsets of all non-overlapping occurrences of a non-empty `needle`.
pub(crate) fn find_all_units(haystack: &[u16], needle: &[u16]) -> Vec<usize> {
    let mut found = Vec::new();
    if needle.is_empty() {
        return found;
    }
    let mut from = 0;
    while let Some(at) = find_units(&haystack[from..], needle) {
        found.push(from + at);
        from += at + needle.len();
    }
    found
}

/// Convert a UTF-8 byte offset in `s` into a UTF-16 offset.
///
/// `s` must be the lossy decoding of the UTF-16 text the offset refers to.
/// Lossy decoding maps each unpaired surrogate to U+FFFD, which is also a
/// single code unit, so offsets stay aligned.
pub(crate) fn utf16_offset(s: &str, byte_offset: usize) -> usize {
    s[..byte_offset].encode_utf16().count()
}

/// Clamp `start..end` into `0..len`, keeping `start <= end`.
pub(crate) fn clamp_range(start: usize, end: usize, len: usize) -> (usize, usize) {
    let start = start.min(len);
    let end = end.min(len).max(start);
    (start, end)
}
