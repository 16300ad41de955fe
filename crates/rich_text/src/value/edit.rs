// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Text editing operations: insert, remove, insert_object, replace.

use std::sync::Arc;

use regex::Regex;
use widestring::U16String;

use super::{RichTextValue, Selection};
use crate::format::{Format, OBJECT_REPLACEMENT_UNIT};
use crate::utf16::{clamp_range, find_units, utf16_offset};

/// What [`RichTextValue::replace`] looks for.
#[derive(Clone, Copy, Debug)]
pub enum Pattern<'a> {
    /// The first occurrence of a literal string.
    Literal(&'a str),
    /// Every non-overlapping match of a regular expression.
    Regex(&'a Regex),
}

/// What [`RichTextValue::replace`] puts in place of each match.
#[derive(Clone, Copy, Debug)]
pub enum Replacement<'a> {
    /// Plain text, formatted like the first character of the match.
    Text(&'a str),
    /// A value carrying its own formats.
    Value(&'a RichTextValue),
}

impl RichTextValue {
    /// Replace the selection with `to_insert`.
    ///
    /// Without a selection, `to_insert` is appended.
    pub fn insert(&self, to_insert: &RichTextValue) -> Self {
        let (start, end) = self
            .range_or_selection(None)
            .unwrap_or((self.len(), self.len()));
        self.insert_in(to_insert, start, end)
    }

    /// Replace `[start, end)` with `to_insert` and put a caret after it.
    /// Offsets are clamped.
    pub fn insert_in(
        &self,
        to_insert: &RichTextValue,
        start: usize,
        end: usize,
    ) -> Self {
        let (start, end) = clamp_range(start, end, self.len());
        let units = self.text.as_slice();

        let mut text = U16String::from_vec(&units[..start]);
        text.push(&to_insert.text);
        text.push_slice(&units[end..]);

        let mut formats = self.formats[..start].to_vec();
        formats.extend_from_slice(&to_insert.formats);
        formats.extend_from_slice(&self.formats[end..]);

        let mut replacements = self.replacements[..start].to_vec();
        replacements.extend_from_slice(&to_insert.replacements);
        replacements.extend_from_slice(&self.replacements[end..]);

        let caret = start + to_insert.len();
        tracing::trace!(start, end, inserted = to_insert.len(), "inserted");

        Self::from_parts(
            text,
            formats,
            replacements,
            Some(Selection::caret(caret)),
            None,
        )
        .normalised()
    }

    /// Delete the selection. Without a selection the value is unchanged.
    pub fn remove(&self) -> Self {
        match self.selection {
            Some(selection) => self.remove_in(selection.start, selection.end),
            None => self.clone(),
        }
    }

    /// Delete `[start, end)` and put a caret where it was.
    pub fn remove_in(&self, start: usize, end: usize) -> Self {
        self.insert_in(&RichTextValue::default(), start, end)
    }

    /// Replace the selection with an embedded object.
    pub fn insert_object(&self, object: impl Into<Arc<Format>>) -> Self {
        let (start, end) = self
            .range_or_selection(None)
            .unwrap_or((self.len(), self.len()));
        self.insert_object_in(object, start, end)
    }

    /// Replace `[start, end)` with an embedded object: a single object
    /// replacement character whose replacement slot holds `object`.
    pub fn insert_object_in(
        &self,
        object: impl Into<Arc<Format>>,
        start: usize,
        end: usize,
    ) -> Self {
        let to_insert = Self::from_parts(
            U16String::from_vec(vec![OBJECT_REPLACEMENT_UNIT]),
            vec![Vec::new()],
            vec![Some(object.into())],
            None,
            None,
        );
        self.insert_in(&to_insert, start, end)
    }

    /// Replace matches of `pattern` with `replacement`.
    ///
    /// A literal pattern replaces its first occurrence; a regex replaces
    /// every match. When the value has a selection it becomes a caret after
    /// the last replacement. Active formats are cleared.
    pub fn replace(&self, pattern: Pattern<'_>, replacement: Replacement<'_>) -> Self {
        let matches = self.find_matches(pattern);
        if matches.is_empty() {
            return self.clone();
        }

        let units = self.text.as_slice();
        let mut text = U16String::new();
        let mut formats = Vec::with_capacity(self.len());
        let mut replacements = Vec::with_capacity(self.len());
        let mut copied = 0;
        let mut caret = 0;

        for (start, end) in &matches {
            let (start, end) = (*start, *end);
            text.push_slice(&units[copied..start]);
            formats.extend_from_slice(&self.formats[copied..start]);
            replacements.extend_from_slice(&self.replacements[copied..start]);

            match replacement {
                Replacement::Value(value) => {
                    text.push(&value.text);
                    formats.extend_from_slice(&value.formats);
                    replacements.extend_from_slice(&value.replacements);
                }
                Replacement::Text(s) => {
                    let inserted = U16String::from_str(s);
                    let inherited = self.formats_at(start).to_vec();
                    formats.extend(
                        std::iter::repeat(inherited).take(inserted.len()),
                    );
                    replacements.extend(
                        std::iter::repeat(None).take(inserted.len()),
                    );
                    text.push(&inserted);
                }
            }

            caret = text.len();
            copied = end;
        }

        text.push_slice(&units[copied..]);
        formats.extend_from_slice(&self.formats[copied..]);
        replacements.extend_from_slice(&self.replacements[copied..]);

        tracing::trace!(matches = matches.len(), "replaced");

        Self::from_parts(
            text,
            formats,
            replacements,
            self.selection.map(|_| Selection::caret(caret)),
            None,
        )
        .normalised()
    }

    /// Matches of `pattern` as UTF-16 ranges, in order, non-overlapping.
    fn find_matches(&self, pattern: Pattern<'_>) -> Vec<(usize, usize)> {
        match pattern {
            Pattern::Literal(needle) => {
                let needle = U16String::from_str(needle);
                find_units(self.text.as_slice(), needle.as_slice())
                    .map(|at| (at, at + needle.len()))
                    .into_iter()
                    .collect()
            }
            Pattern::Regex(regex) => {
                let haystack = self.text.to_string_lossy();
                regex
                    .find_iter(&haystack)
                    .map(|m| {
                        (
                            utf16_offset(&haystack, m.start()),
                            utf16_offset(&haystack, m.end()),
                        )
                    })
                    .collect()
            }
        }
    }
}
