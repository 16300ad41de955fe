// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The [`RichTextValue`] type and its operations.
//!
//! The representation is flat: `formats[i]` lists every format active on
//! code unit `i`, in nesting order (outermost first). Ranges are derived
//! on demand by [`RichTextValue::format_ranges`].

mod active_formats;
mod create;
mod edit;
mod formatting;
mod projection;
mod slice;
mod tree;

use std::sync::Arc;

use widestring::{U16Str, U16String};

use crate::error::{InvalidInput, RichTextError};
use crate::format::{Format, OBJECT_REPLACEMENT_UNIT};

pub use active_formats::FormatBoundary;
pub use edit::{Pattern, Replacement};
pub use projection::{RunKind, TextRun};

/// A caret (`start == end`) or a selected range, in UTF-16 code units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(position: usize) -> Self {
        Self::new(position, position)
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Immutable formatted text plus selection.
///
/// Construct with [`RichTextValue::create`] or
/// [`RichTextValue::create_with_formats`]; derive new values with the
/// editing operations. Two values are equal when text, formats, objects,
/// selection and active formats are all equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RichTextValue {
    pub(crate) text: U16String,

    /// One entry per code unit of `text`.
    pub(crate) formats: Vec<Vec<Arc<Format>>>,

    /// One entry per code unit of `text`. `Some` only at object
    /// replacement characters.
    pub(crate) replacements: Vec<Option<Arc<Format>>>,

    pub(crate) selection: Option<Selection>,

    /// Formats to apply to text typed at a collapsed caret. `None` means
    /// they are derived from the surrounding characters, `Some(vec![])`
    /// means "none, whatever the neighbours say".
    pub(crate) active_formats: Option<Vec<Arc<Format>>>,
}

impl RichTextValue {
    /// Assemble a value from already-consistent parts.
    pub(crate) fn from_parts(
        text: U16String,
        formats: Vec<Vec<Arc<Format>>>,
        replacements: Vec<Option<Arc<Format>>>,
        selection: Option<Selection>,
        active_formats: Option<Vec<Arc<Format>>>,
    ) -> Self {
        let value = Self {
            text,
            formats,
            replacements,
            selection,
            active_formats,
        };
        value.assert_invariants();
        value
    }

    /// The text as UTF-16 code units.
    pub fn text(&self) -> &U16Str {
        &self.text
    }

    /// The text decoded to a `String`. Unpaired surrogates (which can only
    /// appear after slicing through a surrogate pair) become U+FFFD.
    pub fn text_string(&self) -> String {
        self.text.to_string_lossy()
    }

    /// The text with object replacement characters removed.
    pub fn text_content(&self) -> String {
        let units: Vec<u16> = self
            .text
            .as_slice()
            .iter()
            .copied()
            .filter(|u| *u != OBJECT_REPLACEMENT_UNIT)
            .collect();
        String::from_utf16_lossy(&units)
    }

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn formats(&self) -> &[Vec<Arc<Format>>] {
        &self.formats
    }

    /// Formats active on the code unit at `index`.
    pub fn formats_at(&self, index: usize) -> &[Arc<Format>] {
        self.formats.get(index).map_or(&[], Vec::as_slice)
    }

    pub fn replacements(&self) -> &[Option<Arc<Format>>] {
        &self.replacements
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn start(&self) -> Option<usize> {
        self.selection.map(|s| s.start)
    }

    pub fn end(&self) -> Option<usize> {
        self.selection.map(|s| s.end)
    }

    /// Active formats as set on the value, without falling back to the
    /// neighbouring characters. See [`RichTextValue::active_formats`] for
    /// the resolved list.
    pub fn explicit_active_formats(&self) -> Option<&[Arc<Format>]> {
        self.active_formats.as_deref()
    }

    /// True when there is a selection and it is a caret.
    ///
    /// A value without a selection is not collapsed.
    pub fn is_collapsed(&self) -> bool {
        self.selection.is_some_and(|s| s.is_collapsed())
    }

    /// Copy of this value with the given selection.
    pub fn with_selection(
        &self,
        start: usize,
        end: usize,
    ) -> Result<Self, RichTextError> {
        let len = self.len();
        if start > end || end > len {
            tracing::debug!(start, end, len, "rejected selection");
            return Err(InvalidInput::Selection { start, end, len }.into());
        }
        Ok(Self {
            selection: Some(Selection::new(start, end)),
            ..self.clone()
        })
    }

    /// Copy of this value with a caret at `position`, clamped to the text.
    pub fn collapsed_at(&self, position: usize) -> Self {
        Self {
            selection: Some(Selection::caret(position.min(self.len()))),
            ..self.clone()
        }
    }

    /// Copy of this value with the caret moved to the selection end.
    /// Without a selection the value is returned unchanged.
    pub fn collapse_to_end(&self) -> Self {
        Self {
            selection: self.selection.map(|s| Selection::caret(s.end)),
            ..self.clone()
        }
    }

    pub fn without_selection(&self) -> Self {
        Self {
            selection: None,
            ..self.clone()
        }
    }

    /// Copy of this value whose caret formats are exactly `formats`.
    pub fn with_active_formats(&self, formats: Vec<Arc<Format>>) -> Self {
        Self {
            active_formats: Some(formats),
            ..self.clone()
        }
    }

    /// Copy of this value that derives caret formats from the text again.
    pub fn clear_active_formats(&self) -> Self {
        Self {
            active_formats: None,
            ..self.clone()
        }
    }

    /// The explicit range if given, otherwise the selection.
    pub(crate) fn range_or_selection(
        &self,
        range: Option<(usize, usize)>,
    ) -> Option<(usize, usize)> {
        range.or_else(|| self.selection.map(|s| (s.start, s.end)))
    }

    /// Panic if any structural invariant is broken.
    pub fn explicitly_assert_invariants(&self) {
        let len = self.text.len();
        assert_eq!(
            self.formats.len(),
            len,
            "formats must have one entry per code unit"
        );
        assert_eq!(
            self.replacements.len(),
            len,
            "replacements must have one entry per code unit"
        );
        if let Some(selection) = self.selection {
            assert!(
                selection.start <= selection.end && selection.end <= len,
                "selection {selection:?} out of bounds for length {len}"
            );
        }
        for (i, at) in self.formats.iter().enumerate() {
            for (j, format) in at.iter().enumerate() {
                assert!(
                    !at[j + 1..].iter().any(|f| f.is_type(format.format_type())),
                    "code unit {i} carries `{}` twice",
                    format.format_type()
                );
            }
        }
        for (i, replacement) in self.replacements.iter().enumerate() {
            if replacement.is_some() {
                assert_eq!(
                    self.text.as_slice()[i],
                    OBJECT_REPLACEMENT_UNIT,
                    "object at {i} must sit on an object replacement character"
                );
            }
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(any(test, feature = "assert-invariants"))] {
        impl RichTextValue {
            pub(crate) fn assert_invariants(&self) {
                self.explicitly_assert_invariants();
            }
        }
    } else {
        impl RichTextValue {
            #[inline(always)]
            pub(crate) fn assert_invariants(&self) {}
        }
    }
}
