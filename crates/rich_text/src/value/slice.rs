// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Cutting values apart and putting them back together.

use widestring::U16String;

use super::{RichTextValue, Selection};
use crate::utf16::{clamp_range, find_all_units, find_units};

impl RichTextValue {
    /// The code units in `[start, end)` with their formats and objects.
    ///
    /// Offsets are clamped to the value, so an out-of-range request yields
    /// a shorter (possibly empty) value instead of an error. The result has
    /// no selection and no active formats, so `v.slice(0, v.len()) == v`
    /// only when `v` has neither.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let (start, end) = clamp_range(start, end, self.len());
        Self::from_parts(
            U16String::from_vec(&self.text.as_slice()[start..end]),
            self.formats[start..end].to_vec(),
            self.replacements[start..end].to_vec(),
            None,
            None,
        )
    }

    /// The selected part of the value, or a copy of the whole value when
    /// there is no selection.
    pub fn slice_selection(&self) -> Self {
        match self.selection {
            Some(selection) => self.slice(selection.start, selection.end),
            None => self.clone(),
        }
    }

    /// Cut the value at each offset in `points`.
    ///
    /// Returns `points.len() + 1` fragments. Offsets are clamped to the
    /// value and to the previous offset, so unsorted input yields empty
    /// fragments rather than overlaps. Concatenating the fragments gives
    /// back the value without its selection.
    pub fn split(&self, points: &[usize]) -> Vec<Self> {
        let mut fragments = Vec::with_capacity(points.len() + 1);
        let mut previous = 0;
        for &point in points {
            let point = point.min(self.len()).max(previous);
            fragments.push(self.slice(previous, point));
            previous = point;
        }
        fragments.push(self.slice(previous, self.len()));
        fragments
    }

    /// Split around `[start, end)`, dropping that range.
    ///
    /// `before` holds `[0, start)` and `after` holds `[end, len)` with a
    /// caret at its start. Passing `start == end` cuts at a single offset.
    pub fn split_at(&self, start: usize, end: usize) -> (Self, Self) {
        let (start, end) = clamp_range(start, end, self.len());
        let before = self.slice(0, start);
        let mut after = self.slice(end, self.len());
        after.selection = Some(Selection::caret(0));
        (before, after)
    }

    /// [`RichTextValue::split_at`] the current selection.
    pub fn split_at_selection(&self) -> Option<(Self, Self)> {
        let selection = self.selection?;
        Some(self.split_at(selection.start, selection.end))
    }

    /// Split on every occurrence of `separator`, dropping the separators.
    ///
    /// A selection is carried onto each fragment it overlaps, clipped to
    /// that fragment. An empty separator splits between every code unit.
    pub fn split_by(&self, separator: &str) -> Vec<Self> {
        let separator = U16String::from_str(separator);
        let len = self.len();

        let pieces: Vec<(usize, usize)> = if separator.is_empty() {
            (0..len).map(|i| (i, i + 1)).collect()
        } else {
            let mut pieces = Vec::new();
            let mut from = 0;
            for at in find_all_units(self.text.as_slice(), separator.as_slice()) {
                pieces.push((from, at));
                from = at + separator.len();
            }
            pieces.push((from, len));
            pieces
        };

        pieces
            .into_iter()
            .map(|(start, end)| {
                let mut fragment = self.slice(start, end);
                if let Some(selection) = self.selection {
                    let next_start = end + separator.len();
                    if selection.start < next_start && selection.end >= start {
                        fragment.selection = Some(Selection::new(
                            selection.start.clamp(start, end) - start,
                            selection.end.clamp(start, end) - start,
                        ));
                    }
                }
                fragment
            })
            .collect()
    }

    /// Join values end to end.
    ///
    /// Each operand keeps its formats, shifted by the length of everything
    /// before it. The result has no selection and no active formats; callers
    /// place the caret themselves. Splitting and concatenating therefore
    /// gives back the original only for a value without a selection.
    pub fn concat<'a>(values: impl IntoIterator<Item = &'a RichTextValue>) -> Self {
        let mut text = U16String::new();
        let mut formats = Vec::new();
        let mut replacements = Vec::new();
        for value in values {
            text.push(&value.text);
            formats.extend_from_slice(&value.formats);
            replacements.extend_from_slice(&value.replacements);
        }
        Self::from_parts(text, formats, replacements, None, None).normalised()
    }

    /// Like [`RichTextValue::concat`], with `separator` between operands.
    pub fn join<'a>(
        values: impl IntoIterator<Item = &'a RichTextValue>,
        separator: &RichTextValue,
    ) -> Self {
        let mut parts = Vec::new();
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                parts.push(separator);
            }
            parts.push(value);
        }
        Self::concat(parts)
    }

    /// Offset of the first occurrence of `needle` in the text.
    pub fn find(&self, needle: &str) -> Option<usize> {
        find_units(self.text.as_slice(), U16String::from_str(needle).as_slice())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{Format, FormatRange, RichTextValue, Selection};

    fn bold() -> Format {
        Format::new("core/bold")
    }

    fn link(url: &str) -> Format {
        Format::new("core/link").with_attribute("url", url)
    }

    fn sample() -> RichTextValue {
        RichTextValue::create_with_formats(
            "see click here now",
            [
                FormatRange::new(bold(), 0, 9),
                FormatRange::new(link("https://a.test"), 4, 14),
            ],
        )
        .unwrap()
    }

    #[test]
    fn slice_whole_value_is_identity() {
        let value = sample();
        assert_eq!(value.slice(0, value.len()), value);
        assert_eq!(RichTextValue::default().slice(0, 0), RichTextValue::default());
    }

    #[test]
    fn slice_clips_formats() {
        let value = sample().slice(6, 12);
        assert_eq!(value.text_string(), "ick he");
        assert_eq!(value.formats_at(0).len(), 2);
        assert_eq!(value.formats_at(3), &[Arc::new(link("https://a.test"))]);
        assert_eq!(value.len(), 6);
    }

    #[test]
    fn slice_clamps_out_of_range_offsets() {
        let value = RichTextValue::create("abc");
        assert_eq!(value.slice(1, 100).text_string(), "bc");
        assert_eq!(value.slice(50, 100), RichTextValue::default());
        assert_eq!(value.slice(2, 1), RichTextValue::default());
    }

    #[test]
    fn slice_drops_selection() {
        let value = sample().with_selection(2, 5).unwrap().slice(0, 8);
        assert_eq!(value.selection(), None);
    }

    #[test]
    fn slice_selection_takes_selected_text() {
        let value = sample().with_selection(4, 9).unwrap();
        assert_eq!(value.slice_selection().text_string(), "click");
        assert_eq!(sample().slice_selection(), sample());
    }

    #[test]
    fn split_then_concat_is_identity() {
        let value = sample();
        for p in 0..=value.len() {
            let fragments = value.split(&[p]);
            assert_eq!(fragments.len(), 2);
            assert_eq!(RichTextValue::concat(&fragments), value, "split at {p}");
        }
    }

    #[test]
    fn whole_slice_drops_the_selection() {
        let selected = sample().with_selection(2, 6).unwrap();
        let whole = selected.slice(0, selected.len());
        assert_eq!(whole.selection(), None);
        assert_ne!(whole, selected);
        assert_eq!(whole, sample());
    }

    #[test]
    fn split_at_several_points() {
        let fragments = sample().split(&[4, 14]);
        let texts: Vec<String> =
            fragments.iter().map(RichTextValue::text_string).collect();
        assert_eq!(texts, ["see ", "click here", " now"]);
        assert_eq!(RichTextValue::concat(&fragments), sample());
    }

    #[test]
    fn split_with_unsorted_points_never_overlaps() {
        let fragments = RichTextValue::create("abcdef").split(&[4, 2, 99]);
        let texts: Vec<String> =
            fragments.iter().map(RichTextValue::text_string).collect();
        assert_eq!(texts, ["abcd", "", "ef", ""]);
    }

    #[test]
    fn split_at_drops_the_range_and_places_caret_in_after() {
        let (before, after) = sample().split_at(4, 9);
        assert_eq!(before.text_string(), "see ");
        assert_eq!(after.text_string(), " here now");
        assert_eq!(before.selection(), None);
        assert_eq!(after.selection(), Some(Selection::caret(0)));
    }

    #[test]
    fn split_at_a_single_offset() {
        let (before, after) = sample().split_at(4, 4);
        assert_eq!(before.text_string(), "see ");
        assert_eq!(after.text_string(), "click here now");
        // The link was applied over partly unformatted text, so it sits
        // outside the bold run.
        assert_eq!(
            after.formats_at(0),
            &[Arc::new(link("https://a.test")), Arc::new(bold())]
        );
    }

    #[test]
    fn split_at_selection_requires_selection() {
        assert!(sample().split_at_selection().is_none());
        let (before, after) = sample()
            .with_selection(3, 4)
            .unwrap()
            .split_at_selection()
            .unwrap();
        assert_eq!(before.text_string(), "see");
        assert_eq!(after.text_string(), "click here now");
    }

    #[test]
    fn split_by_separator() {
        let fragments = RichTextValue::create("one\ntwo\n\nthree").split_by("\n");
        let texts: Vec<String> =
            fragments.iter().map(RichTextValue::text_string).collect();
        assert_eq!(texts, ["one", "two", "", "three"]);
    }

    #[test]
    fn split_by_carries_selection_onto_overlapping_fragments() {
        let fragments = RichTextValue::create("one\ntwo\nthree")
            .with_selection(1, 6)
            .unwrap()
            .split_by("\n");
        assert_eq!(fragments[0].selection(), Some(Selection::new(1, 3)));
        assert_eq!(fragments[1].selection(), Some(Selection::new(0, 2)));
        assert_eq!(fragments[2].selection(), None);
    }

    #[test]
    fn split_by_keeps_formats() {
        let fragments = sample().split_by(" ");
        assert_eq!(fragments.len(), 4);
        assert_eq!(fragments[1].text_string(), "click");
        assert_eq!(fragments[1].formats_at(0).len(), 2);
        assert_eq!(fragments[2].formats_at(0), &[Arc::new(link("https://a.test"))]);
        assert!(fragments[3].formats_at(0).is_empty());
    }

    #[test]
    fn concat_offsets_second_operand_formats() {
        let a = RichTextValue::create("ab");
        let b = RichTextValue::create("cde").apply_format_in(bold(), 1, 3);
        let joined = RichTextValue::concat([&a, &b]);
        assert_eq!(joined.len(), a.len() + b.len());
        assert_eq!(joined.text_string(), "abcde");
        for i in 0..b.len() {
            assert_eq!(joined.formats_at(a.len() + i), b.formats_at(i));
        }
        assert_eq!(joined.selection(), None);
        assert_eq!(joined.explicit_active_formats(), None);
    }

    #[test]
    fn concat_of_nothing_is_empty() {
        let none: [&RichTextValue; 0] = [];
        assert_eq!(RichTextValue::concat(none), RichTextValue::default());
    }

    #[test]
    fn join_inserts_separator() {
        let joined = RichTextValue::join(
            [&RichTextValue::create("a"), &RichTextValue::create("b")],
            &RichTextValue::create(", "),
        );
        assert_eq!(joined.text_string(), "a, b");
    }

    #[test]
    fn find_locates_text() {
        assert_eq!(sample().find("here"), Some(10));
        assert_eq!(sample().find("nope"), None);
    }
}
