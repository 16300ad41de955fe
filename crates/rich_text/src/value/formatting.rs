// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Applying and removing formats.
//!
//! A format applied over a range lands at the same nesting position on
//! every character of the range, so that a link added inside a bold run
//! nests inside it rather than interleaving.
//!
//! On a collapsed caret nothing is selected, so applying a format only
//! records it as active (to be used for the next typed text), unless a
//! format of the same type already covers the caret: then that whole run
//! is rewritten. Removing works the same way.

use std::sync::Arc;

use super::RichTextValue;
use crate::format::Format;
use crate::utf16::clamp_range;

type CharFormats = Vec<Vec<Arc<Format>>>;

impl RichTextValue {
    /// Apply `format` over the current selection.
    pub fn apply_format(&self, format: impl Into<Arc<Format>>) -> Self {
        match self.range_or_selection(None) {
            Some((start, end)) => self.apply_format_in(format, start, end),
            None => self.with_active_format(format.into()),
        }
    }

    /// Apply `format` over `[start, end)`. Offsets are clamped.
    pub fn apply_format_in(
        &self,
        format: impl Into<Arc<Format>>,
        start: usize,
        end: usize,
    ) -> Self {
        let format = format.into();
        let (start, end) = clamp_range(start, end, self.len());
        let mut formats = self.formats.clone();

        if start == end {
            let existing = formats.get(start).and_then(|at| {
                at.iter().find(|f| f.is_type(format.format_type())).cloned()
            });
            if let Some(existing) = existing {
                let (run_start, run_end) = run_around(&formats, start, &existing);
                for at in &mut formats[run_start..run_end] {
                    for f in at.iter_mut().filter(|f| **f == existing) {
                        *f = Arc::clone(&format);
                    }
                }
            }
        } else {
            // Lowest nesting depth left free once any same-type format is
            // dropped from the range.
            let mut position = usize::MAX;
            for at in &mut formats[start..end] {
                at.retain(|f| !f.is_type(format.format_type()));
                position = position.min(at.len());
            }
            for at in &mut formats[start..end] {
                at.insert(position, Arc::clone(&format));
            }
        }

        tracing::trace!(
            format_type = format.format_type(),
            start,
            end,
            "applied format"
        );

        let mut value = Self::from_parts(
            self.text.clone(),
            formats,
            self.replacements.clone(),
            self.selection,
            None,
        );
        value.active_formats = Some(self.active_formats_with(format));
        value.normalised()
    }

    /// Remove every format of `format_type` from the current selection.
    pub fn remove_format(&self, format_type: &str) -> Self {
        match self.range_or_selection(None) {
            Some((start, end)) => self.remove_format_in(format_type, start, end),
            None => Self {
                active_formats: Some(self.active_formats_without(format_type)),
                ..self.clone()
            },
        }
    }

    /// Remove every format of `format_type` from `[start, end)`. Offsets are
    /// clamped.
    pub fn remove_format_in(
        &self,
        format_type: &str,
        start: usize,
        end: usize,
    ) -> Self {
        let (start, end) = clamp_range(start, end, self.len());
        let mut formats = self.formats.clone();

        if start == end {
            let existing = formats
                .get(start)
                .and_then(|at| at.iter().find(|f| f.is_type(format_type)).cloned());
            if let Some(existing) = existing {
                let (run_start, run_end) = run_around(&formats, start, &existing);
                for at in &mut formats[run_start..run_end] {
                    at.retain(|f| **f != *existing);
                }
            }
        } else {
            for at in &mut formats[start..end] {
                at.retain(|f| !f.is_type(format_type));
            }
        }

        tracing::trace!(format_type, start, end, "removed format");

        Self::from_parts(
            self.text.clone(),
            formats,
            self.replacements.clone(),
            self.selection,
            Some(self.active_formats_without(format_type)),
        )
        .normalised()
    }

    /// Remove `format`'s type if it is active at the selection, otherwise
    /// apply `format`.
    pub fn toggle_format(&self, format: impl Into<Arc<Format>>) -> Self {
        let format = format.into();
        if self.active_format(format.format_type()).is_some() {
            self.remove_format(format.format_type())
        } else {
            self.apply_format(format)
        }
    }

    /// Copy of this value in which equal formats on neighbouring code
    /// units share one allocation.
    pub fn normalise_formats(&self) -> Self {
        self.clone().normalised()
    }

    pub(crate) fn normalised(mut self) -> Self {
        normalise(&mut self.formats);
        self
    }

    fn with_active_format(&self, format: Arc<Format>) -> Self {
        Self {
            active_formats: Some(self.active_formats_with(format)),
            ..self.clone()
        }
    }

    fn active_formats_with(&self, format: Arc<Format>) -> Vec<Arc<Format>> {
        let mut active = self.active_formats_without(format.format_type());
        active.push(format);
        active
    }

    fn active_formats_without(&self, format_type: &str) -> Vec<Arc<Format>> {
        self.active_formats
            .iter()
            .flatten()
            .filter(|f| !f.is_type(format_type))
            .cloned()
            .collect()
    }
}

/// The maximal run `[start, end)` around `at` on which every code unit
/// carries `target`. `formats[at]` must carry it.
pub(super) fn run_around(
    formats: &[Vec<Arc<Format>>],
    at: usize,
    target: &Format,
) -> (usize, usize) {
    let carries = |i: usize| formats[i].iter().any(|f| **f == *target);
    let mut start = at;
    while start > 0 && carries(start - 1) {
        start -= 1;
    }
    let mut end = at + 1;
    while end < formats.len() && carries(end) {
        end += 1;
    }
    (start, end)
}

pub(super) fn normalise(formats: &mut CharFormats) {
    for i in 1..formats.len() {
        let (before, rest) = formats.split_at_mut(i);
        let previous = &before[i - 1];
        for (depth, format) in rest[0].iter_mut().enumerate() {
            if let Some(prev) = previous.get(depth) {
                if !Arc::ptr_eq(prev, format) && **prev == **format {
                    *format = Arc::clone(prev);
                }
            }
        }
    }
}
