// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Queries for the formats active at the selection.

use std::sync::Arc;

use super::formatting::run_around;
use super::RichTextValue;
use crate::format::Format;

/// The half-open range `[start, end)` covered by one contiguous format run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FormatBoundary {
    pub start: usize,
    pub end: usize,
}

impl FormatBoundary {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl RichTextValue {
    /// Formats active at the selection.
    ///
    /// - **Range selection**: formats carried by every selected code unit.
    /// - **Caret**: the explicit active formats if set; otherwise the
    ///   smaller of the format lists on either side of the caret, so a caret
    ///   at the edge of a format sits outside it.
    /// - **No selection**: none.
    pub fn active_formats(&self) -> Vec<Arc<Format>> {
        let Some(selection) = self.selection else {
            return Vec::new();
        };

        if selection.is_collapsed() {
            if let Some(active) = &self.active_formats {
                return active.clone();
            }
            let before = selection
                .start
                .checked_sub(1)
                .map_or(&[][..], |i| self.formats_at(i));
            let after = self.formats_at(selection.start);
            return if before.len() < after.len() {
                before.to_vec()
            } else {
                after.to_vec()
            };
        }

        let mut active = self.formats_at(selection.start).to_vec();
        for at in &self.formats[selection.start..selection.end] {
            active.retain(|f| at.contains(f));
            if active.is_empty() {
                break;
            }
        }
        active
    }

    /// The active format of `format_type`, if any.
    pub fn active_format(&self, format_type: &str) -> Option<Arc<Format>> {
        self.active_formats()
            .into_iter()
            .find(|f| f.is_type(format_type))
    }

    /// The run of `format_type` touching the selection.
    ///
    /// Returns `None` when there is no selection or no such format.
    pub fn format_boundary(&self, format_type: &str) -> Option<FormatBoundary> {
        let selection = self.selection?;
        self.format_boundary_in(format_type, selection.start, selection.end)
    }

    /// The maximal contiguous run of a `format_type` format touching
    /// `[start, end]`.
    ///
    /// The format is looked up at `start`, then at `end`, then at the code
    /// unit before `end`; the first hit decides which run is returned. The
    /// last rule finds a link when the caret sits just past its final
    /// character.
    pub fn format_boundary_in(
        &self,
        format_type: &str,
        start: usize,
        end: usize,
    ) -> Option<FormatBoundary> {
        let find = |index: usize| {
            self.formats_at(index)
                .iter()
                .find(|f| f.is_type(format_type))
                .map(|f| (index, Arc::clone(f)))
        };

        let (initial, target) = find(start)
            .or_else(|| find(end))
            .or_else(|| end.checked_sub(1).and_then(find))?;

        let (start, end) = run_around(&self.formats, initial, &target);
        Some(FormatBoundary { start, end })
    }
}
