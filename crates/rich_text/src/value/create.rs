// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use widestring::U16String;

use super::RichTextValue;
use crate::error::{InvalidInput, RichTextError};
use crate::format::FormatRange;

impl RichTextValue {
    /// A value holding `text` with no formats and no selection.
    pub fn create(text: &str) -> Self {
        let text = U16String::from_str(text);
        let len = text.len();
        Self::from_parts(text, vec![Vec::new(); len], vec![None; len], None, None)
    }

    /// A value holding `text` with each range's format applied, in order.
    ///
    /// Unlike the editing operations, construction does not clamp: a range
    /// that ends past the text or starts after it ends is rejected.
    pub fn create_with_formats(
        text: &str,
        ranges: impl IntoIterator<Item = FormatRange>,
    ) -> Result<Self, RichTextError> {
        let mut value = Self::create(text);
        let len = value.len();
        for range in ranges {
            if range.start > range.end || range.end > len {
                tracing::debug!(
                    format_type = range.format.format_type(),
                    start = range.start,
                    end = range.end,
                    len,
                    "rejected format range"
                );
                return Err(InvalidInput::FormatRange {
                    format_type: range.format.format_type().to_owned(),
                    start: range.start,
                    end: range.end,
                    len,
                }
                .into());
            }
            if range.is_empty() {
                continue;
            }
            value = value.apply_format_in(range.format, range.start, range.end);
        }
        // Applying formats records them as active; a freshly created value
        // has no caret and nothing pending.
        value.active_formats = None;
        Ok(value)
    }
}
