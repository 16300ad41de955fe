// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Range-based views of the per-code-unit representation.
//!
//! A renderer usually wants runs or ranges rather than one format list per
//! code unit. These projections are derived on demand and never stored.

use std::sync::Arc;

use super::RichTextValue;
use crate::format::{Format, FormatRange};

/// What a [`TextRun`] holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunKind {
    Text(String),
    /// An embedded object. Always exactly one code unit long.
    Object(Arc<Format>),
}

/// A maximal stretch of code units sharing the same formats, in UTF-16
/// offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun {
    pub start: usize,
    pub end: usize,
    pub kind: RunKind,
    pub formats: Vec<Arc<Format>>,
}

impl RichTextValue {
    /// Every format as a contiguous range, outer formats first.
    ///
    /// Ranges are ordered by start offset, then by nesting depth. Passing
    /// them back to [`RichTextValue::create_with_formats`] rebuilds the same
    /// formats.
    pub fn format_ranges(&self) -> Vec<FormatRange> {
        // (range, depth at which it was opened)
        let mut ranges: Vec<(FormatRange, usize)> = Vec::new();
        let mut open: Vec<(Arc<Format>, usize)> = Vec::new();

        for i in 0..=self.len() {
            let current = self.formats_at(i);
            let kept = open
                .iter()
                .zip(current)
                .take_while(|((opened, _), now)| **opened == ***now)
                .count();

            while open.len() > kept {
                if let Some((format, start)) = open.pop() {
                    let depth = open.len();
                    ranges.push((FormatRange::new(format, start, i), depth));
                }
            }
            open.extend(current[kept..].iter().map(|f| (Arc::clone(f), i)));
        }

        ranges.sort_by_key(|(range, depth)| (range.start, *depth));
        ranges.into_iter().map(|(range, _)| range).collect()
    }

    /// The value as a sequence of text and object runs.
    pub fn runs(&self) -> Vec<TextRun> {
        let units = self.text.as_slice();
        let mut spans: Vec<(usize, usize)> = Vec::new();

        for i in 0..self.len() {
            let merges = match spans.last() {
                Some(&(_, end)) => {
                    end == i
                        && self.replacements[i].is_none()
                        && self.replacements[i - 1].is_none()
                        && self.formats[i] == self.formats[i - 1]
                }
                None => false,
            };
            match spans.last_mut() {
                Some(last) if merges => last.1 = i + 1,
                _ => spans.push((i, i + 1)),
            }
        }

        spans
            .into_iter()
            .map(|(start, end)| {
                let kind = match &self.replacements[start] {
                    Some(object) => RunKind::Object(Arc::clone(object)),
                    None => RunKind::Text(String::from_utf16_lossy(
                        &units[start..end],
                    )),
                };
                TextRun {
                    start,
                    end,
                    kind,
                    formats: self.formats[start].clone(),
                }
            })
            .collect()
    }
}
