// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::{RichTextValue, RunKind, Selection, TextRun};

impl RichTextValue {
    /// Debug rendering of the value, one run per line.
    ///
    /// The caret is drawn as `|`, a selected range as `{…}`.
    pub fn to_tree(&self) -> String {
        let mut out = match self.selection {
            Some(Selection { start, end }) => format!("sel: ({start},{end})\n"),
            None => "sel: none\n".to_owned(),
        };

        let runs = self.runs();
        for (i, run) in runs.iter().enumerate() {
            let is_last = i + 1 == runs.len();
            let marks = if run.formats.is_empty() {
                String::new()
            } else {
                let names: Vec<String> =
                    run.formats.iter().map(|f| f.to_string()).collect();
                format!(" [{}]", names.join(", "))
            };
            match &run.kind {
                RunKind::Text(_) => {
                    let display = self.annotate_selection(run, is_last);
                    out.push_str(&format!("│  \"{display}\"{marks}\n"));
                }
                RunKind::Object(object) => {
                    let (before, after) = self.markers_around(run, is_last);
                    out.push_str(&format!(
                        "├─ {before}object({object}){after}{marks}\n"
                    ));
                }
            }
        }

        if runs.is_empty() && self.is_collapsed() {
            out.push_str("│  |\n");
        }

        out
    }

    /// The run's text with selection markers inserted.
    fn annotate_selection(&self, run: &TextRun, is_last: bool) -> String {
        let units = &self.text.as_slice()[run.start..run.end];
        let Some(Selection { start, end }) = self.selection else {
            return String::from_utf16_lossy(units);
        };

        let mut cuts: Vec<(usize, char)> = Vec::new();
        if start == end {
            if (run.start..run.end).contains(&start)
                || (is_last && start == run.end)
            {
                cuts.push((start, '|'));
            }
        } else {
            if (run.start..run.end).contains(&start) {
                cuts.push((start, '{'));
            }
            if end > run.start && end <= run.end {
                cuts.push((end, '}'));
            }
        }

        let mut result = String::new();
        let mut from = run.start;
        for (at, marker) in cuts {
            result.push_str(&String::from_utf16_lossy(
                &units[from - run.start..at - run.start],
            ));
            result.push(marker);
            from = at;
        }
        result.push_str(&String::from_utf16_lossy(&units[from - run.start..]));
        result
    }

    /// Markers drawn before and after a one-unit object run.
    fn markers_around(&self, run: &TextRun, is_last: bool) -> (&'static str, &'static str) {
        let Some(Selection { start, end }) = self.selection else {
            return ("", "");
        };
        if start == end {
            if start == run.start {
                return ("|", "");
            }
            if is_last && start == run.end {
                return ("", "|");
            }
            return ("", "");
        }
        let before = if start == run.start { "{" } else { "" };
        let after = if end == run.end { "}" } else { "" };
        (before, after)
    }
}
