// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Placeholder character occupying the single code unit of an embedded
/// object (image, inline widget). The object itself lives in the value's
/// replacements.
pub const OBJECT_REPLACEMENT_CHARACTER: char = '\u{fffc}';

pub(crate) const OBJECT_REPLACEMENT_UNIT: u16 = 0xfffc;

/// One formatting treatment, e.g. a bold run or a hyperlink.
///
/// Formats are compared by value. Values share them through [`Arc`], so a
/// long run of linked text holds one allocation rather than one per
/// character.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Format {
    format_type: String,
    attributes: BTreeMap<String, String>,
}

impl Format {
    pub fn new(format_type: impl Into<String>) -> Self {
        Self {
            format_type: format_type.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attributes<K, V>(
        format_type: impl Into<String>,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            format_type: format_type.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Builder-style setter, replacing any existing value for `key`.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The namespaced type identifier, e.g. `core/link`.
    pub fn format_type(&self) -> &str {
        &self.format_type
    }

    pub fn is_type(&self, format_type: &str) -> bool {
        self.format_type == format_type
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_type)?;
        for (key, value) in &self.attributes {
            write!(f, " {key}=\"{value}\"")?;
        }
        Ok(())
    }
}

/// A format applied to the half-open range `[start, end)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatRange {
    pub format: Arc<Format>,
    pub start: usize,
    pub end: usize,
}

impl FormatRange {
    pub fn new(format: impl Into<Arc<Format>>, start: usize, end: usize) -> Self {
        Self {
            format: format.into(),
            start,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
