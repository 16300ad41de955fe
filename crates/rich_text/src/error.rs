// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use thiserror::Error;

/// Errors raised while building a [`crate::RichTextValue`].
///
/// Only construction is fallible. The editing operations clamp their
/// offsets instead of failing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RichTextError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

/// The offending input behind [`RichTextError::InvalidInput`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error(
        "range {start}..{end} of format `{format_type}` does not fit in text of length {len}"
    )]
    FormatRange {
        format_type: String,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("selection {start}..{end} does not fit in text of length {len}")]
    Selection { start: usize, end: usize, len: usize },
}

/// Errors raised by [`crate::FormatTypeRegistry`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    #[error(
        "format name `{0}` must contain a namespace prefix, include only lowercase alphanumeric characters or dashes, and start with a letter, e.g. my-plugin/my-custom-format"
    )]
    InvalidName(String),

    #[error("format `{0}` is already registered")]
    AlreadyRegistered(String),

    #[error("format `{0}` must have a tag name")]
    MissingTagName(String),

    #[error(
        "class name `{class_name}` of format `{name}` must begin with a letter, followed by any number of hyphens, underscores, letters, or numbers"
    )]
    InvalidClassName { name: String, class_name: String },

    #[error(
        "format `{existing}` is already registered to handle bare tag name `{tag_name}`"
    )]
    BareTagTaken { existing: String, tag_name: String },

    #[error(
        "format `{existing}` is already registered to handle class name `{class_name}`"
    )]
    ClassNameTaken { existing: String, class_name: String },

    #[error("format `{0}` must have a title")]
    MissingTitle(String),

    #[error("format `{0}` is not registered")]
    NotRegistered(String),

    #[error("value uses unregistered format type `{0}`")]
    UnknownFormatType(String),
}
