// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Immutable rich text values.
//!
//! A [`RichTextValue`] is a run of UTF-16 text, one ordered list of
//! [`Format`]s per code unit, an optional object per code unit (for embedded
//! non-text content) and an optional selection. Every operation borrows the
//! value and returns a new one, so editing code builds the next state from
//! the previous one and never mutates in place.
//!
//! All offsets are UTF-16 code units, matching the caret and selection
//! geometry reported by platform text APIs.

mod error;
mod format;
mod registry;
mod utf16;
mod value;

pub use crate::error::{InvalidInput, RegistryError, RichTextError};
pub use crate::format::{Format, FormatRange, OBJECT_REPLACEMENT_CHARACTER};
pub use crate::registry::{FormatTypeRegistry, FormatTypeSettings};
pub use crate::value::{
    FormatBoundary, Pattern, Replacement, RichTextValue, RunKind, Selection,
    TextRun,
};
pub use widestring::{U16Str, U16String};
