// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The inline link format and the workflow for editing links in a
//! [`rich_text::RichTextValue`].

mod error;
mod inline;
mod link;
mod page;
mod settings;
mod url;

pub use crate::error::LinkError;
pub use crate::inline::{
    Announcement, InlineLinkEditor, LinkChange, LinkEditOutcome, LinkValue,
};
pub use crate::link::{
    create_link_format, link_format_type, LinkAttributes, LinkFormatOptions,
    LINK_FORMAT_TYPE,
};
pub use crate::page::{
    create_page_suggestion, CreatedPage, LinkSuggestion, PageCreator,
    PageRequest, PageStatus,
};
pub use crate::settings::{LinkEditorSettings, LinkSetting, LINK_SETTINGS};
pub use crate::url::{is_email, is_valid_href, prepend_http};
