// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Creating a draft page from the link control and linking to it.

use std::fmt;

use strum_macros::{AsRefStr, Display};

use crate::error::LinkError;
use crate::inline::LinkChange;

#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PageStatus {
    Draft,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub title: String,
    pub status: PageStatus,
}

/// A page as reported back by the host after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedPage {
    pub id: u64,
    pub page_type: String,
    pub rendered_title: String,
    /// Permalink of the page.
    pub link: String,
}

/// Host service that creates pages.
pub trait PageCreator {
    type Error: fmt::Display;

    fn create_page(&self, request: &PageRequest) -> Result<CreatedPage, Self::Error>;
}

/// A search result the link control can apply to the selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkSuggestion {
    pub kind: &'static str,
    pub id: u64,
    pub page_type: String,
    pub title: String,
    pub url: String,
}

impl From<LinkSuggestion> for LinkChange {
    fn from(suggestion: LinkSuggestion) -> Self {
        Self {
            url: Some(suggestion.url),
            link_type: Some(suggestion.page_type),
            id: Some(suggestion.id.to_string()),
            title: Some(suggestion.title),
            ..Default::default()
        }
    }
}

/// Ask `creator` for a draft page titled `title` and describe it as a link
/// suggestion.
pub fn create_page_suggestion<C: PageCreator>(
    creator: &C,
    title: &str,
) -> Result<LinkSuggestion, LinkError> {
    let request = PageRequest {
        title: title.to_owned(),
        status: PageStatus::Draft,
    };
    let page = creator.create_page(&request).map_err(|e| {
        tracing::debug!(title, error = %e, "page creation failed");
        LinkError::PageCreation(e.to_string())
    })?;
    tracing::debug!(id = page.id, "created page for link");
    Ok(LinkSuggestion {
        kind: "post-type",
        id: page.id,
        page_type: page.page_type,
        title: page.rendered_title,
        url: page.link,
    })
}
