// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

/// A toggle offered by the link control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkSetting {
    pub id: &'static str,
    pub title: &'static str,
}

/// Toggles shown for inline links, in display order.
pub const LINK_SETTINGS: [LinkSetting; 2] = [
    LinkSetting {
        id: "opensInNewTab",
        title: "Open in new tab",
    },
    LinkSetting {
        id: "nofollow",
        title: "Mark as nofollow",
    },
];

/// Capabilities of the current user, supplied by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkEditorSettings {
    pub user_can_create_pages: bool,
}

impl LinkEditorSettings {
    /// Whether the link control should offer "Create page" for a search
    /// term. Needs both the permission and a way to create pages.
    pub fn offers_page_creation(&self, has_page_creator: bool) -> bool {
        self.user_can_create_pages && has_page_creator
    }
}
