// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use rich_text::{Format, FormatTypeSettings};

pub const LINK_FORMAT_TYPE: &str = "core/link";

const NEW_WINDOW_REL: &str = "noreferrer noopener";
const NOFOLLOW_REL: &str = "nofollow";

/// Registration settings for the link format.
pub fn link_format_type() -> FormatTypeSettings {
    FormatTypeSettings::new(LINK_FORMAT_TYPE, "Link", "a")
        .interactive(true)
        .with_attribute("url", "href")
        .with_attribute("type", "data-type")
        .with_attribute("id", "data-id")
        .with_attribute("_id", "id")
        .with_attribute("target", "target")
        .with_attribute("rel", "rel")
}

/// What a link points at and how it opens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkFormatOptions {
    pub url: String,
    /// Kind of entity linked to, e.g. `page` or `post`.
    pub link_type: Option<String>,
    /// Identifier of the linked entity.
    pub id: Option<String>,
    pub opens_in_new_window: bool,
    pub nofollow: bool,
}

/// Build a `core/link` format.
pub fn create_link_format(options: &LinkFormatOptions) -> Format {
    let mut format = Format::new(LINK_FORMAT_TYPE).with_attribute("url", &options.url);

    if let Some(link_type) = options.link_type.as_deref().filter(|t| !t.is_empty()) {
        format = format.with_attribute("type", link_type);
    }
    if let Some(id) = options.id.as_deref().filter(|id| !id.is_empty()) {
        format = format.with_attribute("id", id);
    }

    let mut rel: Vec<&str> = Vec::new();
    if options.opens_in_new_window {
        format = format.with_attribute("target", "_blank");
        rel.push(NEW_WINDOW_REL);
    }
    if options.nofollow {
        rel.push(NOFOLLOW_REL);
    }
    if !rel.is_empty() {
        format = format.with_attribute("rel", rel.join(" "));
    }

    format
}

/// Read access to the attributes of a link format.
#[derive(Clone, Copy, Debug)]
pub struct LinkAttributes<'a> {
    format: &'a Format,
}

impl<'a> LinkAttributes<'a> {
    /// `None` unless `format` is a link.
    pub fn new(format: &'a Format) -> Option<Self> {
        format
            .is_type(LINK_FORMAT_TYPE)
            .then_some(Self { format })
    }

    pub fn url(&self) -> Option<&'a str> {
        self.format.attribute("url")
    }

    pub fn link_type(&self) -> Option<&'a str> {
        self.format.attribute("type")
    }

    pub fn id(&self) -> Option<&'a str> {
        self.format.attribute("id")
    }

    pub fn target(&self) -> Option<&'a str> {
        self.format.attribute("target")
    }

    pub fn rel(&self) -> Option<&'a str> {
        self.format.attribute("rel")
    }

    pub fn opens_in_new_tab(&self) -> bool {
        self.target() == Some("_blank")
    }

    pub fn nofollow(&self) -> bool {
        self.rel().is_some_and(|rel| rel.contains(NOFOLLOW_REL))
    }
}
