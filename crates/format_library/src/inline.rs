// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Inserting, editing and removing the link at the selection.
//!
//! [`InlineLinkEditor`] captures a value when the link control opens. The
//! control shows [`InlineLinkEditor::link_value`] and reports the user's
//! edits back as a [`LinkChange`]; each operation returns the next value
//! plus a message for assistive technology.

use std::sync::Arc;

use rich_text::{Format, Pattern, Replacement, RichTextValue};
use strum_macros::{Display, EnumIter};

use crate::link::{create_link_format, LinkAttributes, LinkFormatOptions, LINK_FORMAT_TYPE};
use crate::url::{is_valid_href, prepend_http};

/// Status message to read out after a link edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
pub enum Announcement {
    #[strum(to_string = "Link removed.")]
    Removed,
    #[strum(to_string = "Link edited.")]
    Edited,
    #[strum(to_string = "Link inserted.")]
    Inserted,
    #[strum(
        to_string = "Warning: the link has been inserted but may have errors. Please test it."
    )]
    InvalidHref,
}

/// The link as presented to the link control.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkValue {
    /// Empty when there is no link yet.
    pub url: String,
    pub link_type: Option<String>,
    pub id: Option<String>,
    pub opens_in_new_tab: bool,
    pub nofollow: bool,
    /// The linked text.
    pub title: String,
}

/// Fields edited in the link control. `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkChange {
    pub url: Option<String>,
    pub link_type: Option<String>,
    pub id: Option<String>,
    pub opens_in_new_tab: Option<bool>,
    pub nofollow: Option<bool>,
    pub title: Option<String>,
}

impl LinkValue {
    fn merged(self, change: LinkChange) -> Self {
        Self {
            url: change.url.unwrap_or(self.url),
            link_type: change.link_type.or(self.link_type),
            id: change.id.or(self.id),
            opens_in_new_tab: change.opens_in_new_tab.unwrap_or(self.opens_in_new_tab),
            nofollow: change.nofollow.unwrap_or(self.nofollow),
            title: change.title.unwrap_or(self.title),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkEditOutcome {
    pub value: RichTextValue,
    pub announcement: Announcement,
}

#[derive(Clone, Debug)]
pub struct InlineLinkEditor<'a> {
    value: &'a RichTextValue,
    active_link: Option<Arc<Format>>,
}

impl<'a> InlineLinkEditor<'a> {
    pub fn new(value: &'a RichTextValue) -> Self {
        Self {
            value,
            active_link: value.active_format(LINK_FORMAT_TYPE),
        }
    }

    /// Whether the selection is inside a link.
    pub fn is_active(&self) -> bool {
        self.active_link.is_some()
    }

    /// The text the link control edits: the whole active link, or the
    /// selected text when no link is active.
    pub fn link_text(&self) -> RichTextValue {
        if self.is_active() {
            if let Some(boundary) = self.value.format_boundary(LINK_FORMAT_TYPE) {
                return self.value.slice(boundary.start, boundary.end);
            }
        }
        self.value.slice_selection()
    }

    pub fn link_value(&self) -> LinkValue {
        let title = self.link_text().text_string();
        let Some(attributes) = self
            .active_link
            .as_deref()
            .and_then(LinkAttributes::new)
        else {
            return LinkValue {
                title,
                ..Default::default()
            };
        };
        LinkValue {
            url: attributes.url().unwrap_or_default().to_owned(),
            link_type: attributes.link_type().map(str::to_owned),
            id: attributes.id().map(str::to_owned),
            opens_in_new_tab: attributes.opens_in_new_tab(),
            nofollow: attributes.nofollow(),
            title,
        }
    }

    /// Apply the user's edits to the link at the selection, or insert a
    /// new link.
    pub fn change_link(&self, change: LinkChange) -> LinkEditOutcome {
        let current = self.link_value();
        let is_new_link = current.url.is_empty();
        let current_text = current.title.clone();
        let next = current.merged(change);

        let url = prepend_http(&next.url);
        let format = Arc::new(create_link_format(&LinkFormatOptions {
            url: url.clone(),
            link_type: next.link_type,
            id: next.id,
            opens_in_new_window: next.opens_in_new_tab,
            nofollow: next.nofollow,
        }));
        let new_text = if next.title.is_empty() {
            url.clone()
        } else {
            next.title
        };

        let value = if self.value.is_collapsed() && !self.is_active() {
            tracing::debug!(url = url.as_str(), "inserting link at caret");
            let linked = RichTextValue::create(&new_text);
            let linked = linked.apply_format_in(format, 0, linked.len());
            self.value.insert(&linked)
        } else {
            let value = if new_text == current_text {
                tracing::debug!(url = url.as_str(), "updating link format");
                self.value.apply_format(format)
            } else {
                tracing::debug!(url = url.as_str(), "replacing link text");
                self.replace_link_text(&current_text, &new_text, format)
            };
            let value = value.collapse_to_end();
            if is_new_link {
                value
            } else {
                value.with_active_formats(Vec::new())
            }
        };

        let announcement = if !is_valid_href(&url) {
            Announcement::InvalidHref
        } else if self.is_active() {
            Announcement::Edited
        } else {
            Announcement::Inserted
        };
        tracing::debug!(%announcement, "link changed");

        LinkEditOutcome {
            value,
            announcement,
        }
    }

    /// Swap the linked text for `new_text`, linked with `format`.
    ///
    /// The value is cut at the start of the active link, or at the
    /// selection start when no link is active, so the first occurrence of
    /// the old text after that point is the one replaced. Other formats on
    /// the old text are dropped.
    fn replace_link_text(
        &self,
        old_text: &str,
        new_text: &str,
        format: Arc<Format>,
    ) -> RichTextValue {
        let linked = RichTextValue::create(new_text);
        let linked = linked.apply_format_in(format, 0, linked.len());

        let link_start = self
            .value
            .format_boundary(LINK_FORMAT_TYPE)
            .filter(|_| self.is_active())
            .map(|boundary| boundary.start);
        let split_point = link_start.or_else(|| self.value.start()).unwrap_or(0);

        let (before, after) = self.value.split_at(split_point, split_point);
        // `after` starts with a caret at 0; replacing moves it past the new
        // text and leaves it alone when the old text is not found.
        let after = after.replace(Pattern::Literal(old_text), Replacement::Value(&linked));
        let caret = before.len() + after.start().unwrap_or(0);

        RichTextValue::concat([&before, &after]).collapsed_at(caret)
    }

    /// Remove the link around the selection.
    pub fn remove_link(&self) -> LinkEditOutcome {
        tracing::debug!("removing link");
        LinkEditOutcome {
            value: self.value.remove_format(LINK_FORMAT_TYPE),
            announcement: Announcement::Removed,
        }
    }
}

#[cfg(test)]
mod tests {
    use rich_text::{FormatRange, Selection};
    use strum::IntoEnumIterator;

    use super::*;

    fn link(url: &str) -> Format {
        create_link_format(&LinkFormatOptions {
            url: url.to_owned(),
            ..Default::default()
        })
    }

    fn linked(text: &str, url: &str, start: usize, end: usize) -> RichTextValue {
        RichTextValue::create_with_formats(text, [FormatRange::new(link(url), start, end)])
            .unwrap()
    }

    fn url_change(url: &str) -> LinkChange {
        LinkChange {
            url: Some(url.to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn inactive_editor_reads_the_selection() {
        let value = RichTextValue::create("see click here").with_selection(4, 9).unwrap();
        let editor = InlineLinkEditor::new(&value);
        assert!(!editor.is_active());
        assert_eq!(
            editor.link_value(),
            LinkValue {
                title: "click".to_owned(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn active_editor_reads_the_whole_link() {
        let value = RichTextValue::create_with_formats(
            "see click here",
            [FormatRange::new(
                create_link_format(&LinkFormatOptions {
                    url: "https://a.test".to_owned(),
                    link_type: Some("page".to_owned()),
                    id: Some("3".to_owned()),
                    opens_in_new_window: true,
                    nofollow: true,
                }),
                4,
                14,
            )],
        )
        .unwrap()
        .collapsed_at(6);
        let editor = InlineLinkEditor::new(&value);
        assert!(editor.is_active());
        assert_eq!(editor.link_text().text_string(), "click here");
        assert_eq!(
            editor.link_value(),
            LinkValue {
                url: "https://a.test".to_owned(),
                link_type: Some("page".to_owned()),
                id: Some("3".to_owned()),
                opens_in_new_tab: true,
                nofollow: true,
                title: "click here".to_owned(),
            }
        );
    }

    #[test]
    fn insert_link_at_caret_uses_url_as_text() {
        let value = RichTextValue::create("go ").collapsed_at(3);
        let outcome = InlineLinkEditor::new(&value).change_link(url_change("a.test"));
        assert_eq!(outcome.value.text_string(), "go http://a.test");
        assert_eq!(outcome.value.formats_at(3), &[Arc::new(link("http://a.test"))]);
        assert_eq!(outcome.value.selection(), Some(Selection::caret(16)));
        assert_eq!(outcome.announcement, Announcement::Inserted);
    }

    #[test]
    fn insert_link_at_caret_with_title() {
        let value = RichTextValue::create("ab").collapsed_at(1);
        let outcome = InlineLinkEditor::new(&value).change_link(LinkChange {
            title: Some("XY".to_owned()),
            ..url_change("https://a.test")
        });
        assert_eq!(outcome.value.text_string(), "aXYb");
        assert_eq!(outcome.value.selection(), Some(Selection::caret(3)));
        assert!(outcome.value.formats_at(3).is_empty());
    }

    #[test]
    fn link_selected_text_keeps_the_text() {
        let value = RichTextValue::create("see click here").with_selection(4, 9).unwrap();
        let outcome = InlineLinkEditor::new(&value).change_link(url_change("https://a.test"));
        assert_eq!(outcome.value.text_string(), "see click here");
        for i in 4..9 {
            assert_eq!(outcome.value.formats_at(i), &[Arc::new(link("https://a.test"))]);
        }
        assert!(outcome.value.formats_at(9).is_empty());
        assert_eq!(outcome.value.selection(), Some(Selection::caret(9)));
        // A new link stays active so the control remains open.
        assert_ne!(outcome.value.explicit_active_formats(), Some(&[][..]));
        assert_eq!(outcome.announcement, Announcement::Inserted);
    }

    #[test]
    fn edit_url_of_active_link() {
        let value = linked("see click here", "https://a.test", 4, 14).collapsed_at(6);
        let outcome = InlineLinkEditor::new(&value).change_link(url_change("https://b.test"));
        assert_eq!(outcome.value.text_string(), "see click here");
        for i in 4..14 {
            assert_eq!(outcome.value.formats_at(i), &[Arc::new(link("https://b.test"))]);
        }
        assert_eq!(outcome.value.explicit_active_formats(), Some(&[][..]));
        assert_eq!(outcome.announcement, Announcement::Edited);
    }

    #[test]
    fn edit_text_of_active_link() {
        let value = linked("click here", "https://a.test", 0, 10).collapsed_at(4);
        let outcome = InlineLinkEditor::new(&value).change_link(LinkChange {
            title: Some("click now".to_owned()),
            ..Default::default()
        });
        assert_eq!(outcome.value.text_string(), "click now");
        assert_eq!(outcome.value.format_ranges().len(), 1);
        for i in 0..9 {
            assert_eq!(outcome.value.formats_at(i), &[Arc::new(link("https://a.test"))]);
        }
        assert_eq!(outcome.value.selection(), Some(Selection::caret(9)));
        assert_eq!(outcome.announcement, Announcement::Edited);
    }

    #[test]
    fn edit_text_targets_the_active_link_not_an_earlier_copy() {
        let value = linked("here and here", "https://a.test", 9, 13).collapsed_at(11);
        let outcome = InlineLinkEditor::new(&value).change_link(LinkChange {
            title: Some("there".to_owned()),
            ..Default::default()
        });
        assert_eq!(outcome.value.text_string(), "here and there");
        assert!(outcome.value.formats_at(0).is_empty());
        assert_eq!(outcome.value.formats_at(9), &[Arc::new(link("https://a.test"))]);
        assert_eq!(outcome.value.selection(), Some(Selection::caret(14)));
    }

    #[test]
    fn retitling_a_selection_replaces_it() {
        let value = RichTextValue::create("a here b here").with_selection(9, 13).unwrap();
        let outcome = InlineLinkEditor::new(&value).change_link(LinkChange {
            title: Some("there".to_owned()),
            ..url_change("https://a.test")
        });
        assert_eq!(outcome.value.text_string(), "a here b there");
        assert!(outcome.value.formats_at(2).is_empty());
        assert_eq!(outcome.value.formats_at(9), &[Arc::new(link("https://a.test"))]);
    }

    #[test]
    fn retitling_a_selection_that_starts_before_a_link() {
        let value = linked("see click here", "https://a.test", 4, 14)
            .with_selection(0, 6)
            .unwrap();
        let editor = InlineLinkEditor::new(&value);
        assert!(!editor.is_active());
        let outcome = editor.change_link(LinkChange {
            title: Some("X".to_owned()),
            ..url_change("https://b.test")
        });
        assert_eq!(outcome.value.text_string(), "Xick here");
        assert_eq!(outcome.value.formats_at(0), &[Arc::new(link("https://b.test"))]);
        assert_eq!(outcome.value.formats_at(1), &[Arc::new(link("https://a.test"))]);
        assert_eq!(outcome.value.selection(), Some(Selection::caret(1)));
        assert_eq!(outcome.announcement, Announcement::Inserted);
    }

    #[test]
    fn retitling_a_selection_that_overlaps_the_end_of_a_link() {
        let value = linked("see click here now", "https://a.test", 4, 14)
            .with_selection(10, 16)
            .unwrap();
        let outcome = InlineLinkEditor::new(&value).change_link(LinkChange {
            title: Some("X".to_owned()),
            ..url_change("https://b.test")
        });
        assert_eq!(outcome.value.text_string(), "see click Xow");
        assert_eq!(outcome.value.formats_at(4), &[Arc::new(link("https://a.test"))]);
        assert_eq!(outcome.value.formats_at(10), &[Arc::new(link("https://b.test"))]);
        assert!(outcome.value.formats_at(11).is_empty());
        assert_eq!(outcome.value.selection(), Some(Selection::caret(11)));
    }

    #[test]
    fn invalid_href_is_announced() {
        let value = RichTextValue::create("ab").collapsed_at(2);
        let outcome = InlineLinkEditor::new(&value).change_link(url_change("http:/broken"));
        assert_eq!(outcome.announcement, Announcement::InvalidHref);
        assert_eq!(outcome.value.text_string(), "abhttp:/broken");
    }

    #[test]
    fn remove_active_link() {
        let value = linked("see click here", "https://a.test", 4, 14).collapsed_at(6);
        let outcome = InlineLinkEditor::new(&value).remove_link();
        assert!(outcome.value.formats().iter().all(Vec::is_empty));
        assert_eq!(outcome.announcement, Announcement::Removed);
    }

    #[test]
    fn announcements_read_as_sentences() {
        for announcement in Announcement::iter() {
            assert!(announcement.to_string().ends_with('.'), "{announcement:?}");
        }
        assert_eq!(Announcement::Edited.to_string(), "Link edited.");
    }
}
