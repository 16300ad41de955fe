// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use format_library::{
    create_link_format, create_page_suggestion, link_format_type, Announcement,
    CreatedPage, InlineLinkEditor, LinkChange, LinkFormatOptions, PageCreator,
    PageRequest, LINK_FORMAT_TYPE,
};
use rich_text::{
    Format, FormatRange, FormatTypeRegistry, FormatTypeSettings, RichTextValue,
    Selection,
};
use speculoos::prelude::*;

fn link(url: &str) -> Format {
    create_link_format(&LinkFormatOptions {
        url: url.to_owned(),
        ..Default::default()
    })
}

fn registry() -> FormatTypeRegistry {
    let mut registry = FormatTypeRegistry::new();
    registry.register(link_format_type()).unwrap();
    registry
        .register(FormatTypeSettings::new("core/bold", "Bold", "strong"))
        .unwrap();
    registry
}

fn links(value: &RichTextValue) -> Vec<(usize, usize, String)> {
    value
        .format_ranges()
        .into_iter()
        .filter(|r| r.format.is_type(LINK_FORMAT_TYPE))
        .map(|r| {
            (
                r.start,
                r.end,
                r.format.attribute("url").unwrap_or_default().to_owned(),
            )
        })
        .collect()
}

#[test]
fn editing_link_text_keeps_one_link_with_the_original_url() {
    let value = RichTextValue::create_with_formats(
        "click here",
        [FormatRange::new(link("https://a.test"), 0, 10)],
    )
    .unwrap()
    .collapsed_at(5);

    let outcome = InlineLinkEditor::new(&value).change_link(LinkChange {
        title: Some("click now".to_owned()),
        ..Default::default()
    });

    assert_eq!(outcome.value.text_string(), "click now");
    assert_eq!(links(&outcome.value), [(0, 9, "https://a.test".to_owned())]);
    assert!(outcome.value.is_collapsed());
    assert_eq!(outcome.value.selection(), Some(Selection::caret(9)));
    assert_eq!(outcome.announcement, Announcement::Edited);
    assert_that!(registry().validate(&outcome.value)).is_ok();
}

#[test]
fn editing_link_text_inside_a_sentence_keeps_the_surroundings() {
    let value = RichTextValue::create_with_formats(
        "see click here now",
        [
            FormatRange::new(Format::new("core/bold"), 0, 3),
            FormatRange::new(link("https://a.test"), 4, 14),
        ],
    )
    .unwrap()
    .with_selection(6, 8)
    .unwrap();

    let outcome = InlineLinkEditor::new(&value).change_link(LinkChange {
        title: Some("tap".to_owned()),
        ..Default::default()
    });

    assert_eq!(outcome.value.text_string(), "see tap now");
    assert_eq!(links(&outcome.value), [(4, 7, "https://a.test".to_owned())]);
    assert_eq!(outcome.value.formats_at(0), &[std::sync::Arc::new(Format::new("core/bold"))]);
    assert_eq!(outcome.value.selection(), Some(Selection::caret(7)));
}

#[test]
fn new_link_then_remove_round_trips() {
    let value = RichTextValue::create("hello").with_selection(0, 5).unwrap();
    let linked = InlineLinkEditor::new(&value)
        .change_link(LinkChange {
            url: Some("a.test".to_owned()),
            ..Default::default()
        })
        .value;
    assert_eq!(links(&linked), [(0, 5, "http://a.test".to_owned())]);

    let removed = InlineLinkEditor::new(&linked.collapsed_at(2)).remove_link();
    assert_eq!(removed.value.text_string(), "hello");
    assert!(links(&removed.value).is_empty());
    assert_eq!(removed.announcement, Announcement::Removed);
}

#[test]
fn link_options_flow_into_the_format() {
    let value = RichTextValue::create("docs").with_selection(0, 4).unwrap();
    let outcome = InlineLinkEditor::new(&value).change_link(LinkChange {
        url: Some("https://a.test/docs".to_owned()),
        opens_in_new_tab: Some(true),
        nofollow: Some(true),
        ..Default::default()
    });
    let format = &outcome.value.formats_at(0)[0];
    assert_eq!(format.attribute("target"), Some("_blank"));
    assert_eq!(format.attribute("rel"), Some("noreferrer noopener nofollow"));

    let reopened = InlineLinkEditor::new(&outcome.value.collapsed_at(1)).link_value();
    assert!(reopened.opens_in_new_tab);
    assert!(reopened.nofollow);
    assert_eq!(reopened.title, "docs");
}

struct Pages;

impl PageCreator for Pages {
    type Error = String;

    fn create_page(&self, request: &PageRequest) -> Result<CreatedPage, String> {
        Ok(CreatedPage {
            id: 12,
            page_type: "page".to_owned(),
            rendered_title: request.title.clone(),
            link: "https://a.test/?page_id=12".to_owned(),
        })
    }
}

#[test]
fn created_page_is_linked_from_the_selection() {
    let value = RichTextValue::create("see About").with_selection(4, 9).unwrap();
    let suggestion = create_page_suggestion(&Pages, "About").unwrap();
    let outcome = InlineLinkEditor::new(&value).change_link(suggestion.into());

    assert_eq!(outcome.value.text_string(), "see About");
    let format = &outcome.value.formats_at(4)[0];
    assert_eq!(format.attribute("url"), Some("https://a.test/?page_id=12"));
    assert_eq!(format.attribute("type"), Some("page"));
    assert_eq!(format.attribute("id"), Some("12"));
    assert_eq!(outcome.announcement, Announcement::Inserted);
}
