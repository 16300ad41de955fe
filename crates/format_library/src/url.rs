// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Checks and fix-ups for link targets typed by the user.

use email_address::EmailAddress;
use once_cell::sync::Lazy;
use regex::Regex;

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("href pattern is valid")
}

static USABLE_HREF: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)^(?:[a-z]+:|#|\?|\.|/)"));
static SCHEME_PREFIX: Lazy<Regex> = Lazy::new(|| pattern(r"^\S+:"));
static PROTOCOL: Lazy<Regex> = Lazy::new(|| pattern(r"^([^\s:]+:)"));
static VALID_PROTOCOL: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)^[a-z\-.+]+[0-9]*:$"));
static HTTP_WITH_HOST: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)^https?://[^/\s]"));
static AUTHORITY: Lazy<Regex> =
    Lazy::new(|| pattern(r"^[^/\s:]+:(?://)?/?([^/\s#?]+)[/#?]?\S*$"));
static PATH: Lazy<Regex> =
    Lazy::new(|| pattern(r"^[^/\s:]+:(?://)?[^/\s#?]+/([^\s#?]+)[#?]?\S*$"));
static FRAGMENT: Lazy<Regex> = Lazy::new(|| pattern(r"^\S+?(#[^\s?]*)"));
static VALID_AUTHORITY_OR_PATH: Lazy<Regex> = Lazy::new(|| pattern(r"^[^\s#?]+$"));
static VALID_QUERY: Lazy<Regex> = Lazy::new(|| pattern(r"^[^\s#?/]+$"));
static VALID_FRAGMENT: Lazy<Regex> = Lazy::new(|| pattern(r"^#[^\s#?/]*$"));
static EMAIL_TLD: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)@[^@]+\.[a-z]{2,63}$"));

/// Prefix `http://` to a bare host name.
///
/// Input that already has a scheme, is relative (`#`, `?`, `.` or `/`) or
/// is an e-mail address is returned trimmed but otherwise unchanged.
pub fn prepend_http(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || USABLE_HREF.is_match(url) || is_email(url) {
        url.to_owned()
    } else {
        format!("http://{url}")
    }
}

/// Whether `s` is an e-mail address, optionally with a `mailto:` prefix.
///
/// The domain must end in a top-level domain of 2 to 63 letters, so
/// `user@localhost` is not an address.
pub fn is_email(s: &str) -> bool {
    let address = s.strip_prefix("mailto:").unwrap_or(s);
    EMAIL_TLD.is_match(address) && EmailAddress::is_valid(address)
}

/// Loose validity check for a link target.
///
/// Scheme-looking input is checked part by part. Anchors must be a single
/// valid fragment. Anything else (relative paths, bare hosts) passes.
pub fn is_valid_href(href: &str) -> bool {
    let href = href.trim();
    if href.is_empty() {
        return false;
    }

    if SCHEME_PREFIX.is_match(href) && !is_valid_absolute(href) {
        return false;
    }

    if href.starts_with('#') && !VALID_FRAGMENT.is_match(href) {
        return false;
    }

    true
}

fn is_valid_absolute(href: &str) -> bool {
    let Some(protocol) = capture(&PROTOCOL, href) else {
        return false;
    };
    if !VALID_PROTOCOL.is_match(protocol) {
        return false;
    }

    // http(s) needs exactly `//` and a host after the scheme.
    if protocol.to_ascii_lowercase().starts_with("http") && !HTTP_WITH_HOST.is_match(href) {
        return false;
    }

    match capture(&AUTHORITY, href) {
        Some(authority) if VALID_AUTHORITY_OR_PATH.is_match(authority) => {}
        _ => return false,
    }

    if let Some(path) = capture(&PATH, href) {
        if !VALID_AUTHORITY_OR_PATH.is_match(path) {
            return false;
        }
    }

    if let Some(query) = query_string(href) {
        if !VALID_QUERY.is_match(&query) {
            return false;
        }
    }

    if let Some(fragment) = capture(&FRAGMENT, href) {
        if !VALID_FRAGMENT.is_match(fragment) {
            return false;
        }
    }

    true
}

fn capture<'h>(regex: &Regex, haystack: &'h str) -> Option<&'h str> {
    regex
        .captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

fn query_string(href: &str) -> Option<String> {
    ::url::Url::parse(href)
        .ok()
        .and_then(|url| url.query().map(str::to_owned))
        .filter(|q| !q.is_empty())
}
