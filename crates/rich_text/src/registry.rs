// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The set of format types an editor knows how to render.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RegistryError;
use crate::value::RichTextValue;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9-]*/[a-z][a-z0-9-]*$")
        .expect("format name pattern is valid")
});

static CLASS_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[_a-zA-Z]+[a-zA-Z0-9_-]*$")
        .expect("class name pattern is valid")
});

/// How one format type is named and rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatTypeSettings {
    /// Namespaced identifier, e.g. `core/link`.
    pub name: String,
    /// Human readable name shown in toolbars.
    pub title: String,
    /// The HTML element the format renders as.
    pub tag_name: String,
    /// Set when the format shares its tag with others and is told apart by
    /// class. `None` claims the bare tag.
    pub class_name: Option<String>,
    /// Whether the rendered element takes focus (links do).
    pub interactive: bool,
    /// Format attribute key to HTML attribute name.
    pub attributes: BTreeMap<String, String>,
}

impl FormatTypeSettings {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        tag_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            tag_name: tag_name.into(),
            class_name: None,
            interactive: false,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        html_attribute: impl Into<String>,
    ) -> Self {
        self.attributes.insert(key.into(), html_attribute.into());
        self
    }
}

/// Registered format types, in registration order.
#[derive(Clone, Debug, Default)]
pub struct FormatTypeRegistry {
    types: Vec<FormatTypeSettings>,
}

impl FormatTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a format type, checking that it does not clash with an existing
    /// one.
    pub fn register(
        &mut self,
        settings: FormatTypeSettings,
    ) -> Result<&FormatTypeSettings, RegistryError> {
        if let Err(e) = self.check(&settings) {
            tracing::debug!(name = settings.name.as_str(), error = %e, "rejected format type");
            return Err(e);
        }
        tracing::debug!(name = settings.name.as_str(), "registered format type");
        self.types.push(settings);
        let index = self.types.len() - 1;
        Ok(&self.types[index])
    }

    fn check(&self, settings: &FormatTypeSettings) -> Result<(), RegistryError> {
        let name = &settings.name;
        if !NAME_PATTERN.is_match(name) {
            return Err(RegistryError::InvalidName(name.clone()));
        }
        if self.get(name).is_some() {
            return Err(RegistryError::AlreadyRegistered(name.clone()));
        }
        if settings.tag_name.is_empty() {
            return Err(RegistryError::MissingTagName(name.clone()));
        }
        if let Some(class_name) = &settings.class_name {
            if !CLASS_NAME_PATTERN.is_match(class_name) {
                return Err(RegistryError::InvalidClassName {
                    name: name.clone(),
                    class_name: class_name.clone(),
                });
            }
        }
        match &settings.class_name {
            None => {
                if let Some(existing) = self.types.iter().find(|t| {
                    t.class_name.is_none() && t.tag_name == settings.tag_name
                }) {
                    return Err(RegistryError::BareTagTaken {
                        existing: existing.name.clone(),
                        tag_name: settings.tag_name.clone(),
                    });
                }
            }
            Some(class_name) => {
                if let Some(existing) = self
                    .types
                    .iter()
                    .find(|t| t.class_name.as_ref() == Some(class_name))
                {
                    return Err(RegistryError::ClassNameTaken {
                        existing: existing.name.clone(),
                        class_name: class_name.clone(),
                    });
                }
            }
        }
        if settings.title.is_empty() {
            return Err(RegistryError::MissingTitle(name.clone()));
        }
        Ok(())
    }

    /// Remove a format type, returning its settings.
    pub fn unregister(
        &mut self,
        name: &str,
    ) -> Result<FormatTypeSettings, RegistryError> {
        let Some(index) = self.types.iter().position(|t| t.name == name) else {
            return Err(RegistryError::NotRegistered(name.to_owned()));
        };
        tracing::debug!(name, "unregistered format type");
        Ok(self.types.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&FormatTypeSettings> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormatTypeSettings> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Check that every format and object in `value` has a registered type.
    pub fn validate(&self, value: &RichTextValue) -> Result<(), RegistryError> {
        let formats = value.formats().iter().flatten();
        let objects = value.replacements().iter().flatten();
        match formats
            .chain(objects)
            .find(|f| self.get(f.format_type()).is_none())
        {
            Some(unknown) => Err(RegistryError::UnknownFormatType(
                unknown.format_type().to_owned(),
            )),
            None => Ok(()),
        }
    }
}
