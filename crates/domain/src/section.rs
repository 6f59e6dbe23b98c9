//! Page sections: the editable content blocks of the marketing site.
//!
//! Every section is a single JSON object document (title, body text, image
//! references, ordered item lists, …) identified by its key. The site has
//! dozens of them and they all behave identically, so they are one type
//! plus a catalogue of keys rather than one type per section.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::time::Timestamp;

/// A registered section: its key doubles as the URL path under `/api`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionDef {
    pub key: &'static str,
    pub name: &'static str,
}

macro_rules! sections {
    ($($key:literal => $name:literal),* $(,)?) => {
        /// Every page section exposed by the API.
        pub const SECTIONS: &[SectionDef] = &[
            $(SectionDef { key: $key, name: $name }),*
        ];
    };
}

sections! {
    // Layout
    "layout/navbar" => "navbar",
    "layout/footer" => "footer",
    // Home
    "home/carousel" => "carousel",
    "home/hero" => "hero",
    "home/new" => "new",
    "home/cards" => "cards",
    "home/services" => "services",
    "home/statistics" => "statistics",
    "home/timeline" => "timeline",
    "home/why-us" => "why_us",
    "home/our-clients" => "our_clients",
    "home/associates" => "associates",
    "home/about-preview" => "about_preview",
    "home/testimonials" => "testimonials",
    "home/contacts" => "contacts",
    "home/client-logos" => "client_logos",
    "home/our-client" => "client",
    "our-concern/home" => "our_concern_home",
    "home/clients" => "client_home",
    "home/industries" => "industries",
    "home/contact" => "contact",
    "home/location" => "location",
    "home/featured-video" => "featured_video",
    "our-concern" => "our_concern",
    "company-values" => "company_values",
    "our-strength" => "our_strength",
    "our-service" => "our_service",
    "our-responsibility" => "our_responsibilities",
    // About
    "about/description" => "about1",
    "about/about2" => "about2",
    "chairman-message" => "message",
    "core-values" => "core_values",
    "directors" => "team",
    // Contact
    "contact/contact1" => "contact1",
    "contact/contact2" => "contact2",
    // Projects and services
    "projects" => "projects",
    "service/service-list" => "service_list",
    "service-description" => "service_card",
    "service-model" => "service_model",
    "services" => "services_pages",
    "project/project-gallery" => "project_gallery",
    "project/project-card" => "project_card",
    "sustainability" => "sustainability",
    "career" => "career",
    // News and events
    "news-events-description" => "news_events_description",
    "recruitment" => "recruitment",
    "news-events" => "news_events",
    "gallery" => "gallery",
}

/// Section whose items carry the service slugs.
pub const SERVICE_PAGES: &str = "services";

impl SectionDef {
    /// Find a registered section by key.
    #[must_use]
    pub fn lookup(key: &str) -> Option<&'static SectionDef> {
        SECTIONS.iter().find(|def| def.key == key)
    }
}

/// A stored section document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    pub content: Map<String, Value>,
    pub updated_at: Timestamp,
}

/// Unwrap a request body into a JSON object.
///
/// # Errors
///
/// Returns [`ValidationError::NotAnObject`] for arrays, strings, numbers, …
pub fn into_object(value: Value) -> Result<Map<String, Value>, ValidationError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ValidationError::NotAnObject),
    }
}

impl Section {
    /// Create a document holding exactly `content`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotAnObject`] if `content` is not an object.
    pub fn new(
        key: impl Into<String>,
        content: Value,
        updated_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            key: key.into(),
            content: into_object(content)?,
            updated_at,
        })
    }

    /// Shallow merge: top-level keys in `patch` replace the stored ones,
    /// keys absent from `patch` are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotAnObject`] if `patch` is not an object.
    pub fn merge(&mut self, patch: Value, updated_at: Timestamp) -> Result<(), ValidationError> {
        let patch = into_object(patch)?;
        self.content.extend(patch);
        self.updated_at = updated_at;
        Ok(())
    }

    /// Objects held in the document's top-level arrays, in document order.
    fn items(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.content
            .values()
            .filter_map(Value::as_array)
            .flatten()
            .filter_map(Value::as_object)
    }

    /// First item whose `slug` equals `slug`.
    #[must_use]
    pub fn find_by_slug(&self, slug: &str) -> Option<&Map<String, Value>> {
        self.items()
            .find(|item| item.get("slug").and_then(Value::as_str) == Some(slug))
    }

    /// Distinct non-empty item slugs, in document order.
    #[must_use]
    pub fn slugs(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.items()
            .filter_map(|item| item.get("slug").and_then(Value::as_str))
            .filter(|slug| !slug.is_empty())
            .filter(|slug| seen.insert(*slug))
            .map(str::to_string)
            .collect()
    }
}
