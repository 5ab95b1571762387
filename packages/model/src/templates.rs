//! Named starting templates.
//!
//! When the user starts a new newsletter they pick a template instead
//! of loading from storage. Each template is a fixed pre-built
//! document, instantiated with fresh ids from the session's generator.

use crate::document::Document;
use crate::element::{Element, ElementKind};
use crate::id_generator::IdGenerator;

/// The template catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Blank,
    Basic,
    Announcement,
    Digest,
}

impl Template {
    pub fn from_name(name: &str) -> Option<Template> {
        match name {
            "blank" => Some(Template::Blank),
            "basic" => Some(Template::Basic),
            "announcement" => Some(Template::Announcement),
            "digest" => Some(Template::Digest),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Template::Blank => "blank",
            Template::Basic => "basic",
            Template::Announcement => "announcement",
            Template::Digest => "digest",
        }
    }

    /// Build the template's starting document.
    pub fn instantiate(self, ids: &mut IdGenerator) -> Document {
        let kinds: &[ElementKind] = match self {
            Template::Blank => &[],
            Template::Basic => &[
                ElementKind::Heading,
                ElementKind::Text,
                ElementKind::Divider,
                ElementKind::Button,
            ],
            Template::Announcement => &[
                ElementKind::Heading,
                ElementKind::Passage,
                ElementKind::Image,
                ElementKind::Button,
            ],
            Template::Digest => &[
                ElementKind::Heading,
                ElementKind::Text,
                ElementKind::Divider,
                ElementKind::Columns,
                ElementKind::Divider,
                ElementKind::Social,
            ],
        };

        Document {
            elements: kinds
                .iter()
                .map(|&kind| Element::with_defaults(kind, ids))
                .collect(),
        }
    }
}
