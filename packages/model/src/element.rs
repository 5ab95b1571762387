//! Newsletter content elements.
//!
//! `Element` is a closed sum type, one variant per content kind. Every
//! variant carries an `id` and a free-form `style` bag; the editor UI
//! is responsible for which style keys make sense per kind, the model
//! does not validate them.
//!
//! Nesting: only `Columns` contains other elements (a list of column
//! slots). By convention the UI never puts a `Columns` inside a column
//! slot, but the type system does not forbid it and the recursive
//! helpers in [`crate::document`] handle arbitrary depth.

use crate::id_generator::IdGenerator;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Style attribute value (string or number, as the editor UI emits).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Str(String),
    Num(f64),
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Str(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Str(s)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Num(n)
    }
}

/// Free-form presentation attributes, keyed by attribute name.
pub type StyleMap = HashMap<String, StyleValue>;

/// One social link entry in a `Social` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Record of a merge tag inserted into a text-bearing element's
/// content, substituted per-recipient at send time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedField {
    pub field_name: String,
    pub default_value: String,
}

/// Element kind token, used by the palette and by insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Heading,
    Text,
    Passage,
    Image,
    Button,
    Divider,
    Spacer,
    Social,
    Code,
    Columns,
}

impl ElementKind {
    /// Kinds whose `content` accepts merge tags.
    pub fn is_text_bearing(self) -> bool {
        matches!(
            self,
            ElementKind::Heading | ElementKind::Text | ElementKind::Passage
        )
    }
}

/// One content node in a newsletter document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Heading {
        id: String,
        content: String,
        #[serde(default)]
        style: StyleMap,
        #[serde(default, rename = "personalizedFields")]
        personalized_fields: Vec<PersonalizedField>,
    },

    Text {
        id: String,
        content: String,
        #[serde(default)]
        style: StyleMap,
        #[serde(default, rename = "personalizedFields")]
        personalized_fields: Vec<PersonalizedField>,
    },

    /// Long-form paragraph block.
    Passage {
        id: String,
        content: String,
        #[serde(default)]
        style: StyleMap,
        #[serde(default, rename = "personalizedFields")]
        personalized_fields: Vec<PersonalizedField>,
    },

    Image {
        id: String,
        src: String,
        alt: String,
        #[serde(default)]
        style: StyleMap,
    },

    Button {
        id: String,
        /// Button label.
        content: String,
        url: String,
        #[serde(default)]
        style: StyleMap,
    },

    Divider {
        id: String,
        #[serde(default)]
        style: StyleMap,
    },

    Spacer {
        id: String,
        height: f64,
        #[serde(default)]
        style: StyleMap,
    },

    Social {
        id: String,
        #[serde(rename = "socialLinks")]
        links: Vec<SocialLink>,
        #[serde(default)]
        style: StyleMap,
    },

    /// Raw HTML block, passed through untouched at render time.
    Code {
        id: String,
        content: String,
        #[serde(default)]
        style: StyleMap,
    },

    Columns {
        id: String,
        /// Ordered column slots, each an ordered element list.
        columns: Vec<Vec<Element>>,
        #[serde(default)]
        style: StyleMap,
    },
}

impl Element {
    pub fn id(&self) -> &str {
        match self {
            Element::Heading { id, .. }
            | Element::Text { id, .. }
            | Element::Passage { id, .. }
            | Element::Image { id, .. }
            | Element::Button { id, .. }
            | Element::Divider { id, .. }
            | Element::Spacer { id, .. }
            | Element::Social { id, .. }
            | Element::Code { id, .. }
            | Element::Columns { id, .. } => id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Heading { .. } => ElementKind::Heading,
            Element::Text { .. } => ElementKind::Text,
            Element::Passage { .. } => ElementKind::Passage,
            Element::Image { .. } => ElementKind::Image,
            Element::Button { .. } => ElementKind::Button,
            Element::Divider { .. } => ElementKind::Divider,
            Element::Spacer { .. } => ElementKind::Spacer,
            Element::Social { .. } => ElementKind::Social,
            Element::Code { .. } => ElementKind::Code,
            Element::Columns { .. } => ElementKind::Columns,
        }
    }

    /// Text payload, where the variant has one.
    pub fn content(&self) -> Option<&str> {
        match self {
            Element::Heading { content, .. }
            | Element::Text { content, .. }
            | Element::Passage { content, .. }
            | Element::Button { content, .. }
            | Element::Code { content, .. } => Some(content),
            _ => None,
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut String> {
        match self {
            Element::Heading { content, .. }
            | Element::Text { content, .. }
            | Element::Passage { content, .. }
            | Element::Button { content, .. }
            | Element::Code { content, .. } => Some(content),
            _ => None,
        }
    }

    pub fn style(&self) -> &StyleMap {
        match self {
            Element::Heading { style, .. }
            | Element::Text { style, .. }
            | Element::Passage { style, .. }
            | Element::Image { style, .. }
            | Element::Button { style, .. }
            | Element::Divider { style, .. }
            | Element::Spacer { style, .. }
            | Element::Social { style, .. }
            | Element::Code { style, .. }
            | Element::Columns { style, .. } => style,
        }
    }

    pub fn style_mut(&mut self) -> &mut StyleMap {
        match self {
            Element::Heading { style, .. }
            | Element::Text { style, .. }
            | Element::Passage { style, .. }
            | Element::Image { style, .. }
            | Element::Button { style, .. }
            | Element::Divider { style, .. }
            | Element::Spacer { style, .. }
            | Element::Social { style, .. }
            | Element::Code { style, .. }
            | Element::Columns { style, .. } => style,
        }
    }

    /// Column slots, if this is a `Columns` element.
    pub fn column_slots(&self) -> Option<&Vec<Vec<Element>>> {
        match self {
            Element::Columns { columns, .. } => Some(columns),
            _ => None,
        }
    }

    pub fn column_slots_mut(&mut self) -> Option<&mut Vec<Vec<Element>>> {
        match self {
            Element::Columns { columns, .. } => Some(columns),
            _ => None,
        }
    }

    pub fn personalized_fields(&self) -> Option<&Vec<PersonalizedField>> {
        match self {
            Element::Heading {
                personalized_fields,
                ..
            }
            | Element::Text {
                personalized_fields,
                ..
            }
            | Element::Passage {
                personalized_fields,
                ..
            } => Some(personalized_fields),
            _ => None,
        }
    }

    pub fn personalized_fields_mut(&mut self) -> Option<&mut Vec<PersonalizedField>> {
        match self {
            Element::Heading {
                personalized_fields,
                ..
            }
            | Element::Text {
                personalized_fields,
                ..
            }
            | Element::Passage {
                personalized_fields,
                ..
            } => Some(personalized_fields),
            _ => None,
        }
    }

    /// Assign a fresh id to this element and, recursively, to every
    /// element nested in its column slots. Used by duplication so the
    /// copied subtree shares no id with the original.
    pub fn reassign_ids(&mut self, ids: &mut IdGenerator) {
        let fresh = ids.new_id();
        match self {
            Element::Heading { id, .. }
            | Element::Text { id, .. }
            | Element::Passage { id, .. }
            | Element::Image { id, .. }
            | Element::Button { id, .. }
            | Element::Divider { id, .. }
            | Element::Spacer { id, .. }
            | Element::Social { id, .. }
            | Element::Code { id, .. } => *id = fresh,
            Element::Columns { id, columns, .. } => {
                *id = fresh;
                for slot in columns {
                    for child in slot {
                        child.reassign_ids(ids);
                    }
                }
            }
        }
    }

    /// Build an element of the given kind with its fixed default
    /// payload. New elements always enter at the document's top level;
    /// `Columns` defaults to two slots each holding one placeholder
    /// text element.
    pub fn with_defaults(kind: ElementKind, ids: &mut IdGenerator) -> Element {
        match kind {
            ElementKind::Heading => Element::Heading {
                id: ids.new_id(),
                content: "Main Heading".to_string(),
                style: style_map(&[
                    ("fontSize", "28px".into()),
                    ("fontWeight", "bold".into()),
                    ("color", "#1f2937".into()),
                    ("textAlign", "left".into()),
                ]),
                personalized_fields: Vec::new(),
            },
            ElementKind::Text => Element::Text {
                id: ids.new_id(),
                content: "Enter your text here".to_string(),
                style: style_map(&[
                    ("fontSize", "16px".into()),
                    ("color", "#374151".into()),
                    ("textAlign", "left".into()),
                ]),
                personalized_fields: Vec::new(),
            },
            ElementKind::Passage => Element::Passage {
                id: ids.new_id(),
                content: "Write a longer passage of content here. Use it for \
                          the body of your story or announcement."
                    .to_string(),
                style: style_map(&[
                    ("fontSize", "16px".into()),
                    ("lineHeight", "1.6".into()),
                    ("color", "#374151".into()),
                ]),
                personalized_fields: Vec::new(),
            },
            ElementKind::Image => Element::Image {
                id: ids.new_id(),
                src: "https://placehold.co/600x300".to_string(),
                alt: "Newsletter image".to_string(),
                style: style_map(&[("width", "100%".into())]),
            },
            ElementKind::Button => Element::Button {
                id: ids.new_id(),
                content: "Click Here".to_string(),
                url: "#".to_string(),
                style: style_map(&[
                    ("backgroundColor", "#2563eb".into()),
                    ("color", "#ffffff".into()),
                    ("padding", "12px 24px".into()),
                    ("borderRadius", "6px".into()),
                ]),
            },
            ElementKind::Divider => Element::Divider {
                id: ids.new_id(),
                style: style_map(&[("borderColor", "#e5e7eb".into())]),
            },
            ElementKind::Spacer => Element::Spacer {
                id: ids.new_id(),
                height: 32.0,
                style: StyleMap::new(),
            },
            ElementKind::Social => Element::Social {
                id: ids.new_id(),
                links: Vec::new(),
                style: style_map(&[("textAlign", "center".into())]),
            },
            ElementKind::Code => Element::Code {
                id: ids.new_id(),
                content: "<!-- Custom HTML -->".to_string(),
                style: StyleMap::new(),
            },
            ElementKind::Columns => {
                let id = ids.new_id();
                let left = Element::with_defaults(ElementKind::Text, ids);
                let right = Element::with_defaults(ElementKind::Text, ids);
                Element::Columns {
                    id,
                    columns: vec![vec![left], vec![right]],
                    style: style_map(&[("gap", "16px".into())]),
                }
            }
        }
    }
}

fn style_map(entries: &[(&str, StyleValue)]) -> StyleMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
