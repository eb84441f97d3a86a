//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
// Sponsored by NLnet as part of the Next Generation Internet initiative.
// See: https://nlnet.nl/NGI0
//

use std::ops::Range;

use bytes::Bytes;
use enum_as_inner::EnumAsInner;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::packet::error::{DecodeError, DecodeErrorKind};

// Node of a decoded packet tree.
//
// Every node covers a byte range of the packet buffer. Leaf nodes
// carry a scalar value, a raw byte view, or a malformed-packet record, while
// inner nodes carry the list of their children.
#[derive(Clone, Debug, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Field {
    pub label: String,
    pub offset: usize,
    pub length: usize,
    pub value: FieldValue,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

#[derive(Clone, Debug, EnumAsInner, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldValue {
    Uint(u64),
    Hex { value: u64, width: u8 },
    Text(String),
    Raw(Bytes),
    Children(Vec<Field>),
    Malformed(DecodeError),
}

// Non-fatal anomalies attached to an otherwise decoded field.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Annotation {
    ReservedBitsNonzero { mask: u16, value: u16 },
    IllegalValue(u32),
    LengthOutOfRange { length: u8, min: u8, max: u8 },
}

// Depth-first iterator over a field and all of its descendants.
pub struct FieldIter<'a> {
    stack: Vec<&'a Field>,
}

// ===== impl Field =====

impl Field {
    pub fn new(
        label: impl Into<String>,
        offset: usize,
        length: usize,
        value: FieldValue,
    ) -> Self {
        Field {
            label: label.into(),
            offset,
            length,
            value,
            annotations: Default::default(),
        }
    }

    pub fn uint(
        label: impl Into<String>,
        offset: usize,
        length: usize,
        value: impl Into<u64>,
    ) -> Self {
        Field::new(label, offset, length, FieldValue::Uint(value.into()))
    }

    // Creates a hexadecimal field whose digit count follows the field width.
    pub fn hex(
        label: impl Into<String>,
        offset: usize,
        length: usize,
        value: impl Into<u64>,
    ) -> Self {
        let width = (length * 2).min(16) as u8;
        let value = FieldValue::Hex {
            value: value.into(),
            width,
        };
        Field::new(label, offset, length, value)
    }

    pub fn text(
        label: impl Into<String>,
        offset: usize,
        length: usize,
        text: impl Into<String>,
    ) -> Self {
        Field::new(label, offset, length, FieldValue::Text(text.into()))
    }

    pub fn raw(
        label: impl Into<String>,
        offset: usize,
        bytes: Bytes,
    ) -> Self {
        let length = bytes.len();
        Field::new(label, offset, length, FieldValue::Raw(bytes))
    }

    pub fn container(
        label: impl Into<String>,
        offset: usize,
        length: usize,
        children: Vec<Field>,
    ) -> Self {
        Field::new(label, offset, length, FieldValue::Children(children))
    }

    // Creates a terminal record for a decoding error.
    pub fn malformed(offset: usize, length: usize, error: DecodeError) -> Self {
        let label = match error.kind() {
            DecodeErrorKind::Truncated => "Truncated",
            DecodeErrorKind::InconsistentLength
            | DecodeErrorKind::InvalidValue => "Malformed",
        };
        Field::new(label, offset, length, FieldValue::Malformed(error))
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    // Returns the byte range covered by this field.
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }

    // Returns the field children, or an empty slice for leaf fields.
    pub fn children(&self) -> &[Field] {
        match &self.value {
            FieldValue::Children(children) => children,
            _ => &[],
        }
    }

    // Returns the decoding error of a malformed-packet record.
    pub fn error(&self) -> Option<&DecodeError> {
        self.value.as_malformed()
    }

    pub fn is_malformed(&self) -> bool {
        self.value.is_malformed()
    }

    // Returns the first direct child with the given label.
    pub fn find(&self, label: &str) -> Option<&Field> {
        self.children().iter().find(|child| child.label == label)
    }

    // Returns all direct children with the given label.
    pub fn find_all<'a>(
        &'a self,
        label: &'a str,
    ) -> impl Iterator<Item = &'a Field> + 'a {
        self.children()
            .iter()
            .filter(move |child| child.label == label)
    }

    // Returns a depth-first iterator over this field and its descendants.
    pub fn iter(&self) -> FieldIter<'_> {
        FieldIter { stack: vec![self] }
    }

    // Renders the field tree as indented text, one field per line.
    pub fn render(&self) -> String {
        let mut output = String::new();
        self.render_at(&mut output, 0);
        output
    }

    fn render_at(&self, output: &mut String, depth: usize) {
        output.push_str(&"  ".repeat(depth));
        output.push_str(&self.to_string());
        output.push('\n');
        for child in self.children() {
            child.render_at(output, depth + 1);
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            FieldValue::Children(_) => write!(f, "{}", self.label)?,
            value => write!(f, "{}: {}", self.label, value)?,
        }
        for annotation in &self.annotations {
            write!(f, " [{}]", annotation)?;
        }
        Ok(())
    }
}

// ===== impl FieldValue =====

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Uint(value) => write!(f, "{}", value),
            FieldValue::Hex { value, width } => {
                write!(f, "0x{:0width$x}", value, width = *width as usize)
            }
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::Raw(bytes) if bytes.is_empty() => write!(f, "<empty>"),
            FieldValue::Raw(bytes) => {
                let hex = bytes.iter().format_with("", |byte, fmt| {
                    fmt(&format_args!("{byte:02x}"))
                });
                write!(f, "{} ({} byte(s))", hex, bytes.len())
            }
            FieldValue::Children(children) => {
                write!(f, "{} field(s)", children.len())
            }
            FieldValue::Malformed(error) => write!(f, "{}", error),
        }
    }
}

// ===== impl Annotation =====

impl std::fmt::Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Annotation::ReservedBitsNonzero { mask, value } => {
                write!(f, "reserved bits 0x{:02x} set (mask 0x{:02x})", value, mask)
            }
            Annotation::IllegalValue(value) => {
                write!(f, "illegal value {}", value)
            }
            Annotation::LengthOutOfRange { length, min, max } => {
                write!(f, "length {} out of range [{}-{}]", length, min, max)
            }
        }
    }
}

// ===== impl FieldIter =====

impl<'a> Iterator for FieldIter<'a> {
    type Item = &'a Field;

    fn next(&mut self) -> Option<Self::Item> {
        let field = self.stack.pop()?;
        self.stack.extend(field.children().iter().rev());
        Some(field)
    }
}
