// crates/pattern-catalog-patterns/src/behavioral/visitor.rs
// ============================================================================
// Module: Visitor Built-ins
// Description: Document exporters and shape measurements.
// Purpose: Add operations over an element structure without changing it.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! Element types are closed enums, so double dispatch becomes a visitor
//! trait with one method per element variant and an `accept` that matches
//! on the variant. Visitors are looked up by name from a static table.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::f64::consts::PI;

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::VisitorPattern;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Structure
// ============================================================================

/// Element that accepts visitors of type `V`.
pub trait Element<V: ?Sized>: Send {
    /// Dispatches to the visitor method for this element.
    fn accept(&self, visitor: &V) -> Value;
}

/// Element structure with a table of named visitors.
pub struct Structure<E: 'static, V: ?Sized + 'static> {
    /// Elements in document order.
    elements: Vec<E>,
    /// Named visitors.
    visitors: &'static [(&'static str, &'static V)],
}

impl<E, V> Scriptable for Structure<E, V>
where
    E: Element<V> + 'static,
    V: ?Sized + Sync + 'static,
{
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "visitors" => Ok(json!(self.visitors())),
            "visit" => Ok(Value::Array(self.visit_all(args::string(operation, args, 0)?)?)),
            "elements" => Ok(json!(self.element_count())),
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl<E, V> VisitorPattern for Structure<E, V>
where
    E: Element<V> + 'static,
    V: ?Sized + Sync + 'static,
{
    fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn visitors(&self) -> Vec<String> {
        self.visitors.iter().map(|(name, _)| (*name).to_string()).collect()
    }

    fn visit_all(&self, visitor: &str) -> Result<Vec<Value>, PatternError> {
        let (_, visitor) = self
            .visitors
            .iter()
            .find(|(name, _)| *name == visitor)
            .ok_or_else(|| PatternError::rejected(format!("unknown visitor: {visitor}")))?;
        Ok(self.elements.iter().map(|element| element.accept(*visitor)).collect())
    }
}

// ============================================================================
// SECTION: Documents
// ============================================================================

/// Document element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentElement {
    /// Paragraph of text.
    Text {
        /// Paragraph content.
        content: String,
    },
    /// Embedded image.
    Image {
        /// Image location.
        url: String,
        /// Alternative text.
        caption: String,
    },
}

/// Exporter visiting document elements.
pub trait DocumentVisitor: Sync {
    /// Exports a paragraph.
    fn visit_text(&self, content: &str) -> Value;

    /// Exports an image.
    fn visit_image(&self, url: &str, caption: &str) -> Value;
}

impl Element<dyn DocumentVisitor> for DocumentElement {
    fn accept(&self, visitor: &dyn DocumentVisitor) -> Value {
        match self {
            Self::Text {
                content,
            } => visitor.visit_text(content),
            Self::Image {
                url,
                caption,
            } => visitor.visit_image(url, caption),
        }
    }
}

/// HTML exporter.
struct HtmlExport;

impl DocumentVisitor for HtmlExport {
    fn visit_text(&self, content: &str) -> Value {
        json!(format!("<p>{content}</p>"))
    }

    fn visit_image(&self, url: &str, caption: &str) -> Value {
        json!(format!("<img src=\"{url}\" alt=\"{caption}\" />"))
    }
}

/// Markdown exporter.
struct MarkdownExport;

impl DocumentVisitor for MarkdownExport {
    fn visit_text(&self, content: &str) -> Value {
        json!(content)
    }

    fn visit_image(&self, url: &str, caption: &str) -> Value {
        json!(format!("![{caption}]({url})"))
    }
}

/// Document exporters.
const EXPORTERS: &[(&str, &dyn DocumentVisitor)] = &[("html", &HtmlExport), ("markdown", &MarkdownExport)];

// ============================================================================
// SECTION: Shapes
// ============================================================================

/// Measurable shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeElement {
    /// Circle by radius.
    Circle {
        /// Radius.
        radius: f64,
    },
    /// Axis-aligned rectangle.
    Rectangle {
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
}

/// Measurement visiting shapes.
pub trait ShapeVisitor: Sync {
    /// Measures a circle.
    fn visit_circle(&self, radius: f64) -> f64;

    /// Measures a rectangle.
    fn visit_rectangle(&self, width: f64, height: f64) -> f64;
}

impl Element<dyn ShapeVisitor> for ShapeElement {
    fn accept(&self, visitor: &dyn ShapeVisitor) -> Value {
        let measure = match *self {
            Self::Circle {
                radius,
            } => visitor.visit_circle(radius),
            Self::Rectangle {
                width,
                height,
            } => visitor.visit_rectangle(width, height),
        };
        json!(measure)
    }
}

/// Area calculator.
struct Area;

impl ShapeVisitor for Area {
    fn visit_circle(&self, radius: f64) -> f64 {
        PI * radius * radius
    }

    fn visit_rectangle(&self, width: f64, height: f64) -> f64 {
        width * height
    }
}

/// Perimeter calculator.
struct Perimeter;

impl ShapeVisitor for Perimeter {
    fn visit_circle(&self, radius: f64) -> f64 {
        2.0 * PI * radius
    }

    fn visit_rectangle(&self, width: f64, height: f64) -> f64 {
        2.0 * (width + height)
    }
}

/// Shape measurements.
const MEASUREMENTS: &[(&str, &dyn ShapeVisitor)] = &[("area", &Area), ("perimeter", &Perimeter)];

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Paragraph and image exported as HTML or Markdown.
#[must_use]
pub fn document_export() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::visitor(Structure {
            elements: vec![
                DocumentElement::Text {
                    content: "This is a paragraph.".to_string(),
                },
                DocumentElement::Image {
                    url: "image.jpg".to_string(),
                    caption: "A beautiful sunset".to_string(),
                },
            ],
            visitors: EXPORTERS,
        }))
    })
}

/// Circle and rectangle measured by area or perimeter.
#[must_use]
pub fn shape_metrics() -> Factory {
    Factory::new(|| {
        Ok(PatternInstance::visitor(Structure {
            elements: vec![
                ShapeElement::Circle {
                    radius: 5.0,
                },
                ShapeElement::Rectangle {
                    width: 4.0,
                    height: 6.0,
                },
            ],
            visitors: MEASUREMENTS,
        }))
    })
}
