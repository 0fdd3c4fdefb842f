//! Declarative annotation templates
//!
//! A template is a named list of shape descriptors in relative coordinates
//! (0.0-1.0 fractions of the image dimensions, font size as a fraction of
//! image height). Applying one is a pure function of (template, width,
//! height): x-like fields scale by width, y-like fields and font size by
//! height, and every produced annotation gets a fresh id and timestamp
//! from the mint.
//!
//! Shape descriptors are a closed tagged enum, so an unknown shape tag can
//! only enter through template files on disk; it is rejected there, at the
//! deserialization boundary, and application itself cannot fail partway.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use scrub_core::{Annotation, Mint, Point, Shape};

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read template file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid template data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A named, resolution-independent annotation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub shapes: Vec<TemplateShape>,
}

/// One shape descriptor inside a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateShape {
    pub color: String,
    pub thickness: u8,
    #[serde(flatten)]
    pub geometry: TemplateGeometry,
}

/// Relative-coordinate geometry; all point and size fields are 0.0-1.0
/// fractions of the target image dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TemplateGeometry {
    Arrow {
        start: Point,
        end: Point,
    },
    Rectangle {
        origin: Point,
        width: f64,
        height: f64,
    },
    Text {
        position: Point,
        text: String,
        /// Fraction of image height, e.g. 0.03 = 3% of height.
        font_size: f64,
    },
}

/// Expand a template into concrete annotations for an image size.
pub fn apply_template(
    template: &Template,
    image_width: f64,
    image_height: f64,
    mint: &mut dyn Mint,
) -> Vec<Annotation> {
    debug!(template = %template.id, image_width, image_height, "applying template");

    template
        .shapes
        .iter()
        .map(|shape| {
            let scaled = match &shape.geometry {
                TemplateGeometry::Arrow { start, end } => Shape::Arrow {
                    start: scale_point(*start, image_width, image_height),
                    end: scale_point(*end, image_width, image_height),
                },
                TemplateGeometry::Rectangle {
                    origin,
                    width,
                    height,
                } => Shape::Rectangle {
                    origin: scale_point(*origin, image_width, image_height),
                    width: width * image_width,
                    height: height * image_height,
                },
                TemplateGeometry::Text {
                    position,
                    text,
                    font_size,
                } => Shape::Text {
                    position: scale_point(*position, image_width, image_height),
                    text: text.clone(),
                    font_size: font_size * image_height,
                },
            };
            Annotation::new(mint, shape.color.clone(), shape.thickness, scaled)
        })
        .collect()
}

fn scale_point(p: Point, image_width: f64, image_height: f64) -> Point {
    Point::new(p.x * image_width, p.y * image_height)
}

/// Load templates from a JSON file. Unknown shape tags fail here, before
/// any template can reach the annotation history.
pub fn load_templates(path: &Path) -> Result<Vec<Template>, TemplateError> {
    let content = std::fs::read_to_string(path)?;
    let templates: Vec<Template> = serde_json::from_str(&content)?;
    Ok(templates)
}

/// The compiled-in template set.
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template {
            id: "error-highlight".into(),
            name: "Error Highlight".into(),
            description: "Red arrow and rectangle to highlight an error".into(),
            shapes: vec![
                TemplateShape {
                    color: "#FF0000".into(),
                    thickness: 4,
                    geometry: TemplateGeometry::Arrow {
                        start: Point::new(0.2, 0.2),
                        end: Point::new(0.5, 0.5),
                    },
                },
                TemplateShape {
                    color: "#FF0000".into(),
                    thickness: 3,
                    geometry: TemplateGeometry::Rectangle {
                        origin: Point::new(0.2, 0.3),
                        width: 0.6,
                        height: 0.4,
                    },
                },
            ],
        },
        Template {
            id: "click-here".into(),
            name: "Click Here".into(),
            description: "Green circle and arrow with \"Click here\" text".into(),
            shapes: vec![
                TemplateShape {
                    color: "#00C853".into(),
                    thickness: 3,
                    geometry: TemplateGeometry::Rectangle {
                        origin: Point::new(0.25, 0.25),
                        width: 0.15,
                        height: 0.1,
                    },
                },
                TemplateShape {
                    color: "#00C853".into(),
                    thickness: 4,
                    geometry: TemplateGeometry::Arrow {
                        start: Point::new(0.15, 0.15),
                        end: Point::new(0.25, 0.25),
                    },
                },
                TemplateShape {
                    color: "#00C853".into(),
                    thickness: 2,
                    geometry: TemplateGeometry::Text {
                        position: Point::new(0.1, 0.12),
                        text: "Click here".into(),
                        font_size: 0.03,
                    },
                },
            ],
        },
        Template {
            id: "step-by-step".into(),
            name: "Step by Step".into(),
            description: "Three numbered steps for sequential instructions".into(),
            shapes: (1..=3)
                .flat_map(|step| {
                    let y = 0.25 * step as f64;
                    [
                        TemplateShape {
                            color: "#FF0000".into(),
                            thickness: 2,
                            geometry: TemplateGeometry::Text {
                                position: Point::new(0.1, y),
                                text: step.to_string(),
                                font_size: 0.05,
                            },
                        },
                        TemplateShape {
                            color: "#FF0000".into(),
                            thickness: 3,
                            geometry: TemplateGeometry::Rectangle {
                                origin: Point::new(0.08, y - 0.03),
                                width: 0.06,
                                height: 0.08,
                            },
                        },
                    ]
                })
                .collect(),
        },
    ]
}
