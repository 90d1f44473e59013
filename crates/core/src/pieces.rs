//! Pieces module - immutable piece templates and the catalog
//!
//! A template is a named mask with a color. The catalog is the fixed set of
//! templates the piece queue draws from; it is validated once, at
//! construction, so gameplay never sees a malformed piece.

use std::sync::Arc;

use crate::error::CoreError;
use crate::mask::Mask;
use crate::types::{Color, Position, Rotation};

/// An immutable piece definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PieceTemplate {
    name: String,
    mask: Mask,
    color: Color,
}

impl PieceTemplate {
    /// Build a template from a row-major cell list of `width * height` flags.
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        cells: Vec<bool>,
        color: Color,
    ) -> Result<Self, CoreError> {
        Ok(Self::from_mask(name, Mask::new(width, height, cells)?, color))
    }

    pub fn from_mask(name: impl Into<String>, mask: Mask, color: Color) -> Self {
        Self {
            name: name.into(),
            mask,
            color,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// `(width, height)` of the unrotated mask.
    pub fn size(&self) -> Position {
        self.mask.size()
    }
}

/// A template drawn from the queue, with the orientation it will spawn in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceInstance {
    template: Arc<PieceTemplate>,
    rotation: Rotation,
}

impl PieceInstance {
    pub fn new(template: Arc<PieceTemplate>, rotation: Rotation) -> Self {
        Self { template, rotation }
    }

    pub fn template(&self) -> &PieceTemplate {
        &self.template
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn color(&self) -> Color {
        self.template.color()
    }

    /// The template mask pre-rotated to this instance's orientation.
    pub fn mask(&self) -> Mask {
        self.template.mask().oriented(self.rotation)
    }

    /// Size of [`Self::mask`]: width and height swap for quarter turns.
    pub fn size(&self) -> Position {
        let size = self.template.size();
        match self.rotation.as_kind() {
            Some(kind) if kind.swaps_axes() => Position::new(size.y, size.x),
            _ => size,
        }
    }
}

/// The fixed, non-empty set of templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    templates: Vec<Arc<PieceTemplate>>,
}

impl Catalog {
    pub fn new(templates: Vec<PieceTemplate>) -> Result<Self, CoreError> {
        if templates.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        Ok(Self {
            templates: templates.into_iter().map(Arc::new).collect(),
        })
    }

    /// The seven tetrominoes in their spawn orientation.
    pub fn standard() -> Self {
        let defs: [(&str, &[&str], Color); 7] = [
            ("I", &["XXXX"], Color::CYAN),
            ("O", &["XX", "XX"], Color::YELLOW),
            ("T", &[".X.", "XXX"], Color::PURPLE),
            ("S", &[".XX", "XX."], Color::GREEN),
            ("Z", &["XX.", ".XX"], Color::RED),
            ("J", &["X..", "XXX"], Color::BLUE),
            ("L", &["..X", "XXX"], Color::ORANGE),
        ];
        let templates = defs
            .iter()
            .filter_map(|(name, rows, color)| {
                Mask::parse(rows)
                    .ok()
                    .map(|mask| Arc::new(PieceTemplate::from_mask(*name, mask, *color)))
            })
            .collect();
        Self { templates }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn templates(&self) -> &[Arc<PieceTemplate>] {
        &self.templates
    }

    pub fn get(&self, name: &str) -> Option<&PieceTemplate> {
        self.templates
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
