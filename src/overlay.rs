//! The texture picker overlay.
//!
//! A row of textured swatches, one per [`TextureKey`], sitting on a dark
//! backing panel. A thin marker above the row shows the current choice.
//! Coordinates are overlay-camera world units, which equal pixels.

use cgmath::Point3;

use crate::{
    data_structures::material::TextureKey,
    pick::{Hit, Ray, Shape, nearest_hit},
};

/// Distance between two neighbouring swatch centres.
pub const SWATCH_SPACING: f32 = 40.0;
/// Edge length of a swatch.
pub const SWATCH_SIZE: f32 = 30.0;
pub const PANEL_HEIGHT: f32 = 50.0;
pub const PANEL_MARGIN: f32 = 10.0;
pub const INDICATOR_WIDTH: f32 = 30.0;
pub const INDICATOR_HEIGHT: f32 = 3.0;
pub const INDICATOR_Y: f32 = 17.0;
pub const INDICATOR_Z: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Swatch {
    pub key: TextureKey,
    pub position: Point3<f32>,
}

impl Swatch {
    fn shape(&self) -> Shape {
        Shape::Rect {
            centre: self.position,
            half_width: SWATCH_SIZE / 2.0,
            half_height: SWATCH_SIZE / 2.0,
        }
    }
}

pub struct TexturePicker {
    swatches: Vec<Swatch>,
    indicator: Point3<f32>,
}

impl TexturePicker {
    /// One swatch per key, left to right in the given order, centred on x = 0.
    pub fn build(keys: &[TextureKey]) -> Self {
        let centre = (keys.len().saturating_sub(1)) as f32 / 2.0;
        let swatches: Vec<Swatch> = keys
            .iter()
            .enumerate()
            .map(|(i, &key)| Swatch {
                key,
                position: Point3::new((i as f32 - centre) * SWATCH_SPACING, 0.0, 0.0),
            })
            .collect();
        let first_x = swatches.first().map_or(0.0, |swatch| swatch.position.x);
        Self {
            swatches,
            indicator: Point3::new(first_x, INDICATOR_Y, INDICATOR_Z),
        }
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn swatch(&self, key: TextureKey) -> Option<&Swatch> {
        self.swatches.iter().find(|swatch| swatch.key == key)
    }

    /// Move the marker horizontally. Height and depth stay fixed.
    pub fn set_indicator_position(&mut self, x: f32) {
        self.indicator.x = x;
    }

    pub fn indicator_position(&self) -> Point3<f32> {
        self.indicator
    }

    /// Width and height of the backing panel.
    pub fn panel_size(&self) -> (f32, f32) {
        (
            self.swatches.len() as f32 * SWATCH_SPACING + PANEL_MARGIN,
            PANEL_HEIGHT,
        )
    }

    pub fn pick(&self, ray: &Ray) -> Option<Hit<TextureKey>> {
        nearest_hit(
            ray,
            self.swatches.iter().map(|swatch| (swatch.key, swatch.shape())),
        )
    }
}
