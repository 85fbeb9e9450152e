use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Affine2, ColorStop, ImageFilters, Paint, Rgba, ScaleMode};

const LAYER_SEPARATOR: &str = "|";

/// Content key of one paint array.
///
/// Only fields that change what the paint looks like take part: solid color,
/// gradient stops and transform, image hash/scale/rotation/transform/filters.
/// `opacity`, `visible` and `blendMode` are ignored.
pub fn fill_hash(fills: &[Paint]) -> String {
    fills.iter().map(layer_key).collect::<Vec<_>>().join(LAYER_SEPARATOR)
}

#[derive(Serialize)]
#[serde(tag = "t")]
enum LayerKey<'a> {
    #[serde(rename = "S")]
    Solid { color: &'a Rgba },
    #[serde(rename = "G")]
    Gradient {
        kind: &'static str,
        stops: &'a [ColorStop],
        transform: &'a Affine2,
    },
    #[serde(rename = "I")]
    Image {
        hash: &'a Option<String>,
        scale_mode: ScaleMode,
        scaling_factor: Option<f64>,
        rotation: Option<f64>,
        transform: &'a Option<Affine2>,
        filters: &'a Option<ImageFilters>,
    },
}

fn layer_key(paint: &Paint) -> String {
    let key = match paint {
        Paint::Solid { color, .. } => LayerKey::Solid { color },
        Paint::GradientLinear(g) => gradient_key("linear", &g.gradient_stops, &g.gradient_transform),
        Paint::GradientRadial(g) => gradient_key("radial", &g.gradient_stops, &g.gradient_transform),
        Paint::GradientAngular(g) => gradient_key("angular", &g.gradient_stops, &g.gradient_transform),
        Paint::GradientDiamond(g) => gradient_key("diamond", &g.gradient_stops, &g.gradient_transform),
        Paint::Image(i) => LayerKey::Image {
            hash: &i.image_hash,
            scale_mode: i.scale_mode,
            scaling_factor: i.scaling_factor,
            rotation: i.rotation,
            transform: &i.image_transform,
            filters: &i.filters,
        },
    };
    // Plain structs and f64s only; serialization cannot fail.
    serde_json::to_string(&key).unwrap_or_default()
}

fn gradient_key<'a>(kind: &'static str, stops: &'a [ColorStop], transform: &'a Affine2) -> LayerKey<'a> {
    LayerKey::Gradient { kind, stops, transform }
}

/// Per-encode `hash -> table slot` map. Build a fresh one for each encode.
#[derive(Debug, Default)]
pub struct FillIndex {
    slots: HashMap<String, usize>,
    table: Vec<Vec<Paint>>,
}

impl FillIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for `fills`, allocating one on first sight of its content.
    pub fn intern(&mut self, fills: &[Paint]) -> usize {
        let key = fill_hash(fills);
        if let Some(&slot) = self.slots.get(&key) {
            return slot;
        }
        let slot = self.table.len();
        self.table.push(fills.to_vec());
        self.slots.insert(key, slot);
        slot
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn into_table(self) -> Vec<Vec<Paint>> {
        self.table
    }
}
