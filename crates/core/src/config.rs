//! Tunable constants for the backdrop, with JSON overrides.
//!
//! [`BackdropConfig::default`] reproduces the stock page: one node per 5000
//! square pixels, a 200px repulsion radius, 150px node links, 250px pointer
//! links, all in teal. Hosts can override any subset from a JSON object; keys
//! that are missing or of the wrong type fall back to the default.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::color::Rgb;
use crate::error::BackdropError;

const DEFAULT_DENSITY_AREA: f64 = 5000.0;
const DEFAULT_MAX_SPEED: f64 = 0.3;
const DEFAULT_MIN_RADIUS: f64 = 1.0;
const DEFAULT_MAX_RADIUS: f64 = 3.0;
const DEFAULT_INTERACTION_RADIUS: f64 = 200.0;
const DEFAULT_PUSH_STRENGTH: f64 = 2.0;
const DEFAULT_NODE_ALPHA: f64 = 0.5;
const DEFAULT_LINK_DISTANCE: f64 = 150.0;
const DEFAULT_LINK_ALPHA: f64 = 0.2;
const DEFAULT_LINK_WIDTH: f64 = 1.5;
const DEFAULT_POINTER_LINK_DISTANCE: f64 = 250.0;
const DEFAULT_POINTER_LINK_ALPHA: f64 = 0.8;
const DEFAULT_POINTER_LINK_WIDTH: f64 = 1.0;
const DEFAULT_SELF_LINKS: bool = true;

/// Every constant the simulation and renderer read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// Square pixels of surface per particle.
    pub density_area: f64,
    /// Per-axis speed bound; each component is drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Pointer repulsion radius.
    pub interaction_radius: f64,
    /// Displacement at full force, in pixels per frame.
    pub push_strength: f64,
    pub node_color: Rgb,
    pub node_alpha: f64,
    /// Node-to-node links are drawn strictly below this distance.
    pub link_distance: f64,
    pub link_alpha: f64,
    pub link_width: f64,
    /// Node-to-pointer links are drawn strictly below this distance.
    pub pointer_link_distance: f64,
    pub pointer_link_alpha: f64,
    pub pointer_link_width: f64,
    pub link_color: Rgb,
    /// Whether the pair scan also visits `(a, a)`, emitting a zero-length link.
    pub self_links: bool,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            density_area: DEFAULT_DENSITY_AREA,
            max_speed: DEFAULT_MAX_SPEED,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            interaction_radius: DEFAULT_INTERACTION_RADIUS,
            push_strength: DEFAULT_PUSH_STRENGTH,
            node_color: Rgb::TEAL,
            node_alpha: DEFAULT_NODE_ALPHA,
            link_distance: DEFAULT_LINK_DISTANCE,
            link_alpha: DEFAULT_LINK_ALPHA,
            link_width: DEFAULT_LINK_WIDTH,
            pointer_link_distance: DEFAULT_POINTER_LINK_DISTANCE,
            pointer_link_alpha: DEFAULT_POINTER_LINK_ALPHA,
            pointer_link_width: DEFAULT_POINTER_LINK_WIDTH,
            link_color: Rgb::TEAL,
            self_links: DEFAULT_SELF_LINKS,
        }
    }
}

/// Reads `params[name]` as f64, accepting integers; `default` otherwise.
fn number(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

fn flag(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Colors must parse when present; a malformed hex string is an error rather
/// than a silent fallback.
fn color(params: &Value, name: &str, default: Rgb) -> Result<Rgb, BackdropError> {
    match params.get(name).and_then(Value::as_str) {
        Some(hex) => Rgb::from_hex(hex),
        None => Ok(default),
    }
}

impl BackdropConfig {
    /// Builds a config from a JSON object, then validates it.
    pub fn from_json(params: &Value) -> Result<Self, BackdropError> {
        let d = Self::default();
        let config = Self {
            density_area: number(params, "density_area", d.density_area),
            max_speed: number(params, "max_speed", d.max_speed),
            min_radius: number(params, "min_radius", d.min_radius),
            max_radius: number(params, "max_radius", d.max_radius),
            interaction_radius: number(params, "interaction_radius", d.interaction_radius),
            push_strength: number(params, "push_strength", d.push_strength),
            node_color: color(params, "node_color", d.node_color)?,
            node_alpha: number(params, "node_alpha", d.node_alpha),
            link_distance: number(params, "link_distance", d.link_distance),
            link_alpha: number(params, "link_alpha", d.link_alpha),
            link_width: number(params, "link_width", d.link_width),
            pointer_link_distance: number(params, "pointer_link_distance", d.pointer_link_distance),
            pointer_link_alpha: number(params, "pointer_link_alpha", d.pointer_link_alpha),
            pointer_link_width: number(params, "pointer_link_width", d.pointer_link_width),
            link_color: color(params, "link_color", d.link_color)?,
            self_links: flag(params, "self_links", d.self_links),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make the simulation degenerate.
    pub fn validate(&self) -> Result<(), BackdropError> {
        let positive = [
            ("density_area", self.density_area),
            ("interaction_radius", self.interaction_radius),
            ("link_distance", self.link_distance),
            ("pointer_link_distance", self.pointer_link_distance),
            ("min_radius", self.min_radius),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(BackdropError::config(name, format!("must be finite and > 0, got {value}")));
            }
        }

        let non_negative = [
            ("max_speed", self.max_speed),
            ("push_strength", self.push_strength),
            ("link_width", self.link_width),
            ("pointer_link_width", self.pointer_link_width),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(BackdropError::config(name, format!("must be finite and >= 0, got {value}")));
            }
        }

        let unit = [
            ("node_alpha", self.node_alpha),
            ("link_alpha", self.link_alpha),
            ("pointer_link_alpha", self.pointer_link_alpha),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(BackdropError::config(name, format!("must be in [0, 1], got {value}")));
            }
        }

        if !self.max_radius.is_finite() || self.max_radius < self.min_radius {
            return Err(BackdropError::config(
                "max_radius",
                format!("must be >= min_radius ({}), got {}", self.min_radius, self.max_radius),
            ));
        }
        Ok(())
    }

    /// Particle count for a surface: `floor(width * height / density_area)`.
    pub fn particle_count(&self, width: f64, height: f64) -> usize {
        let area = (width * height).max(0.0);
        (area / self.density_area).floor() as usize
    }

    /// Current values as a JSON object.
    pub fn params(&self) -> Value {
        // Serializing a plain struct of numbers, bools, and hex strings cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Type, default, and description of every key accepted by [`from_json`](Self::from_json).
    pub fn param_schema() -> Value {
        json!({
            "density_area": {
                "type": "number", "default": DEFAULT_DENSITY_AREA, "min": 1.0,
                "description": "Square pixels of surface per particle"
            },
            "max_speed": {
                "type": "number", "default": DEFAULT_MAX_SPEED, "min": 0.0,
                "description": "Per-axis drift speed bound in pixels per frame"
            },
            "min_radius": {
                "type": "number", "default": DEFAULT_MIN_RADIUS, "min": 0.0,
                "description": "Smallest node radius"
            },
            "max_radius": {
                "type": "number", "default": DEFAULT_MAX_RADIUS, "min": 0.0,
                "description": "Largest node radius (exclusive)"
            },
            "interaction_radius": {
                "type": "number", "default": DEFAULT_INTERACTION_RADIUS, "min": 0.0,
                "description": "Distance within which the pointer pushes nodes away"
            },
            "push_strength": {
                "type": "number", "default": DEFAULT_PUSH_STRENGTH, "min": 0.0,
                "description": "Displacement per frame at full repulsion force"
            },
            "node_color": {
                "type": "string", "default": Rgb::TEAL.to_hex(),
                "description": "Node fill color as #rrggbb"
            },
            "node_alpha": {
                "type": "number", "default": DEFAULT_NODE_ALPHA, "min": 0.0, "max": 1.0,
                "description": "Node fill opacity"
            },
            "link_distance": {
                "type": "number", "default": DEFAULT_LINK_DISTANCE, "min": 0.0,
                "description": "Nodes closer than this are linked"
            },
            "link_alpha": {
                "type": "number", "default": DEFAULT_LINK_ALPHA, "min": 0.0, "max": 1.0,
                "description": "Opacity of a zero-length node link"
            },
            "link_width": {
                "type": "number", "default": DEFAULT_LINK_WIDTH, "min": 0.0,
                "description": "Node link stroke width"
            },
            "pointer_link_distance": {
                "type": "number", "default": DEFAULT_POINTER_LINK_DISTANCE, "min": 0.0,
                "description": "Nodes closer than this to the pointer are linked to it"
            },
            "pointer_link_alpha": {
                "type": "number", "default": DEFAULT_POINTER_LINK_ALPHA, "min": 0.0, "max": 1.0,
                "description": "Opacity of a pointer link at zero distance"
            },
            "pointer_link_width": {
                "type": "number", "default": DEFAULT_POINTER_LINK_WIDTH, "min": 0.0,
                "description": "Pointer link stroke width"
            },
            "link_color": {
                "type": "string", "default": Rgb::TEAL.to_hex(),
                "description": "Link stroke color as #rrggbb"
            },
            "self_links": {
                "type": "boolean", "default": DEFAULT_SELF_LINKS,
                "description": "Visit (a, a) in the pair scan, drawing a zero-length link"
            }
        })
    }
}
