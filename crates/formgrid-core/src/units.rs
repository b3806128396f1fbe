//! Unit conversion from physical and font-relative lengths to pixels.
//!
//! Physical units (points, millimeters, centimeters, inches) convert through
//! the screen resolution. Dialog units convert through the dialog base units
//! of the default font: one horizontal dialog unit is a quarter of the average
//! character width, one vertical dialog unit an eighth of the character height.
//!
//! Dialog base units are memoized per (font, resolution). Whoever owns the
//! look and feel calls [`UnitConverter::invalidate`] when it changes.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use crate::types::Axis;

/// Length units understood by constant sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    /// Screen pixels
    Pixel,
    /// Points (1/72 inch)
    Point,
    /// Millimeters
    Millimeter,
    /// Centimeters
    Centimeter,
    /// Inches
    Inch,
    /// Dialog units, relative to the default font
    DialogUnit,
}

impl Unit {
    /// Encoded suffix of the unit.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Unit::Pixel => "px",
            Unit::Point => "pt",
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
            Unit::Inch => "in",
            Unit::DialogUnit => "dlu",
        }
    }

    /// Look up a unit by its suffix. Matching is ASCII case-insensitive.
    pub fn from_abbreviation(suffix: &str) -> Option<Unit> {
        let unit = match suffix.to_ascii_lowercase().as_str() {
            "px" | "pixel" => Unit::Pixel,
            "pt" | "point" => Unit::Point,
            "mm" | "millimeter" => Unit::Millimeter,
            "cm" | "centimeter" => Unit::Centimeter,
            "in" | "inch" => Unit::Inch,
            "dlu" | "dialog" => Unit::DialogUnit,
            _ => return None,
        };
        Some(unit)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Identity of a font for dialog-unit caching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontKey {
    pub family: String,
    /// Font size in points
    pub size: u32,
}

impl FontKey {
    pub fn new(family: impl Into<String>, size: u32) -> Self {
        Self { family: family.into(), size }
    }
}

impl Default for FontKey {
    fn default() -> Self {
        Self::new("Dialog", 12)
    }
}

/// Measured metrics of a font, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontMetrics {
    /// Average width of a character
    pub average_char_width: f64,
    /// Line height (ascent plus descent)
    pub height: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            average_char_width: 6.0,
            height: 13.0,
        }
    }
}

/// Dialog base units derived from font metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialogBaseUnits {
    pub x: f64,
    pub y: f64,
}

impl From<FontMetrics> for DialogBaseUnits {
    fn from(metrics: FontMetrics) -> Self {
        Self {
            x: metrics.average_char_width,
            y: metrics.height.round(),
        }
    }
}

/// Source of the resolution and font information conversions depend on.
pub trait UnitContext: Send + Sync {
    /// Screen resolution in dots per inch.
    fn screen_resolution(&self) -> u32;

    /// The font dialog units are measured against.
    fn default_font(&self) -> FontKey;

    /// Measure `font`. Results are cached by the converter.
    fn font_metrics(&self, font: &FontKey) -> FontMetrics;
}

/// A unit context with fixed, configured values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticUnitContext {
    /// Screen resolution in dots per inch
    pub dpi: u32,
    /// Font used for dialog units
    pub font: FontKey,
    /// Metrics reported for every font
    pub metrics: FontMetrics,
}

impl Default for StaticUnitContext {
    fn default() -> Self {
        Self {
            dpi: 96,
            font: FontKey::default(),
            metrics: FontMetrics::default(),
        }
    }
}

impl UnitContext for StaticUnitContext {
    fn screen_resolution(&self) -> u32 {
        self.dpi
    }

    fn default_font(&self) -> FontKey {
        self.font.clone()
    }

    fn font_metrics(&self, _font: &FontKey) -> FontMetrics {
        self.metrics
    }
}

/// Converts lengths to pixels for one unit context.
pub struct UnitConverter {
    context: Box<dyn UnitContext>,
    cache: RwLock<HashMap<(FontKey, u32), DialogBaseUnits>>,
}

impl UnitConverter {
    pub fn new(context: impl UnitContext + 'static) -> Self {
        Self {
            context: Box::new(context),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The context conversions read from.
    pub fn context(&self) -> &dyn UnitContext {
        self.context.as_ref()
    }

    /// Convert `value` in `unit` to pixels along `axis`.
    pub fn to_pixels(&self, value: f64, unit: Unit, axis: Axis) -> i32 {
        match unit {
            Unit::Pixel => value.round() as i32,
            Unit::Point => self.point_as_pixel(value),
            Unit::Millimeter => self.millimeter_as_pixel(value),
            Unit::Centimeter => self.centimeter_as_pixel(value),
            Unit::Inch => self.inch_as_pixel(value),
            Unit::DialogUnit => match axis {
                Axis::Column => self.dialog_units_x_as_pixel(value),
                Axis::Row => self.dialog_units_y_as_pixel(value),
            },
        }
    }

    pub fn inch_as_pixel(&self, inches: f64) -> i32 {
        (inches * self.dpi()).round() as i32
    }

    pub fn millimeter_as_pixel(&self, millimeters: f64) -> i32 {
        (millimeters * self.dpi() / 25.4).round() as i32
    }

    pub fn centimeter_as_pixel(&self, centimeters: f64) -> i32 {
        (centimeters * self.dpi() / 2.54).round() as i32
    }

    pub fn point_as_pixel(&self, points: f64) -> i32 {
        (points * self.dpi() / 72.0).round() as i32
    }

    pub fn dialog_units_x_as_pixel(&self, dlu: f64) -> i32 {
        (dlu * self.dialog_base_units().x / 4.0).round() as i32
    }

    pub fn dialog_units_y_as_pixel(&self, dlu: f64) -> i32 {
        (dlu * self.dialog_base_units().y / 8.0).round() as i32
    }

    /// Dialog base units of the current default font, measured on first use.
    pub fn dialog_base_units(&self) -> DialogBaseUnits {
        let key = (
            self.context.default_font(),
            self.context.screen_resolution(),
        );

        let cached = self
            .cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&key)
            .copied();
        if let Some(units) = cached {
            return units;
        }

        let units = DialogBaseUnits::from(self.context.font_metrics(&key.0));
        tracing::trace!(font = %key.0.family, dpi = key.1, x = units.x, y = units.y, "measured dialog base units");
        self.cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, units);
        units
    }

    /// Drop all cached dialog base units.
    pub fn invalidate(&self) {
        tracing::debug!("invalidating dialog base unit cache");
        self.cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    /// Number of (font, resolution) entries currently cached.
    pub fn cached_entries(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn dpi(&self) -> f64 {
        f64::from(self.context.screen_resolution())
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new(StaticUnitContext::default())
    }
}

impl fmt::Debug for UnitConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitConverter")
            .field("dpi", &self.context.screen_resolution())
            .field("font", &self.context.default_font())
            .field("cached_entries", &self.cached_entries())
            .finish()
    }
}
