//! Font-backed text measurement.
//!
//! `ShapingMetrics` shapes text with rustybuzz against real font files and
//! implements `TextMetricsProvider`, so the layout engine can measure with the
//! same glyph advances a renderer would use.
//!
//! Fonts come from two places:
//! - **Registered fonts**: raw font bytes handed over by the caller
//! - **System fonts** (feature: `system-fonts`): discovered through fontdb
//!
//! A family found in neither reports `MetricsError::Unavailable`, which makes
//! the measurer fall back to its estimate.

use carelabel_traits::{MetricsError, TextMetricsProvider};
use rustybuzz::UnicodeBuffer;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Font bytes plus the face index inside them.
#[derive(Clone)]
struct FontSource {
    data: Arc<Vec<u8>>,
    index: u32,
}

impl std::fmt::Debug for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSource")
            .field("data_len", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

#[derive(Clone)]
pub struct ShapingMetrics {
    #[cfg(feature = "system-fonts")]
    db: Arc<RwLock<fontdb::Database>>,

    /// Loaded faces keyed by lowercased family name.
    faces: Arc<RwLock<HashMap<String, FontSource>>>,
}

impl std::fmt::Debug for ShapingMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let families: Vec<String> = self
            .faces
            .read()
            .map(|faces| faces.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("ShapingMetrics")
            .field("families", &families)
            .finish()
    }
}

impl ShapingMetrics {
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "system-fonts")]
            db: Arc::new(RwLock::new(fontdb::Database::new())),
            faces: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Enables system font discovery.
    ///
    /// Only available with the `system-fonts` feature enabled.
    #[cfg(feature = "system-fonts")]
    pub fn with_system_fonts(self, enable: bool) -> Self {
        if enable && let Ok(mut db) = self.db.write() {
            db.load_system_fonts();
            log::debug!("Loaded {} system font faces", db.len());
        }
        self
    }

    /// Adds every font in a directory to the system font database.
    #[cfg(all(feature = "system-fonts", not(target_arch = "wasm32")))]
    pub fn add_font_dir<P: AsRef<std::path::Path>>(&self, path: P) {
        if let Ok(mut db) = self.db.write() {
            db.load_fonts_dir(path);
        }
    }

    /// Registers a font from raw bytes and returns the family name it serves.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::InvalidFont` if the bytes are not a parseable
    /// font or carry no family name.
    pub fn register_font(&self, data: Vec<u8>) -> Result<String, MetricsError> {
        let family = family_name(&data)?;
        log::debug!("Registering font family '{}' ({} bytes)", family, data.len());
        let source = FontSource {
            data: Arc::new(data),
            index: 0,
        };
        if let Ok(mut faces) = self.faces.write() {
            faces.insert(family.to_lowercase(), source);
        }
        Ok(family)
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.resolve(family).is_ok()
    }

    fn resolve(&self, family: &str) -> Result<FontSource, MetricsError> {
        let key = family.to_lowercase();
        if let Ok(faces) = self.faces.read()
            && let Some(source) = faces.get(&key)
        {
            return Ok(source.clone());
        }

        #[cfg(feature = "system-fonts")]
        {
            if let Some(source) = self.resolve_from_fontdb(family) {
                if let Ok(mut faces) = self.faces.write() {
                    faces.insert(key, source.clone());
                }
                return Ok(source);
            }
        }

        Err(MetricsError::Unavailable {
            family: family.to_string(),
        })
    }

    #[cfg(feature = "system-fonts")]
    fn resolve_from_fontdb(&self, family: &str) -> Option<FontSource> {
        let db = self.db.read().ok()?;
        let id = db.query(&fontdb::Query {
            families: &[fontdb::Family::Name(family)],
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        })?;
        let source = db.with_face_data(id, |data, index| FontSource {
            data: Arc::new(data.to_vec()),
            index,
        })?;
        log::debug!("Resolved '{}' through fontdb: {:?}", family, source);
        Some(source)
    }
}

impl Default for ShapingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetricsProvider for ShapingMetrics {
    fn measure_width_px(
        &self,
        text: &str,
        font_family: &str,
        font_size_px: f64,
    ) -> Result<f64, MetricsError> {
        let source = self.resolve(font_family)?;
        let face = rustybuzz::Face::from_slice(&source.data, source.index).ok_or_else(|| {
            MetricsError::Failed {
                text: text.to_string(),
                message: format!("font for '{}' could not be opened", font_family),
            }
        })?;

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        let glyphs = rustybuzz::shape(&face, &[], buffer);

        let units: i64 = glyphs
            .glyph_positions()
            .iter()
            .map(|p| i64::from(p.x_advance))
            .sum();
        let scale = font_size_px / f64::from(face.units_per_em());
        Ok(units as f64 * scale)
    }

    fn name(&self) -> &'static str {
        "ShapingMetrics"
    }
}

/// Reads the family name (name id 1) from font bytes.
fn family_name(data: &[u8]) -> Result<String, MetricsError> {
    let face = ttf_parser::Face::parse(data, 0)
        .map_err(|e| MetricsError::InvalidFont(e.to_string()))?;
    face.names()
        .into_iter()
        .filter(|n| n.name_id == ttf_parser::name_id::FAMILY)
        .find_map(|n| n.to_string())
        .ok_or_else(|| MetricsError::InvalidFont("font has no family name".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_family_is_unavailable() {
        let metrics = ShapingMetrics::new();
        let result = metrics.measure_width_px("abc", "Definitely Not A Font", 12.0);
        assert!(matches!(result, Err(MetricsError::Unavailable { .. })));
        assert!(!metrics.has_family("Definitely Not A Font"));
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let metrics = ShapingMetrics::new();
        let result = metrics.register_font(vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(MetricsError::InvalidFont(_))));
    }

    #[test]
    fn test_falls_back_through_measurer() {
        let metrics = ShapingMetrics::new();
        let config = crate::LayoutConfig::default();
        let measurer = crate::TextMeasurer::new(&metrics, &config);
        let m = measurer.measure("abc", &carelabel_style::Typography::default());
        assert!(m.approximate);
        assert_eq!(metrics.name(), "ShapingMetrics");
    }
}
