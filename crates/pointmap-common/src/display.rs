//! User-controlled display parameters, layer toggles, and derived view summaries.

use serde::{Deserialize, Serialize};

use crate::error::{PointMapError, PointMapResult};

/// Radius and blur settings for the two layers.
///
/// Fields are private so every mutation goes through a validating setter:
/// radii must be finite and strictly positive, blur finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayParameters {
    marker_radius: f64,
    heat_radius: f64,
    heat_blur: f64,
}

impl DisplayParameters {
    pub fn new(marker_radius: f64, heat_radius: f64, heat_blur: f64) -> PointMapResult<Self> {
        let mut params = Self::default();
        params.set_marker_radius(marker_radius)?;
        params.set_heat_radius(heat_radius)?;
        params.set_heat_blur(heat_blur)?;
        Ok(params)
    }

    pub fn marker_radius(&self) -> f64 {
        self.marker_radius
    }

    pub fn heat_radius(&self) -> f64 {
        self.heat_radius
    }

    pub fn heat_blur(&self) -> f64 {
        self.heat_blur
    }

    pub fn set_marker_radius(&mut self, value: f64) -> PointMapResult<()> {
        self.marker_radius = positive("marker_radius", value)?;
        Ok(())
    }

    pub fn set_heat_radius(&mut self, value: f64) -> PointMapResult<()> {
        self.heat_radius = positive("heat_radius", value)?;
        Ok(())
    }

    pub fn set_heat_blur(&mut self, value: f64) -> PointMapResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(PointMapError::InvalidParameter {
                param: "heat_blur".to_string(),
                message: format!("must be a finite value >= 0, got {}", value),
            });
        }
        self.heat_blur = value;
        Ok(())
    }
}

fn positive(param: &str, value: f64) -> PointMapResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PointMapError::InvalidParameter {
            param: param.to_string(),
            message: format!("must be a finite value > 0, got {}", value),
        });
    }
    Ok(value)
}

impl Default for DisplayParameters {
    fn default() -> Self {
        Self {
            marker_radius: 5.0,
            heat_radius: 25.0,
            heat_blur: 15.0,
        }
    }
}

/// Which of the two layers the viewer wants visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleState {
    pub show_markers: bool,
    pub show_density: bool,
}

impl ToggleState {
    pub fn new(show_markers: bool, show_density: bool) -> Self {
        Self {
            show_markers,
            show_density,
        }
    }
}

impl Default for ToggleState {
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// Human-readable name for the combination of visible layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositeLabel {
    #[serde(rename = "Points + Heat")]
    PointsAndHeat,
    #[serde(rename = "Points")]
    Points,
    #[serde(rename = "Heat")]
    Heat,
    #[serde(rename = "Hidden")]
    Hidden,
}

impl CompositeLabel {
    /// Derived from the toggles alone, whether or not a density layer exists.
    pub fn from_toggles(toggles: ToggleState) -> Self {
        match (toggles.show_markers, toggles.show_density) {
            (true, true) => CompositeLabel::PointsAndHeat,
            (true, false) => CompositeLabel::Points,
            (false, true) => CompositeLabel::Heat,
            (false, false) => CompositeLabel::Hidden,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompositeLabel::PointsAndHeat => "Points + Heat",
            CompositeLabel::Points => "Points",
            CompositeLabel::Heat => "Heat",
            CompositeLabel::Hidden => "Hidden",
        }
    }
}

impl std::fmt::Display for CompositeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// KPI readout derived from the canonical set and the current toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSummary {
    pub location_count: usize,
    pub composite_label: CompositeLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_label_truth_table() {
        let cases = [
            (true, true, "Points + Heat"),
            (true, false, "Points"),
            (false, true, "Heat"),
            (false, false, "Hidden"),
        ];
        for (markers, density, expected) in cases {
            let label = CompositeLabel::from_toggles(ToggleState::new(markers, density));
            assert_eq!(label.to_string(), expected);
        }
    }

    #[test]
    fn test_label_serializes_as_text() {
        let json = serde_json::to_string(&CompositeLabel::PointsAndHeat).unwrap();
        assert_eq!(json, "\"Points + Heat\"");
    }

    #[test]
    fn test_rejected_setter_keeps_previous_value() {
        let mut params = DisplayParameters::default();
        assert!(params.set_marker_radius(0.0).is_err());
        assert!(params.set_heat_radius(-1.0).is_err());
        assert!(params.set_heat_blur(f64::NAN).is_err());
        assert_eq!(params, DisplayParameters::default());
    }

    #[test]
    fn test_zero_blur_allowed() {
        let params = DisplayParameters::new(3.0, 10.0, 0.0).unwrap();
        assert_eq!(params.heat_blur(), 0.0);
    }
}
