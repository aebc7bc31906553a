//! Per-asset design specifications (nameplate data).
//!
//! Loaded from a YAML catalog keyed by asset tag. Used for operator-facing
//! readouts and, through [`crate::CurveConstants::from_design`], to
//! parameterize the performance curve per pump instead of the shared
//! station-wide nominal reference.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub type DesignResult<T> = Result<T, DesignError>;

#[derive(thiserror::Error, Debug)]
pub enum DesignError {
    #[error("Validation error: {what}")]
    Validation { what: &'static str },

    #[error("Unknown pump tag: {tag}")]
    UnknownPump { tag: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Nameplate data for one pump asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PumpDesignSpec {
    /// Duty flow at the best efficiency point (m³/h).
    pub design_flow_m3_h: f64,
    /// Duty head at the best efficiency point (m).
    pub design_head_m: f64,
    /// Speed the duty point is quoted at (rev/min).
    pub rated_rpm: f64,
    /// Upper end of the mechanical operating envelope (rev/min).
    pub max_rpm: f64,
    /// Lower end of the mechanical operating envelope (rev/min).
    pub min_rpm: f64,
    /// Manufacturer BEP efficiency (%).
    pub bep_efficiency_pct: f64,
}

/// Design-spec catalog for one station, keyed by asset tag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignCatalog {
    pub station: String,
    pub pumps: BTreeMap<String, PumpDesignSpec>,
}

impl DesignCatalog {
    /// Spec for the asset tagged `tag`.
    ///
    /// # Errors
    /// `DesignError::UnknownPump` when the tag is not in the catalog.
    pub fn get(&self, tag: &str) -> DesignResult<&PumpDesignSpec> {
        self.pumps.get(tag).ok_or_else(|| DesignError::UnknownPump {
            tag: tag.to_string(),
        })
    }
}

/// Check every spec in the catalog for physical plausibility.
pub fn validate_catalog(catalog: &DesignCatalog) -> DesignResult<()> {
    for spec in catalog.pumps.values() {
        validate_spec(spec)?;
    }
    Ok(())
}

fn validate_spec(spec: &PumpDesignSpec) -> DesignResult<()> {
    if !(spec.design_flow_m3_h > 0.0) {
        return Err(DesignError::Validation {
            what: "design_flow_m3_h must be positive",
        });
    }
    if !(spec.design_head_m > 0.0) {
        return Err(DesignError::Validation {
            what: "design_head_m must be positive",
        });
    }
    if !(spec.rated_rpm > 0.0) {
        return Err(DesignError::Validation {
            what: "rated_rpm must be positive",
        });
    }
    if spec.min_rpm < 0.0 {
        return Err(DesignError::Validation {
            what: "min_rpm cannot be negative",
        });
    }
    if !(spec.max_rpm > spec.min_rpm) {
        return Err(DesignError::Validation {
            what: "max_rpm must exceed min_rpm",
        });
    }
    if !(spec.bep_efficiency_pct > 0.0 && spec.bep_efficiency_pct <= 100.0) {
        return Err(DesignError::Validation {
            what: "bep_efficiency_pct must be in (0, 100]",
        });
    }
    Ok(())
}

pub fn load_yaml(path: &Path) -> DesignResult<DesignCatalog> {
    let content = std::fs::read_to_string(path)?;
    let catalog: DesignCatalog = serde_yaml::from_str(&content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

pub fn save_yaml(path: &Path, catalog: &DesignCatalog) -> DesignResult<()> {
    validate_catalog(catalog)?;
    let content = serde_yaml::to_string(catalog)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duty_spec() -> PumpDesignSpec {
        PumpDesignSpec {
            design_flow_m3_h: 2800.0,
            design_head_m: 27.0,
            rated_rpm: 1200.0,
            max_rpm: 1180.0,
            min_rpm: 600.0,
            bep_efficiency_pct: 84.0,
        }
    }

    #[test]
    fn valid_spec_passes() {
        assert!(validate_spec(&duty_spec()).is_ok());
    }

    #[test]
    fn inverted_envelope_rejected() {
        let mut spec = duty_spec();
        spec.min_rpm = 1180.0;
        spec.max_rpm = 600.0;
        let err = validate_spec(&spec).unwrap_err();
        assert!(err.to_string().contains("max_rpm"));
    }

    #[test]
    fn nan_flow_rejected() {
        // `!(x > 0.0)` catches NaN as well as non-positive values.
        let mut spec = duty_spec();
        spec.design_flow_m3_h = f64::NAN;
        assert!(validate_spec(&spec).is_err());
    }

    #[test]
    fn catalog_lookup() {
        let mut catalog = DesignCatalog {
            station: "Eastside lift station".to_string(),
            pumps: BTreeMap::new(),
        };
        catalog.pumps.insert("PU1".to_string(), duty_spec());

        assert!(catalog.get("PU1").is_ok());
        let err = catalog.get("PU9").unwrap_err();
        assert!(matches!(err, DesignError::UnknownPump { .. }));
    }
}
