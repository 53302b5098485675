use crate::DocumentError;
use carelabel_style::BreakSymbol;
use carelabel_style::parsers::parse_percentage;
use carelabel_types::units::round6;
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, de};

/// One fibre in a garment composition, e.g. `60% COTTON`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MaterialShare {
    pub material: String,
    pub percentage: f64,
}

impl MaterialShare {
    pub fn new(material: impl Into<String>, percentage: f64) -> Self {
        Self {
            material: material.into(),
            percentage,
        }
    }

    pub fn label(&self) -> String {
        format!("{}% {}", self.percentage, self.material.to_uppercase())
    }
}

impl<'de> Deserialize<'de> for MaterialShare {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PercentageDef {
            Num(f64),
            Str(String),
        }

        #[derive(Deserialize)]
        struct MaterialShareDef {
            material: String,
            percentage: PercentageDef,
        }

        let def = MaterialShareDef::deserialize(deserializer)?;
        let percentage = match def.percentage {
            PercentageDef::Num(n) => n,
            PercentageDef::Str(s) => parse_percentage("percentage", &s).map_err(de::Error::custom)?,
        };
        Ok(MaterialShare::new(def.material, percentage))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompositionPayload {
    pub materials: Vec<MaterialShare>,
    /// Wrapped lines committed by the last save.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<String>,
}

impl CompositionPayload {
    pub fn new(materials: Vec<MaterialShare>) -> Self {
        Self {
            materials,
            lines: Vec::new(),
        }
    }

    pub fn total_percentage(&self) -> f64 {
        round6(self.materials.iter().map(|m| m.percentage).sum())
    }

    /// A composition is complete when materials are unique and sum to exactly 100.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.materials.is_empty() {
            return Err(DocumentError::InvalidComposition(
                "at least one material is required".to_string(),
            ));
        }
        if let Some(share) = self
            .materials
            .iter()
            .find(|m| m.material.trim().is_empty() || !(m.percentage > 0.0))
        {
            return Err(DocumentError::InvalidComposition(format!(
                "invalid entry '{}' at {}%",
                share.material, share.percentage
            )));
        }
        if let Some(duplicate) = self
            .materials
            .iter()
            .map(|m| m.material.trim().to_lowercase())
            .duplicates()
            .next()
        {
            return Err(DocumentError::InvalidComposition(format!(
                "material '{}' is listed more than once",
                duplicate
            )));
        }
        let total = self.total_percentage();
        if total != 100.0 {
            return Err(DocumentError::InvalidComposition(format!(
                "percentages sum to {}%, expected 100%",
                total
            )));
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// One `"{pct}% {MATERIAL}"` entry per material, joined by the break separator.
    pub fn text(&self, symbol: &BreakSymbol) -> String {
        let labels: Vec<String> = self.materials.iter().map(MaterialShare::label).collect();
        symbol.join(&labels)
    }
}
