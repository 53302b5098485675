//! Defines lengths and padding for block layout rules.
use crate::{StyleError, parsers, require};
use carelabel_types::units::percent_of;
use serde::{Deserialize, Deserializer, Serialize, de};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "mm")]
    Mm,
    #[serde(rename = "%")]
    Percent,
}

/// A width or height in millimeters or as a percentage of the enclosing region.
///
/// Percentages are resolved at the point of use against the region dimension
/// they are relative to and never cached.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub fn mm(value: f64) -> Self {
        Self::new(value, LengthUnit::Mm)
    }

    pub fn percent(value: f64) -> Self {
        Self::new(value, LengthUnit::Percent)
    }

    /// 100% of the reference dimension.
    pub fn full() -> Self {
        Self::percent(100.0)
    }

    /// Resolves this length to millimeters against `reference_mm`.
    pub fn resolve(&self, reference_mm: f64) -> f64 {
        match self.unit {
            LengthUnit::Mm => self.value,
            LengthUnit::Percent => percent_of(self.value, reference_mm),
        }
    }

    pub fn validate(&self, what: &str) -> Result<(), StyleError> {
        require(self.value.is_finite() && self.value > 0.0, || {
            format!("{} must be positive, got {}", what, self.value)
        })?;
        if self.unit == LengthUnit::Percent {
            require(self.value <= 100.0, || {
                format!("{} cannot exceed 100%, got {}%", what, self.value)
            })?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum LengthDef {
            Str(String),
            Num(f64),
            Map {
                value: f64,
                #[serde(default)]
                unit: LengthUnit,
            },
        }

        match LengthDef::deserialize(deserializer)? {
            LengthDef::Str(s) => {
                parsers::run_parser(parsers::parse_length, &s).map_err(de::Error::custom)
            }
            LengthDef::Num(value) => Ok(Length::mm(value)),
            LengthDef::Map { value, unit } => Ok(Length::new(value, unit)),
        }
    }
}

/// Inner spacing of a block, in millimeters.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self::all(2.0)
    }
}

impl Padding {
    pub fn all(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn zero() -> Self {
        Self::all(0.0)
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            require(value.is_finite() && value >= 0.0, || {
                format!("padding {} must be non-negative, got {}", side, value)
            })?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Padding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PaddingVisitor;
        impl<'de> de::Visitor<'de> for PaddingVisitor {
            type Value = Padding;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string like '2mm' or '2mm 3mm', a number, or a map")
            }

            fn visit_str<E>(self, value: &str) -> Result<Padding, E>
            where
                E: de::Error,
            {
                parsers::parse_shorthand_padding(value).map_err(E::custom)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Padding, E>
            where
                E: de::Error,
            {
                Ok(Padding::all(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Padding, E>
            where
                E: de::Error,
            {
                Ok(Padding::all(value as f64))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Padding, E>
            where
                E: de::Error,
            {
                Ok(Padding::all(value as f64))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Padding, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut padding = Padding::zero();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "top" => padding.top = map.next_value()?,
                        "right" => padding.right = map.next_value()?,
                        "bottom" => padding.bottom = map.next_value()?,
                        "left" => padding.left = map.next_value()?,
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(padding)
            }
        }
        deserializer.deserialize_any(PaddingVisitor)
    }
}
