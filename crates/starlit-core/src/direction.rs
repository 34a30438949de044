//! Star drift direction and its sentinel encodings.

use serde::{Deserialize, Deserializer, de};

/// Numeric sentinel that asks for a random direction per star.
const RANDOM_SENTINEL: f64 = -1.0;

/// Direction in which stars drift.
///
/// Serialized as a number of degrees, where `-1` means [`Direction::Random`]
/// and `null` means [`Direction::Stop`]. The strings `"random"` and `"stop"`
/// are accepted too, since TOML has no null.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    /// Fixed angle in degrees. `0` points down the screen.
    Angle(f64),
    /// Every star picks its own direction in `[0, 360)`.
    Random,
    /// No movement at all.
    Stop,
}

impl Default for Direction {
    fn default() -> Self {
        Self::Angle(0.0)
    }
}

impl Direction {
    /// Interpret a raw degree value, honouring the `-1` sentinel.
    pub fn from_degrees(degrees: f64) -> Self {
        if degrees == RANDOM_SENTINEL {
            Self::Random
        } else {
            Self::Angle(degrees)
        }
    }

    /// The fixed angle, if this direction has one.
    pub fn degrees(self) -> Option<f64> {
        match self {
            Self::Angle(degrees) => Some(degrees),
            Self::Random | Self::Stop => None,
        }
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Degrees(f64),
            Keyword(String),
        }

        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(Self::Stop),
            Some(Raw::Degrees(degrees)) => Ok(Self::from_degrees(degrees)),
            Some(Raw::Keyword(word)) => match word.to_ascii_lowercase().as_str() {
                "random" => Ok(Self::Random),
                "stop" | "none" => Ok(Self::Stop),
                _ => Err(de::Error::invalid_value(
                    de::Unexpected::Str(&word),
                    &"a number of degrees, -1, null, \"random\" or \"stop\"",
                )),
            },
        }
    }
}

/// Deserialize a present key into `Some`, keeping `null` as [`Direction::Stop`].
///
/// Paired with `#[serde(default)]` so that an absent key stays `None`.
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Direction>, D::Error>
where
    D: Deserializer<'de>,
{
    Direction::deserialize(deserializer).map(Some)
}
