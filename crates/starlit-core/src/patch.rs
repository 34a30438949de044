//! Partial configuration supplied by callers.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::Direction;
use crate::direction::deserialize_present;

/// Partial settings for one size class. Absent fields leave the target alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SizePatch {
    pub amount: Option<u32>,
    pub color: Option<String>,
    pub speed: Option<f64>,
    pub blink: Option<u32>,
}

/// Partial configuration.
///
/// `None` means the key was absent. `direction: Some(Direction::Stop)` is an
/// explicit `null` and differs from leaving the direction out.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    /// Selector of the mount point. Only honoured at bootstrap.
    pub container: Option<String>,
    pub background: Option<String>,
    #[serde(deserialize_with = "deserialize_present")]
    pub direction: Option<Direction>,
    pub sizes: Option<BTreeMap<String, SizePatch>>,
}

impl ConfigPatch {
    /// Patch that only changes the direction.
    pub fn direction(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Self::default()
        }
    }

    /// Patch that only changes the background.
    pub fn background(background: impl Into<String>) -> Self {
        Self {
            background: Some(background.into()),
            ..Self::default()
        }
    }

    /// Patch touching a single size class.
    pub fn size(name: impl Into<String>, size: SizePatch) -> Self {
        Self {
            sizes: Some(BTreeMap::from([(name.into(), size)])),
            ..Self::default()
        }
    }

    /// The size patch for `name`, if the patch carries one.
    pub fn size_patch(&self, name: &str) -> Option<&SizePatch> {
        self.sizes.as_ref().and_then(|sizes| sizes.get(name))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
