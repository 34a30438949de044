//! Complete star field configuration.

use std::collections::BTreeMap;

use crate::{ConfigPatch, Direction, Merge};

/// Background color used when nothing overrides it.
pub const DEFAULT_BACKGROUND: &str = "#141d27";

/// Size classes the engine knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// All recognized classes, smallest first.
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    /// Resolve a configuration key to a size class.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }

    /// Configuration key for this class.
    pub fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Star radius in surface pixels.
    pub fn radius(self) -> f64 {
        match self {
            Self::Small => 0.5,
            Self::Medium => 1.0,
            Self::Large => 1.5,
        }
    }

    fn default_speed(self) -> f64 {
        match self {
            Self::Small => 0.8,
            Self::Medium => 0.6,
            Self::Large => 0.5,
        }
    }
}

/// Settings for one size class.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeSpec {
    /// Number of stars to generate.
    pub amount: u32,
    /// Fill color, any CSS-style color string.
    pub color: String,
    /// Surface pixels travelled per frame.
    pub speed: f64,
    /// Half period of the opacity oscillation in milliseconds, `0` disables it.
    pub blink: u32,
}

impl SizeSpec {
    /// Spec a patch is merged into when its key has no existing entry.
    pub fn empty() -> Self {
        Self {
            amount: 0,
            color: "#ffffff".to_string(),
            speed: 0.0,
            blink: 0,
        }
    }

    fn default_for(class: SizeClass) -> Self {
        Self {
            amount: 50,
            color: "#ffffff".to_string(),
            speed: class.default_speed(),
            blink: 2000,
        }
    }
}

/// The complete configuration a star field runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Selector of the element hosting the surface. Fixed once mounted.
    pub container: Option<String>,
    /// Color painted behind the stars each frame.
    pub background: String,
    /// Drift direction shared by generated stars.
    pub direction: Direction,
    /// Size class settings keyed by class name. Unknown names are kept but never drawn.
    pub sizes: BTreeMap<String, SizeSpec>,
}

impl Default for Config {
    fn default() -> Self {
        let sizes = SizeClass::ALL
            .into_iter()
            .map(|class| (class.name().to_string(), SizeSpec::default_for(class)))
            .collect();

        Self {
            container: None,
            background: DEFAULT_BACKGROUND.to_string(),
            direction: Direction::default(),
            sizes,
        }
    }
}

impl Config {
    /// Built-in defaults with `patch` merged on top.
    pub fn from_patch(patch: &ConfigPatch) -> Self {
        let mut config = Self::default();
        config.merge(patch);
        config
    }

    /// Total number of stars a regeneration produces.
    pub fn star_count(&self) -> usize {
        self.sizes
            .iter()
            .filter(|(name, _)| SizeClass::from_name(name).is_some())
            .map(|(_, spec)| spec.amount as usize)
            .sum()
    }
}
