//! Key bindings translated into live option updates.

use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use starlit_core::{Config, ConfigPatch, Direction, SizeClass, SizePatch, SizeSpec};

/// Backgrounds cycled with `b`.
const BACKGROUNDS: &[&str] = &["#141d27", "#000000", "#0b1026", "hsl(260, 40%, 12%)"];

/// Star colors cycled with `c`.
const STAR_COLORS: &[&str] = &[
    "#ffffff",
    "rgb(255, 236, 200)",
    "hsl(200, 80%, 80%)",
    "#ffd27f",
];

/// Factor applied to every speed by `f` and `F`.
const SPEED_STEP: f64 = 1.25;

/// What a key press asks the app to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Update(ConfigPatch),
}

/// Key handling state: the position in each palette.
#[derive(Debug, Default)]
pub struct Controls {
    background: usize,
    color: usize,
}

impl Controls {
    /// Map a key press to an action against the field's current config.
    pub fn handle_key(&mut self, key: KeyEvent, config: &Config) -> Option<Action> {
        let action = match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => Action::Quit,
            (_, KeyCode::Char('s')) => Action::Update(ConfigPatch::direction(Direction::Stop)),
            (_, KeyCode::Char('r')) => Action::Update(steer(config, Direction::Random)),
            (_, KeyCode::Down) => Action::Update(steer(config, Direction::Angle(0.0))),
            (_, KeyCode::Left) => Action::Update(steer(config, Direction::Angle(90.0))),
            (_, KeyCode::Up) => Action::Update(steer(config, Direction::Angle(180.0))),
            (_, KeyCode::Right) => Action::Update(steer(config, Direction::Angle(270.0))),
            (_, KeyCode::Char('+') | KeyCode::Char('=')) => {
                Action::Update(each_size(config, |spec| SizePatch {
                    amount: Some(spec.amount.saturating_mul(2).max(1)),
                    ..SizePatch::default()
                }))
            }
            (_, KeyCode::Char('-')) => Action::Update(each_size(config, |spec| SizePatch {
                amount: Some(spec.amount / 2),
                ..SizePatch::default()
            })),
            (_, KeyCode::Char('f')) => Action::Update(each_size(config, |spec| SizePatch {
                speed: Some(spec.speed * SPEED_STEP),
                ..SizePatch::default()
            })),
            (_, KeyCode::Char('F')) => Action::Update(each_size(config, |spec| SizePatch {
                speed: Some(spec.speed / SPEED_STEP),
                ..SizePatch::default()
            })),
            (_, KeyCode::Char('b')) => {
                self.background = (self.background + 1) % BACKGROUNDS.len();
                Action::Update(ConfigPatch::background(BACKGROUNDS[self.background]))
            }
            (_, KeyCode::Char('c')) => {
                self.color = (self.color + 1) % STAR_COLORS.len();
                let color = STAR_COLORS[self.color];
                Action::Update(each_size(config, |_| SizePatch {
                    color: Some(color.to_string()),
                    ..SizePatch::default()
                }))
            }
            _ => return None,
        };
        Some(action)
    }
}

/// Patch every recognized size class from its current spec.
fn each_size(config: &Config, patch: impl Fn(&SizeSpec) -> SizePatch) -> ConfigPatch {
    let sizes: BTreeMap<String, SizePatch> = config
        .sizes
        .iter()
        .filter(|(name, _)| SizeClass::from_name(name).is_some())
        .map(|(name, spec)| (name.clone(), patch(spec)))
        .collect();
    ConfigPatch {
        sizes: Some(sizes),
        ..ConfigPatch::default()
    }
}

/// Change direction. Stopped stars have lost their speed, so leaving the
/// stopped state also restates the speeds, which regenerates the field.
fn steer(config: &Config, direction: Direction) -> ConfigPatch {
    let mut patch = if config.direction == Direction::Stop {
        each_size(config, |spec| SizePatch {
            speed: Some(spec.speed),
            ..SizePatch::default()
        })
    } else {
        ConfigPatch::default()
    };
    patch.direction = Some(direction);
    patch
}
