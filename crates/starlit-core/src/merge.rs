//! Recursive merging of partial configuration.
//!
//! Nested values recurse, and every other value present in the source
//! overwrites the target. Absent values never touch the target.

use std::collections::BTreeMap;

use crate::{Config, ConfigPatch, SizePatch, SizeSpec};

/// Fold a (partial) source into `self`.
pub trait Merge<Source: ?Sized = Self> {
    /// Merge `source` into `self` and return the updated target.
    fn merge(&mut self, source: &Source) -> &mut Self;
}

fn overwrite<T: Clone>(target: &mut T, source: &Option<T>) {
    if let Some(value) = source {
        *target = value.clone();
    }
}

fn overwrite_option<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if source.is_some() {
        target.clone_from(source);
    }
}

impl Merge<SizePatch> for SizeSpec {
    fn merge(&mut self, source: &SizePatch) -> &mut Self {
        overwrite(&mut self.amount, &source.amount);
        overwrite(&mut self.color, &source.color);
        if let Some(speed) = source.speed {
            self.speed = speed.max(0.0);
        }
        overwrite(&mut self.blink, &source.blink);
        self
    }
}

impl Merge<BTreeMap<String, SizePatch>> for BTreeMap<String, SizeSpec> {
    fn merge(&mut self, source: &BTreeMap<String, SizePatch>) -> &mut Self {
        for (name, patch) in source {
            self.entry(name.clone())
                .or_insert_with(SizeSpec::empty)
                .merge(patch);
        }
        self
    }
}

impl Merge<ConfigPatch> for Config {
    fn merge(&mut self, source: &ConfigPatch) -> &mut Self {
        overwrite_option(&mut self.container, &source.container);
        overwrite(&mut self.background, &source.background);
        overwrite(&mut self.direction, &source.direction);
        if let Some(sizes) = &source.sizes {
            self.sizes.merge(sizes);
        }
        self
    }
}

impl Merge for SizePatch {
    fn merge(&mut self, source: &SizePatch) -> &mut Self {
        overwrite_option(&mut self.amount, &source.amount);
        overwrite_option(&mut self.color, &source.color);
        overwrite_option(&mut self.speed, &source.speed);
        overwrite_option(&mut self.blink, &source.blink);
        self
    }
}

impl Merge for ConfigPatch {
    fn merge(&mut self, source: &ConfigPatch) -> &mut Self {
        overwrite_option(&mut self.container, &source.container);
        overwrite_option(&mut self.background, &source.background);
        overwrite_option(&mut self.direction, &source.direction);
        if let Some(source_sizes) = &source.sizes {
            let sizes = self.sizes.get_or_insert_with(BTreeMap::new);
            for (name, patch) in source_sizes {
                sizes.entry(name.clone()).or_default().merge(patch);
            }
        }
        self
    }
}
