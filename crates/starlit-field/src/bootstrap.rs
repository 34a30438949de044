//! Entry point that mounts a star field by selector.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starlit_core::{Config, ConfigPatch};
use tracing::debug;

use crate::field::StarField;
use crate::host::Document;

/// Mount a star field in the element matching `options.container`.
///
/// `options` is merged over the built-in defaults. Returns `None` when no
/// selector is given or nothing in `document` matches it.
pub fn bootstrap<D, R>(
    document: &D,
    options: &ConfigPatch,
    rng: R,
) -> Option<StarField<D::Element, R>>
where
    D: Document,
    R: Rng,
{
    let config = Config::from_patch(options);

    let Some(selector) = config.container.as_deref() else {
        debug!("no container selector given, star field not mounted");
        return None;
    };
    let Some(container) = document.query_selector(selector) else {
        debug!(selector, "no element matches container selector");
        return None;
    };

    Some(StarField::new(container, config, rng))
}

/// [`bootstrap`] with a ChaCha generator, seeded when `seed` is given.
pub fn bootstrap_seeded<D: Document>(
    document: &D,
    options: &ConfigPatch,
    seed: Option<u64>,
) -> Option<StarField<D::Element>> {
    let rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    bootstrap(document, options, rng)
}
