//! Star field engine.

use std::collections::BTreeMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use starlit_core::{Config, ConfigPatch, Direction, Merge, SizeClass, SizeSpec};
use tracing::{debug, trace};

use crate::color::apply_opacity;
use crate::frame::FrameLoop;
use crate::host::{Container, Size, Surface};
use crate::star::{MAX_PHASE_DELAY_MS, Star};

/// Animated star field mounted in a container.
pub struct StarField<C: Container, R: Rng = ChaCha8Rng> {
    /// Element hosting the surface.
    container: C,
    /// Surface the stars are painted on.
    surface: C::Surface,
    /// Merged configuration.
    config: Config,
    /// Surface dimensions, tracking the container's client box.
    size: Size,
    /// Stars in draw order.
    stars: Vec<Star>,
    /// Source of every random draw.
    rng: R,
    /// Frame loop state.
    frames: FrameLoop,
}

impl<C: Container, R: Rng> StarField<C, R> {
    /// Mount a surface in `container`, generate the stars and start the loop.
    pub fn new(container: C, config: Config, mut rng: R) -> Self {
        let mut surface = container.mount_surface();
        let size = container.client_size();
        surface.resize(size);

        let stars = generate_stars(&config.sizes, config.direction, size, &mut rng);
        debug!(
            width = size.width,
            height = size.height,
            stars = stars.len(),
            "star field mounted"
        );

        Self {
            container,
            surface,
            config,
            size,
            stars,
            rng,
            frames: FrameLoop::started(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn surface(&self) -> &C::Surface {
        &self.surface
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn frames(&self) -> &FrameLoop {
        &self.frames
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    /// Stop the frame loop. Later ticks do nothing.
    pub fn cancel(&mut self) {
        debug!("star field loop cancelled");
        self.frames.cancel();
    }

    /// Frame callback. Animates one frame and returns whether the host
    /// should schedule another.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.frames.begin_frame(now_ms) {
            return false;
        }
        self.animate_stars(now_ms);
        true
    }

    /// Match the surface to the container's current client box.
    pub fn resize_canvas(&mut self) {
        let size = self.container.client_size();
        if size != self.size {
            trace!(width = size.width, height = size.height, "resizing surface");
        }
        self.size = size;
        self.surface.resize(size);
    }

    /// Resize the surface and rescale star positions to the new box.
    pub fn handle_resize(&mut self) {
        let old = self.size;
        self.resize_canvas();
        let new = self.size;

        let scale_x = axis_scale(old.width, new.width);
        let scale_y = axis_scale(old.height, new.height);
        for star in &mut self.stars {
            star.x *= scale_x;
            star.y *= scale_y;
        }
        debug!(scale_x, scale_y, "rescaled stars after resize");
    }

    /// Replace every star with a fresh generation from the current config.
    pub fn regenerate(&mut self) {
        self.stars = generate_stars(
            &self.config.sizes,
            self.config.direction,
            self.size,
            &mut self.rng,
        );
    }

    /// Paint one frame: background, then every star, wrapping stars that
    /// left the surface.
    pub fn animate_stars(&mut self, now_ms: f64) {
        let width = self.size.width as f64;
        let height = self.size.height as f64;

        self.surface.clear_rect(0.0, 0.0, width, height);
        self.surface.set_fill_style(&self.config.background);
        self.surface.fill_rect(0.0, 0.0, width, height);

        for star in &mut self.stars {
            star.update(now_ms);
            draw_star(&mut self.surface, star);
            wrap_star(star, width, height, &mut self.rng);
        }
    }

    /// Merge `options` into the running field.
    ///
    /// Stars are patched in place where possible. A patch carrying `sizes`
    /// always ends in a full regeneration, which overrides the in-place
    /// patch applied just before it.
    pub fn update_options(&mut self, options: &ConfigPatch) {
        let mut patch = options.clone();
        if let Some(container) = patch.container.take() {
            debug!(container = %container, "ignoring container change on a mounted field");
        }
        self.config.merge(&patch);

        if patch.direction == Some(Direction::Stop) {
            for star in &mut self.stars {
                star.direction = None;
                star.speed = 0.0;
            }
        } else {
            for star in &mut self.stars {
                if let Some(size) = patch.size_patch(star.class.name()) {
                    if let Some(color) = &size.color {
                        star.color.clone_from(color);
                    }
                    if let Some(speed) = size.speed {
                        star.speed = speed.max(0.0);
                    }
                }
                match patch.direction {
                    Some(Direction::Random) => {
                        star.direction = Some(random_direction(&mut self.rng));
                    }
                    Some(Direction::Angle(degrees)) => star.direction = Some(degrees),
                    Some(Direction::Stop) | None => {}
                }
            }
        }

        if patch.sizes.is_some() {
            self.regenerate();
            debug!(stars = self.stars.len(), "regenerated stars from new sizes");
        }
    }
}

/// Scale factor for one axis, `1` when the old extent was empty.
fn axis_scale(old: u32, new: u32) -> f64 {
    if old == 0 {
        1.0
    } else {
        new as f64 / old as f64
    }
}

fn random_direction<R: Rng>(rng: &mut R) -> f64 {
    rng.r#gen::<f64>() * 360.0
}

/// Create the stars for every recognized size class.
pub(crate) fn generate_stars<R: Rng>(
    sizes: &BTreeMap<String, SizeSpec>,
    direction: Direction,
    size: Size,
    rng: &mut R,
) -> Vec<Star> {
    let width = size.width as f64;
    let height = size.height as f64;
    let mut stars = Vec::new();

    for (name, spec) in sizes {
        let Some(class) = SizeClass::from_name(name) else {
            trace!(name = %name, "skipping unknown size class");
            continue;
        };

        for _ in 0..spec.amount {
            let (direction, speed) = match direction {
                Direction::Random => (Some(random_direction(rng)), spec.speed),
                Direction::Stop => (None, 0.0),
                Direction::Angle(degrees) => (Some(degrees), spec.speed),
            };
            stars.push(Star {
                class,
                x: rng.r#gen::<f64>() * width,
                y: rng.r#gen::<f64>() * height,
                color: spec.color.clone(),
                radius: class.radius(),
                direction,
                speed,
                blink: spec.blink,
                opacity: 1.0,
                phase_delay: rng.r#gen::<f64>() * MAX_PHASE_DELAY_MS,
            });
        }
    }

    stars
}

/// Fill the star's circle, folding its opacity into the paint.
pub(crate) fn draw_star<S: Surface>(surface: &mut S, star: &Star) {
    let paint = apply_opacity(&star.color, star.opacity);
    surface.set_fill_style(&paint.fill_style);
    match paint.global_alpha {
        Some(alpha) => {
            surface.set_global_alpha(alpha);
            surface.fill_circle(star.x, star.y, star.radius);
            surface.set_global_alpha(1.0);
        }
        None => surface.fill_circle(star.x, star.y, star.radius),
    }
}

/// Move a star that left the surface to the opposite edge.
///
/// A star re-entering horizontally gets a random height, otherwise one
/// re-entering vertically gets a random column.
fn wrap_star<R: Rng>(star: &mut Star, width: f64, height: f64, rng: &mut R) {
    let mut wrapped_x = true;
    if star.x < 0.0 {
        star.x = width;
    } else if star.x > width {
        star.x = 0.0;
    } else {
        wrapped_x = false;
    }

    let mut wrapped_y = true;
    if star.y < 0.0 {
        star.y = height;
    } else if star.y > height {
        star.y = 0.0;
    } else {
        wrapped_y = false;
    }

    if wrapped_x {
        star.y = rng.r#gen::<f64>() * height;
    } else if wrapped_y {
        star.x = rng.r#gen::<f64>() * width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use starlit_core::SizePatch;

    use crate::testing::{Command, TestContainer};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn field(width: u32, height: u32, config: Config) -> StarField<TestContainer> {
        StarField::new(TestContainer::new("sky", width, height), config, rng())
    }

    fn still_star(x: f64, y: f64) -> Star {
        Star {
            class: SizeClass::Small,
            x,
            y,
            color: "#ffffff".to_string(),
            radius: 0.5,
            direction: None,
            speed: 0.0,
            blink: 0,
            opacity: 1.0,
            phase_delay: 0.0,
        }
    }

    #[test]
    fn test_generation_counts_per_class() {
        let mut config = Config::default();
        config.merge(&ConfigPatch::size(
            "small",
            SizePatch {
                amount: Some(7),
                ..SizePatch::default()
            },
        ));
        config.merge(&ConfigPatch::size(
            "huge",
            SizePatch {
                amount: Some(40),
                ..SizePatch::default()
            },
        ));

        let field = field(200, 100, config);
        let count = |class: SizeClass| field.stars().iter().filter(|s| s.class == class).count();
        assert_eq!(count(SizeClass::Small), 7);
        assert_eq!(count(SizeClass::Medium), 50);
        assert_eq!(count(SizeClass::Large), 50);
        assert_eq!(field.stars().len(), 107);
        assert_eq!(field.stars().len(), field.config().star_count());
    }

    #[test]
    fn test_generation_positions_and_attributes() {
        let field = field(320, 180, Config::default());
        for star in field.stars() {
            assert!((0.0..320.0).contains(&star.x));
            assert!((0.0..180.0).contains(&star.y));
            assert!((0.0..MAX_PHASE_DELAY_MS).contains(&star.phase_delay));
            assert_eq!(star.radius, star.class.radius());
            assert_eq!(star.opacity, 1.0);
            assert_eq!(star.direction, Some(0.0));
            assert_eq!(star.blink, 2000);
        }
    }

    #[test]
    fn test_random_direction_per_star() {
        let config = Config::from_patch(&ConfigPatch::direction(Direction::Random));
        let field = field(100, 100, config);
        let first = field.stars()[0].direction.unwrap();
        assert!(field.stars().iter().any(|s| s.direction != Some(first)));
        for star in field.stars() {
            let degrees = star.direction.unwrap();
            assert!((0.0..360.0).contains(&degrees));
        }
    }

    #[test]
    fn test_stop_direction_forces_zero_speed() {
        let config = Config::from_patch(&ConfigPatch::direction(Direction::Stop));
        let field = field(100, 100, config);
        assert!(!field.stars().is_empty());
        for star in field.stars() {
            assert_eq!(star.speed, 0.0);
            assert_eq!(star.direction, None);
        }
    }

    #[test]
    fn test_new_mounts_surface_at_client_size() {
        let field = field(64, 48, Config::default());
        assert_eq!(field.size(), Size::new(64, 48));
        assert_eq!(field.surface().size, Size::new(64, 48));
        assert!(field.is_running());
    }

    #[test]
    fn test_animate_paints_background_then_stars() {
        let mut config = Config::from_patch(&ConfigPatch::background("#000010"));
        for spec in config.sizes.values_mut() {
            spec.amount = 2;
        }
        let mut field = field(40, 20, config);
        field.surface.commands.clear();

        field.animate_stars(0.0);

        let commands = &field.surface().commands;
        assert_eq!(commands[0], Command::ClearRect(0.0, 0.0, 40.0, 20.0));
        assert_eq!(commands[1], Command::FillStyle("#000010".to_string()));
        assert_eq!(commands[2], Command::FillRect(0.0, 0.0, 40.0, 20.0));
        assert_eq!(field.surface().circles(), 6);
    }

    #[test]
    fn test_draw_star_resets_global_alpha() {
        let mut field = field(10, 10, Config::default());
        field.surface.commands.clear();
        let mut star = still_star(5.0, 5.0);
        star.opacity = 0.7;

        draw_star(&mut field.surface, &star);

        assert_eq!(
            field.surface().commands,
            vec![
                Command::FillStyle("#ffffff".to_string()),
                Command::GlobalAlpha(0.7),
                Command::Circle(5.0, 5.0, 0.5),
                Command::GlobalAlpha(1.0),
            ]
        );
    }

    #[test]
    fn test_draw_star_functional_color_uses_alpha_channel() {
        let mut field = field(10, 10, Config::default());
        field.surface.commands.clear();
        let mut star = still_star(2.0, 3.0);
        star.color = "rgb(255, 200, 100)".to_string();
        star.opacity = 0.5;

        draw_star(&mut field.surface, &star);

        assert_eq!(
            field.surface().commands,
            vec![
                Command::FillStyle("rgba(255, 200, 100, 0.5)".to_string()),
                Command::Circle(2.0, 3.0, 0.5),
            ]
        );
    }

    #[test]
    fn test_wrap_left_edge() {
        let mut rng = rng();
        let mut star = still_star(-0.5, 10.0);
        wrap_star(&mut star, 100.0, 50.0, &mut rng);
        assert_eq!(star.x, 100.0);
        assert!((0.0..50.0).contains(&star.y));
        assert_ne!(star.y, 10.0);
    }

    #[test]
    fn test_wrap_right_edge() {
        let mut rng = rng();
        let mut star = still_star(100.5, 10.0);
        wrap_star(&mut star, 100.0, 50.0, &mut rng);
        assert_eq!(star.x, 0.0);
        assert_ne!(star.y, 10.0);
    }

    #[test]
    fn test_wrap_top_edge() {
        let mut rng = rng();
        let mut star = still_star(30.0, -1.0);
        wrap_star(&mut star, 100.0, 50.0, &mut rng);
        assert_eq!(star.y, 50.0);
        assert!((0.0..100.0).contains(&star.x));
        assert_ne!(star.x, 30.0);
    }

    #[test]
    fn test_wrap_bottom_edge() {
        let mut rng = rng();
        let mut star = still_star(30.0, 51.0);
        wrap_star(&mut star, 100.0, 50.0, &mut rng);
        assert_eq!(star.y, 0.0);
        assert_ne!(star.x, 30.0);
    }

    #[test]
    fn test_no_wrap_inside_bounds() {
        let mut rng = rng();
        let mut star = still_star(0.0, 50.0);
        wrap_star(&mut star, 100.0, 50.0, &mut rng);
        assert_eq!((star.x, star.y), (0.0, 50.0));
    }

    #[test]
    fn test_animate_wraps_moving_star() {
        let config = Config::from_patch(&ConfigPatch::direction(Direction::Angle(0.0)));
        let mut field = field(100, 50, config);
        field.stars = vec![Star {
            direction: Some(0.0),
            speed: 2.0,
            ..still_star(20.0, 49.5)
        }];

        field.animate_stars(16.0);

        let star = &field.stars()[0];
        assert_eq!(star.y, 0.0);
        assert_ne!(star.x, 20.0);
    }

    #[test]
    fn test_handle_resize_rescales() {
        let mut field = field(200, 100, Config::default());
        let before: Vec<(f64, f64)> = field.stars().iter().map(|s| (s.x, s.y)).collect();

        field.container().set_size(400, 50);
        field.handle_resize();

        assert_eq!(field.size(), Size::new(400, 50));
        assert_eq!(field.surface().size, Size::new(400, 50));
        for (star, (x, y)) in field.stars().iter().zip(before) {
            assert!((star.x - x * 2.0).abs() < 1e-9);
            assert!((star.y - y * 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_handle_resize_from_hidden_container() {
        let mut field = field(0, 0, Config::default());
        field.stars = vec![still_star(3.0, 4.0)];

        field.container().set_size(80, 60);
        field.handle_resize();

        assert_eq!(field.size(), Size::new(80, 60));
        assert_eq!((field.stars()[0].x, field.stars()[0].y), (3.0, 4.0));
    }

    #[test]
    fn test_resize_canvas_is_idempotent() {
        let mut field = field(30, 20, Config::default());
        field.resize_canvas();
        field.resize_canvas();
        assert_eq!(field.size(), Size::new(30, 20));
    }

    #[test]
    fn test_update_options_sizes_regenerates() {
        let mut field = field(300, 200, Config::default());
        let before = field.stars().to_vec();

        field.update_options(&ConfigPatch::size(
            "small",
            SizePatch {
                blink: Some(500),
                ..SizePatch::default()
            },
        ));

        assert_eq!(field.stars().len(), 150);
        assert_ne!(field.stars(), before.as_slice());
        let small: Vec<_> = field
            .stars()
            .iter()
            .filter(|s| s.class == SizeClass::Small)
            .collect();
        assert_eq!(small.len(), 50);
        assert!(small.iter().all(|s| s.blink == 500));
        assert_eq!(field.config().sizes["small"].blink, 500);
        assert_eq!(field.config().sizes["small"].amount, 50);
    }

    #[test]
    fn test_update_options_amount_changes_count() {
        let mut field = field(300, 200, Config::default());
        field.update_options(&ConfigPatch::size(
            "large",
            SizePatch {
                amount: Some(5),
                ..SizePatch::default()
            },
        ));
        assert_eq!(field.stars().len(), 105);
    }

    #[test]
    fn test_update_options_stop_freezes_in_place() {
        let mut field = field(300, 200, Config::default());
        let positions: Vec<(f64, f64)> = field.stars().iter().map(|s| (s.x, s.y)).collect();

        field.update_options(&ConfigPatch::direction(Direction::Stop));

        assert_eq!(field.config().direction, Direction::Stop);
        for (star, position) in field.stars().iter().zip(&positions) {
            assert_eq!(star.speed, 0.0);
            assert_eq!(star.direction, None);
            assert_eq!((star.x, star.y), *position);
        }

        field.animate_stars(100.0);
        for (star, position) in field.stars().iter().zip(&positions) {
            assert_eq!((star.x, star.y), *position);
        }
    }

    #[test]
    fn test_update_options_direction_patches_in_place() {
        let mut field = field(300, 200, Config::default());
        let positions: Vec<(f64, f64)> = field.stars().iter().map(|s| (s.x, s.y)).collect();

        field.update_options(&ConfigPatch::direction(Direction::Angle(180.0)));
        assert!(field.stars().iter().all(|s| s.direction == Some(180.0)));
        let after: Vec<(f64, f64)> = field.stars().iter().map(|s| (s.x, s.y)).collect();
        assert_eq!(after, positions);

        field.update_options(&ConfigPatch::direction(Direction::Random));
        let first = field.stars()[0].direction;
        assert!(field.stars().iter().any(|s| s.direction != first));
    }

    #[test]
    fn test_update_options_background_only() {
        let mut field = field(50, 50, Config::default());
        let before = field.stars().to_vec();

        field.update_options(&ConfigPatch::background("rgb(0, 0, 0)"));

        assert_eq!(field.config().background, "rgb(0, 0, 0)");
        assert_eq!(field.stars(), before.as_slice());
    }

    #[test]
    fn test_update_options_ignores_container() {
        let mut field = field(50, 50, Config::default());
        let patch = ConfigPatch {
            container: Some("#other".to_string()),
            ..ConfigPatch::default()
        };

        field.update_options(&patch);

        assert_eq!(field.config().container, None);
        assert_eq!(field.container().name, "sky");
        assert_eq!(field.container().mounts.get(), 1);
        assert_eq!(field.surface().mounted_on, "sky");
    }

    #[test]
    fn test_tick_runs_until_cancelled() {
        let mut field = field(20, 20, Config::default());
        assert!(field.tick(0.0));
        assert!(field.tick(16.0));
        assert_eq!(field.frames().frames(), 2);

        field.cancel();
        field.surface.commands.clear();
        assert!(!field.tick(32.0));
        assert!(field.surface().commands.is_empty());
    }
}
