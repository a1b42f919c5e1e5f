//! Drawing contract and image-asset cache
//!
//! The engine never draws pixels itself. Once per frame it calls a
//! [`RenderAdapter`] with screen-space circles; the adapter owns the actual
//! drawing. Image-backed appearances load out-of-band through an
//! [`ImageCache`]: the first draw of a URL fires a fire-and-forget load
//! request and the fallback color is reported instead, so a slow network can
//! never stall or crash the frame loop.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender, channel};

use glam::Vec2;

use crate::sim::state::{Appearance, Viewport, WorldState};

/// Hue used for food particles
pub const FOOD_HUE: f32 = 120.0;

/// What the engine asks a renderer to draw for one entity.
///
/// `is_player` requests the two-pass player outline (an outer light stroke
/// and an inner accent-colored stroke) on top of the fill.
pub trait RenderAdapter {
    /// Background grid, aligned to the viewport offset
    fn draw_grid(&mut self, viewport: &Viewport, grid_size: f32);

    /// One filled circle at a screen-space center
    fn draw_circle(&mut self, center: Vec2, radius: f32, appearance: &Appearance, is_player: bool);
}

/// World position to screen space: offset by the camera, centered on screen
#[inline]
pub fn world_to_screen(pos: Vec2, viewport: &Viewport) -> Vec2 {
    pos - viewport.pos + Vec2::new(viewport.width / 2.0, viewport.height / 2.0)
}

fn on_screen(center: Vec2, radius: f32, viewport: &Viewport) -> bool {
    center.x + radius >= 0.0
        && center.x - radius <= viewport.width
        && center.y + radius >= 0.0
        && center.y - radius <= viewport.height
}

/// Issue one frame of draw calls: grid, food, bots, then the player on top.
/// Entities fully outside the viewport are culled.
pub fn render_world(state: &WorldState, renderer: &mut dyn RenderAdapter) {
    let viewport = &state.viewport;
    renderer.draw_grid(viewport, state.config.grid_size);

    let food_appearance = Appearance::Color { hue: FOOD_HUE };
    for food in &state.foods {
        let center = world_to_screen(food.pos, viewport);
        if on_screen(center, food.radius, viewport) {
            renderer.draw_circle(center, food.radius, &food_appearance, false);
        }
    }

    for bot in &state.bots {
        let center = world_to_screen(bot.pos, viewport);
        if on_screen(center, bot.radius, viewport) {
            renderer.draw_circle(center, bot.radius, &bot.appearance, false);
        }
    }

    let player_center = world_to_screen(state.player.pos, viewport);
    let player_appearance = Appearance::Color { hue: 210.0 };
    renderer.draw_circle(player_center, state.player.radius, &player_appearance, true);
}

/// Completion message from an [`AssetLoader`]
#[derive(Debug)]
pub enum AssetEvent<T> {
    Loaded { url: String, image: T },
    Failed { url: String, error: String },
}

/// Fire-and-forget image loader.
///
/// `request` must return immediately; the result is delivered later through
/// the supplied sender. The completion may arrive after the bot that wanted
/// the image is gone; the cache write is harmless either way.
pub trait AssetLoader<T> {
    fn request(&mut self, url: &str, results: Sender<AssetEvent<T>>);
}

enum AssetState<T> {
    Loading,
    Ready(T),
    Failed,
}

/// URL-keyed cache of decoded images with async-safe fallback.
///
/// A renderer calls [`ImageCache::get_or_request`] at draw time and
/// [`ImageCache::poll`] once per frame to drain completions. A URL is
/// requested at most once; failures stick (the fallback color is shown
/// indefinitely, no retry).
pub struct ImageCache<T> {
    entries: HashMap<String, AssetState<T>>,
    loader: Box<dyn AssetLoader<T>>,
    results_tx: Sender<AssetEvent<T>>,
    results_rx: Receiver<AssetEvent<T>>,
}

impl<T> ImageCache<T> {
    pub fn new(loader: Box<dyn AssetLoader<T>>) -> Self {
        let (results_tx, results_rx) = channel();
        Self {
            entries: HashMap::new(),
            loader,
            results_tx,
            results_rx,
        }
    }

    /// The image for `url` if it has loaded. The first call for a URL fires
    /// the load request and returns `None` immediately; the caller draws the
    /// fallback color for this frame.
    pub fn get_or_request(&mut self, url: &str) -> Option<&T> {
        if !self.entries.contains_key(url) {
            self.entries.insert(url.to_owned(), AssetState::Loading);
            self.loader.request(url, self.results_tx.clone());
            return None;
        }
        match self.entries.get(url) {
            Some(AssetState::Ready(image)) => Some(image),
            _ => None,
        }
    }

    /// Drain load completions; call once per frame
    pub fn poll(&mut self) {
        while let Ok(event) = self.results_rx.try_recv() {
            match event {
                AssetEvent::Loaded { url, image } => {
                    self.entries.insert(url, AssetState::Ready(image));
                }
                AssetEvent::Failed { url, error } => {
                    log::warn!("image load failed for {url}: {error}");
                    self.entries.insert(url, AssetState::Failed);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::profile::NoProfiles;
    use crate::sim::spawn::SpawnManager;

    #[derive(Default)]
    struct RecordingRenderer {
        grids: usize,
        circles: Vec<(Vec2, f32, bool)>,
    }

    impl RenderAdapter for RecordingRenderer {
        fn draw_grid(&mut self, _viewport: &Viewport, _grid_size: f32) {
            self.grids += 1;
        }

        fn draw_circle(
            &mut self,
            center: Vec2,
            radius: f32,
            _appearance: &Appearance,
            is_player: bool,
        ) {
            self.circles.push((center, radius, is_player));
        }
    }

    #[test]
    fn test_world_to_screen_centers_camera() {
        let viewport = Viewport {
            pos: Vec2::new(1000.0, 1000.0),
            width: 800.0,
            height: 600.0,
        };
        let screen = world_to_screen(Vec2::new(1000.0, 1000.0), &viewport);
        assert_eq!(screen, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_render_culls_offscreen_entities_and_outlines_player() {
        let mut state = WorldState::new(WorldConfig::default(), 800.0, 600.0, 42);
        let mut spawner = SpawnManager::new(Box::new(NoProfiles));
        spawner.seed_world(&mut state);

        let mut renderer = RecordingRenderer::default();
        render_world(&state, &mut renderer);

        assert_eq!(renderer.grids, 1);
        // Exactly one player circle, drawn last
        let players: Vec<_> = renderer.circles.iter().filter(|(_, _, p)| *p).collect();
        assert_eq!(players.len(), 1);
        assert!(renderer.circles.last().unwrap().2);

        // Everything drawn fits the culling window
        for (center, radius, _) in &renderer.circles {
            assert!(center.x + radius >= 0.0 && center.x - radius <= 800.0);
            assert!(center.y + radius >= 0.0 && center.y - radius <= 600.0);
        }

        // With the camera at world center, most of the 50 entities are off screen
        assert!(renderer.circles.len() < 1 + state.bots.len() + state.foods.len());
    }

    struct CountingLoader {
        requests: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
    }

    impl AssetLoader<&'static str> for CountingLoader {
        fn request(&mut self, url: &str, _results: Sender<AssetEvent<&'static str>>) {
            self.requests.borrow_mut().push(url.to_owned());
        }
    }

    #[test]
    fn test_cache_requests_each_url_once() {
        let requests = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut cache = ImageCache::new(Box::new(CountingLoader {
            requests: requests.clone(),
        }));

        assert!(cache.get_or_request("u1").is_none());
        assert!(cache.get_or_request("u1").is_none());
        assert!(cache.get_or_request("u2").is_none());

        assert_eq!(*requests.borrow(), vec!["u1".to_owned(), "u2".to_owned()]);
    }

    struct ImmediateLoader;

    impl AssetLoader<&'static str> for ImmediateLoader {
        fn request(&mut self, url: &str, results: Sender<AssetEvent<&'static str>>) {
            let event = if url.contains("bad") {
                AssetEvent::Failed {
                    url: url.to_owned(),
                    error: "decode error".into(),
                }
            } else {
                AssetEvent::Loaded {
                    url: url.to_owned(),
                    image: "pixels",
                }
            };
            let _ = results.send(event);
        }
    }

    #[test]
    fn test_cache_serves_image_after_poll() {
        let mut cache = ImageCache::new(Box::new(ImmediateLoader));

        // First draw: fallback frame
        assert!(cache.get_or_request("https://img.example/ok.png").is_none());
        cache.poll();
        assert_eq!(
            cache.get_or_request("https://img.example/ok.png"),
            Some(&"pixels")
        );
    }

    #[test]
    fn test_failed_load_sticks_without_retry() {
        let requests = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        struct FailThenCount {
            requests: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
        }
        impl AssetLoader<&'static str> for FailThenCount {
            fn request(&mut self, url: &str, results: Sender<AssetEvent<&'static str>>) {
                self.requests.borrow_mut().push(url.to_owned());
                let _ = results.send(AssetEvent::Failed {
                    url: url.to_owned(),
                    error: "404".into(),
                });
            }
        }

        let mut cache = ImageCache::new(Box::new(FailThenCount {
            requests: requests.clone(),
        }));
        assert!(cache.get_or_request("u").is_none());
        cache.poll();
        // Failure is remembered: no image and no second request
        assert!(cache.get_or_request("u").is_none());
        assert_eq!(requests.borrow().len(), 1);
    }

    #[test]
    fn test_late_completion_after_owner_is_gone_is_harmless() {
        // Simulates a load finishing after the owning bot was eaten: the
        // cache write lands, nothing depends on the bot existing.
        let mut cache = ImageCache::new(Box::new(ImmediateLoader));
        assert!(cache.get_or_request("u").is_none());
        // Several frames pass before the completion is drained
        cache.poll();
        cache.poll();
        assert_eq!(cache.get_or_request("u"), Some(&"pixels"));
    }
}
