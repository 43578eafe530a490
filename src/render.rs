//! Host drawing surface and frame renderer
//!
//! The renderer only reads [`GameState`]. A sprite the host cannot resolve
//! is skipped with a warning; the entity keeps simulating regardless.

use crate::assets::{AssetId, manifest};
use crate::consts::*;
use crate::sim::{CarKind, CarType, Direction, GameState, Rect};

/// What to draw. Car sprites carry their direction so the host can pick
/// a facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Player,
    Minimap,
    Car { kind: CarKind, direction: Direction },
}

impl Sprite {
    pub fn asset(&self) -> AssetId {
        match self {
            Sprite::Background => AssetId::Background,
            Sprite::Player => AssetId::PlayerIdle,
            Sprite::Minimap => AssetId::MinimapBackground,
            Sprite::Car { kind, .. } => AssetId::Car(*kind),
        }
    }
}

/// The host's image loading and blitting surface
pub trait Playground {
    /// Host image handle
    type Image: Clone;

    /// Request an image ahead of the asset-ready signal
    fn load_image(&mut self, asset: AssetId);

    /// Resolve a sprite to a loaded image
    fn image(&self, sprite: &Sprite) -> Option<Self::Image>;

    fn clear(&mut self, color: &str);

    fn draw_image(&mut self, image: &Self::Image, dest: Rect);
}

/// Request every image in the manifest
pub fn preload<P: Playground>(car_types: &[CarType], playground: &mut P) {
    for asset in manifest(car_types) {
        playground.load_image(asset);
    }
}

/// Draw one frame. Returns the number of draws skipped for missing images.
pub fn render<P: Playground>(state: &GameState, playground: &mut P) -> usize {
    let arena = state.arena;
    let mut skipped = 0;
    let mut draw = |playground: &mut P, sprite: Sprite, dest: Rect| {
        match playground.image(&sprite) {
            Some(image) => playground.draw_image(&image, dest),
            None => {
                log::warn!("No image for {} ({:?}), skipping draw", sprite.asset(), sprite);
                skipped += 1;
            }
        }
    };

    playground.clear(CLEAR_COLOR);
    draw(
        playground,
        Sprite::Background,
        Rect::new(0.0, 0.0, arena.width, arena.height),
    );

    for car in &state.cars {
        draw(
            playground,
            Sprite::Car {
                kind: car.kind,
                direction: car.direction,
            },
            car.rect(),
        );
    }

    draw(playground, Sprite::Player, state.player.rect());

    draw(
        playground,
        Sprite::Minimap,
        Rect::new(
            arena.width - (MINIMAP_WIDTH + MINIMAP_MARGIN),
            arena.height - (MINIMAP_HEIGHT + MINIMAP_MARGIN),
            MINIMAP_WIDTH,
            MINIMAP_HEIGHT,
        ),
    );

    skipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::Car;
    use std::collections::HashSet;

    /// Records draw calls; resolves any loaded asset
    #[derive(Default)]
    struct RecordingPlayground {
        loaded: HashSet<AssetId>,
        cleared: Vec<String>,
        draws: Vec<(Sprite, Rect)>,
    }

    impl Playground for RecordingPlayground {
        type Image = Sprite;

        fn load_image(&mut self, asset: AssetId) {
            self.loaded.insert(asset);
        }

        fn image(&self, sprite: &Sprite) -> Option<Sprite> {
            self.loaded.contains(&sprite.asset()).then_some(*sprite)
        }

        fn clear(&mut self, color: &str) {
            self.cleared.push(color.to_string());
        }

        fn draw_image(&mut self, image: &Sprite, dest: Rect) {
            self.draws.push((*image, dest));
        }
    }

    fn state_with_car() -> GameState {
        let mut state = GameState::new(&Settings::default());
        let sedan = CarType::new(CarKind::Sedan, 19.0, 10.0);
        let id = state.next_entity_id();
        let arena = state.arena;
        state
            .cars
            .push(Car::spawn(id, &sedan, Direction::FromRight, 1.0, 7.0, &arena));
        state
    }

    #[test]
    fn test_car_sprites_keyed_by_direction() {
        let directions = [Direction::FromLeft, Direction::FromRight, Direction::FromLeft];
        let sprites: HashSet<Sprite> = directions
            .into_iter()
            .map(|direction| Sprite::Car {
                kind: CarKind::Wagon,
                direction,
            })
            .collect();
        assert_eq!(sprites.len(), 2);
        assert!(sprites.iter().all(|s| s.asset() == AssetId::Car(CarKind::Wagon)));
    }

    #[test]
    fn test_preload_requests_manifest() {
        let state = GameState::new(&Settings::default());
        let mut playground = RecordingPlayground::default();
        preload(&state.car_types, &mut playground);
        assert_eq!(playground.loaded.len(), 6);
        assert!(playground.loaded.contains(&AssetId::Car(CarKind::Truck)));
    }

    #[test]
    fn test_render_draw_order() {
        let state = state_with_car();
        let mut playground = RecordingPlayground::default();
        preload(&state.car_types, &mut playground);

        let skipped = render(&state, &mut playground);
        assert_eq!(skipped, 0);
        assert_eq!(playground.cleared, vec![CLEAR_COLOR.to_string()]);

        let sprites: Vec<Sprite> = playground.draws.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            sprites,
            vec![
                Sprite::Background,
                Sprite::Car {
                    kind: CarKind::Sedan,
                    direction: Direction::FromRight
                },
                Sprite::Player,
                Sprite::Minimap,
            ]
        );
        assert_eq!(playground.draws[2].1, state.player.rect());
        assert_eq!(
            playground.draws[3].1,
            Rect::new(100.0 - 31.0, 100.0 - 29.0, 29.0, 27.0)
        );
    }

    #[test]
    fn test_missing_image_skips_only_that_draw() {
        let state = state_with_car();
        let mut playground = RecordingPlayground::default();
        playground.load_image(AssetId::Background);
        playground.load_image(AssetId::PlayerIdle);

        let skipped = render(&state, &mut playground);
        assert_eq!(skipped, 2);
        assert_eq!(playground.draws.len(), 2);
        // The car is still part of the simulation
        assert_eq!(state.cars.len(), 1);
    }

    #[test]
    fn test_game_render_reports_skipped_draws() {
        let game = crate::Game::new(&Settings::default(), 1).expect("valid settings");
        let mut playground = RecordingPlayground::default();
        assert_eq!(game.render(&mut playground), 3);

        game.preload(&mut playground);
        assert_eq!(game.render(&mut playground), 0);
    }
}
