//! Render stage: ground, runner, obstacles
//!
//! Drawn every frame in every phase, so the last frame of a run stays on
//! screen behind the game-over overlay.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::canvas::{Canvas, Palette, Rect, Sprite};
use crate::sim::{Obstacle, Session};

/// Seed for the ground speckles; fixed so they do not flicker
const GROUND_TEXTURE_SEED: u64 = 0x5eed;
/// Horizontal spacing of ground speckles
const GROUND_TEXTURE_STEP: usize = 50;

type ObstaclePainter = fn(&Obstacle, &Palette, &mut dyn Canvas);

/// Painters indexed by [`crate::sim::ObstacleKind::index`]
const OBSTACLE_PAINTERS: [ObstaclePainter; 2] = [paint_grounded, paint_aerial];

/// Draw the whole scene for the current session state
pub fn draw_scene(session: &Session, palette: &Palette, canvas: &mut dyn Canvas) {
    canvas.clear(palette.background);
    draw_ground(session, palette, canvas);
    draw_runner(session, palette, canvas);
    for obstacle in session.obstacles.iter() {
        OBSTACLE_PAINTERS[obstacle.kind.index()](obstacle, palette, canvas);
    }
}

fn draw_ground(session: &Session, palette: &Palette, canvas: &mut dyn Canvas) {
    let field = &session.field;
    let floor = field.floor_y();
    // The band spans the real surface, which may briefly differ from the
    // playfield between a host resize and the next `Game::resize`
    let surface_width = canvas.size().x.max(0.0);
    canvas.fill_rect(
        Rect::new(0.0, floor, surface_width, field.ground_height),
        palette.ground,
    );

    let mut rng = Pcg32::seed_from_u64(GROUND_TEXTURE_SEED);
    let width = surface_width as usize;
    for x in (0..width).step_by(GROUND_TEXTURE_STEP) {
        let height = rng.random_range(2.0..7.0);
        canvas.fill_rect(
            Rect::new(x as f32, floor + 5.0, 20.0, height),
            palette.ground_texture,
        );
    }
}

fn draw_runner(session: &Session, palette: &Palette, canvas: &mut dyn Canvas) {
    let actor = &session.actor;
    canvas.draw_sprite(
        Sprite::Runner {
            ducked: actor.is_ducked(),
        },
        Rect::new(actor.x, actor.y, actor.draw_width(), actor.current_height()),
        palette.runner,
    );
}

/// Cactus: trunk with an arm on each side
fn paint_grounded(obstacle: &Obstacle, palette: &Palette, canvas: &mut dyn Canvas) {
    let (x, y, w) = (obstacle.x, obstacle.y, obstacle.width);
    canvas.fill_rect(Rect::new(x, y, w, obstacle.height), palette.obstacle);
    canvas.fill_rect(Rect::new(x - 5.0, y + 20.0, 5.0, 20.0), palette.obstacle);
    canvas.fill_rect(Rect::new(x + w, y + 15.0, 5.0, 15.0), palette.obstacle);
}

/// Bird: body with a raised wing
fn paint_aerial(obstacle: &Obstacle, palette: &Palette, canvas: &mut dyn Canvas) {
    let (x, y, w, h) = (obstacle.x, obstacle.y, obstacle.width, obstacle.height);
    canvas.fill_rect(Rect::new(x, y + h * 0.4, w, h * 0.35), palette.obstacle);
    canvas.fill_rect(
        Rect::new(x + w * 0.3, y, w * 0.3, h * 0.4),
        palette.obstacle,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Color;
    use crate::sim::{Lane, ObstacleKind};
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[derive(Debug, PartialEq)]
    enum Draw {
        Clear,
        Rect(Rect),
        Sprite(Sprite, Rect),
    }

    #[derive(Default)]
    struct Recorder {
        draws: Vec<Draw>,
        tints: Vec<Color>,
    }

    impl Canvas for Recorder {
        fn size(&self) -> Vec2 {
            Vec2::new(800.0, 300.0)
        }

        fn clear(&mut self, _color: [f32; 4]) {
            self.draws.push(Draw::Clear);
        }

        fn fill_rect(&mut self, rect: Rect, _color: [f32; 4]) {
            self.draws.push(Draw::Rect(rect));
        }

        fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, tint: Color) {
            self.draws.push(Draw::Sprite(sprite, rect));
            self.tints.push(tint);
        }
    }

    fn session() -> Session {
        Session::new(Tuning::default(), 800.0, 300.0, 0.0, 1)
    }

    #[test]
    fn test_scene_order_and_ground() {
        let s = session();
        let mut canvas = Recorder::default();
        draw_scene(&s, &Palette::day(), &mut canvas);

        assert_eq!(canvas.draws[0], Draw::Clear);
        assert_eq!(canvas.draws[1], Draw::Rect(Rect::new(0.0, 280.0, 800.0, 20.0)));
        // 800 px / 50 px spacing = 16 speckles, then the runner
        assert_eq!(canvas.draws.len(), 2 + 16 + 1);
        assert_eq!(
            canvas.draws[18],
            Draw::Sprite(
                Sprite::Runner { ducked: false },
                Rect::new(50.0, 220.0, 40.0, 60.0)
            )
        );
    }

    #[test]
    fn test_ground_texture_is_stable() {
        let s = session();
        let mut a = Recorder::default();
        let mut b = Recorder::default();
        draw_scene(&s, &Palette::day(), &mut a);
        draw_scene(&s, &Palette::night(), &mut b);
        assert_eq!(a.draws, b.draws);
    }

    #[test]
    fn test_runner_tint_follows_palette() {
        let s = session();
        let mut canvas = Recorder::default();
        draw_scene(&s, &Palette::night(), &mut canvas);
        assert_eq!(canvas.tints, vec![Palette::night().runner]);

        draw_scene(&s, &Palette::day(), &mut canvas);
        assert_eq!(canvas.tints.last(), Some(&Palette::day().runner));
    }

    #[test]
    fn test_ducked_runner_is_wide_and_low() {
        let mut s = session();
        s.crouch(true);
        let mut canvas = Recorder::default();
        draw_scene(&s, &Palette::day(), &mut canvas);
        assert!(canvas.draws.contains(&Draw::Sprite(
            Sprite::Runner { ducked: true },
            Rect::new(50.0, 250.0, 50.0, 30.0)
        )));
    }

    #[test]
    fn test_obstacles_use_kind_painters() {
        let mut s = session();
        s.obstacles.push(Obstacle {
            x: 400.0,
            y: 230.0,
            width: 20.0,
            height: 50.0,
            kind: ObstacleKind::Grounded,
        });
        s.obstacles.push(Obstacle {
            x: 600.0,
            y: 200.0,
            width: 40.0,
            height: 30.0,
            kind: ObstacleKind::Aerial(Lane::Mid),
        });
        let mut canvas = Recorder::default();
        draw_scene(&s, &Palette::day(), &mut canvas);

        // Cactus is three rects, bird two
        let obstacle_draws = &canvas.draws[19..];
        assert_eq!(obstacle_draws.len(), 5);
        assert_eq!(obstacle_draws[0], Draw::Rect(Rect::new(400.0, 230.0, 20.0, 50.0)));
        assert_eq!(obstacle_draws[1], Draw::Rect(Rect::new(395.0, 250.0, 5.0, 20.0)));
    }
}
