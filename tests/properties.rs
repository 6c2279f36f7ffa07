//! Property tests for the simulation invariants

use dino_runner::Tuning;
use dino_runner::sim::{
    Actor, FrameControl, GamePhase, Obstacle, ObstacleKind, ObstacleRegistry, Session,
    check_collision, next_interval, tick,
};
use proptest::prelude::*;

fn actor() -> Actor {
    Actor::new(&Tuning::default().actor, 280.0)
}

fn cactus(x: f32, y: f32) -> Obstacle {
    Obstacle {
        x,
        y,
        width: 20.0,
        height: 50.0,
        kind: ObstacleKind::Grounded,
    }
}

proptest! {
    #[test]
    fn ground_clamp_converges(vel in -40.0f32..40.0, y in -400.0f32..400.0) {
        let tuning = Tuning::default();
        let mut a = actor();
        a.y = y;
        a.vel_y = vel;
        a.airborne = true;

        for _ in 0..1000 {
            a.update(tuning.gravity);
        }
        prop_assert_eq!(a.y, a.ground_y());
        prop_assert_eq!(a.vel_y, 0.0);
        prop_assert!(!a.airborne);

        a.update(tuning.gravity);
        prop_assert_eq!(a.y, a.ground_y());
        prop_assert_eq!(a.vel_y, 0.0);
    }

    #[test]
    fn no_double_jump(frames in 0usize..40, impulse in -30.0f32..-1.0) {
        let tuning = Tuning::default();
        let mut a = actor();
        prop_assert!(a.jump(tuning.jump_impulse));
        for _ in 0..frames {
            a.update(tuning.gravity);
        }
        if a.airborne {
            let vel = a.vel_y;
            prop_assert!(!a.jump(impulse));
            prop_assert_eq!(a.vel_y, vel);
        }
    }

    #[test]
    fn spawn_interval_within_bounds(t in 0.0f32..=1.0) {
        let tuning = Tuning::default();
        let speed = tuning.initial_speed + (tuning.max_speed - tuning.initial_speed) * t;
        let interval = next_interval(
            speed,
            tuning.max_speed,
            tuning.spawn_interval,
            tuning.min_spawn_interval,
        );
        prop_assert!(interval >= tuning.min_spawn_interval);
        prop_assert!(interval <= tuning.spawn_interval);
    }

    #[test]
    fn pruning_matches_right_edge(
        xs in prop::collection::vec(-100.0f32..900.0, 0..20),
        dt in 0.0f64..50.0,
        speed in 0.0f32..15.0,
    ) {
        let mut registry = ObstacleRegistry::new();
        for &x in &xs {
            registry.push(cactus(x, 230.0));
        }
        let dx = (speed as f64 * (dt / 16.0)) as f32;
        let expected: Vec<f32> = xs
            .iter()
            .map(|&x| x - dx)
            .filter(|&x| x + 20.0 >= 0.0)
            .collect();

        let pruned = registry.advance(dt, speed);
        prop_assert_eq!(pruned, xs.len() - expected.len());
        let kept: Vec<f32> = registry.iter().map(|o| o.x).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn larger_padding_never_adds_hits(
        ox in 0.0f32..200.0,
        oy in 150.0f32..280.0,
        crouch in any::<bool>(),
        p1 in 0.0f32..20.0,
        extra in 0.0f32..20.0,
    ) {
        let mut a = actor();
        a.crouch(crouch);
        let obstacles = [cactus(ox, oy)];
        let p2 = p1 + extra;
        if check_collision(&a, obstacles.iter(), p2) {
            prop_assert!(check_collision(&a, obstacles.iter(), p1));
        }
    }

    #[test]
    fn score_monotonic_while_running(
        seed in any::<u64>(),
        steps in prop::collection::vec(1.0f64..40.0, 1..300),
        jumps in prop::collection::vec(any::<bool>(), 300),
    ) {
        let mut s = Session::new(Tuning::default(), 800.0, 300.0, 0.0, seed);
        s.start(0.0);
        let mut now = 0.0;
        let mut last = s.score();
        let mut frozen = None;

        for (dt, jump) in steps.iter().zip(jumps.iter()) {
            now += dt;
            if *jump {
                s.jump();
            }
            let control = tick(&mut s, now);
            match frozen {
                None => {
                    prop_assert!(s.score() >= last);
                    last = s.score();
                    if control == FrameControl::Halt {
                        prop_assert_eq!(s.phase, GamePhase::GameOver);
                        frozen = Some(s.score());
                    }
                }
                Some(score) => prop_assert_eq!(s.score(), score),
            }
        }
    }
}

#[test]
fn zero_right_edge_is_retained() {
    let mut registry = ObstacleRegistry::new();
    registry.push(cactus(-20.0, 230.0));
    registry.push(cactus(-20.5, 230.0));
    assert_eq!(registry.advance(0.0, 6.0), 1);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.as_slice()[0].x, -20.0);
}

#[test]
fn restart_resets_everything() {
    let tuning = Tuning::default();
    let mut s = Session::new(tuning.clone(), 800.0, 300.0, 0.0, 9);
    s.start(0.0);

    let mut now = 0.0;
    for _ in 0..30 {
        now += 16.0;
        tick(&mut s, now);
    }
    s.jump();
    s.crouch(true);
    let floor = s.field.floor_y();
    s.obstacles.push(cactus(60.0, floor - 50.0));
    s.obstacles.push(cactus(500.0, floor - 50.0));
    now += 16.0;
    assert_eq!(tick(&mut s, now), FrameControl::Halt);
    assert!(s.score() > 0.0);

    assert!(s.restart(now + 1000.0));
    assert_eq!(s.phase, GamePhase::Running);
    assert!(s.obstacles.is_empty());
    assert_eq!(s.score(), 0.0);
    assert_eq!(s.speed(), tuning.initial_speed);
    assert!(!s.actor.crouching);
    assert_eq!(s.actor.y, s.actor.ground_y());
    assert_eq!(s.actor.y, floor - tuning.actor.height);
    assert!(s.high_score > 0.0);
}
