// Step driver tests for the Simulation

use super::simulation::{OverrideEvent, Simulation};
use crate::body::{Body, Color};
use crate::config::SimConfig;
use crate::error::InitError;
use crate::spawn;
use approx::assert_relative_eq;
use ultraviolet::Vec2;

const DT: f32 = 1.0 / 60.0;

fn body(x: f32, y: f32, vx: f32, vy: f32, radius: f32, mass: f32) -> Body {
    Body::new(
        Vec2::new(x, y),
        Vec2::new(vx, vy),
        radius,
        mass,
        Color::new(200, 100, 50, 255),
    )
}

fn no_gravity() -> SimConfig {
    SimConfig {
        gravitational_constant: 0.0,
        ..SimConfig::default()
    }
}

fn total_momentum(bodies: &[Body]) -> Vec2 {
    bodies.iter().fold(Vec2::zero(), |p, b| p + b.momentum())
}

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn rejects_empty_population() {
        assert!(matches!(
            Simulation::new(Vec::new(), SimConfig::default()),
            Err(InitError::EmptyPopulation)
        ));
    }

    #[test]
    fn rejects_bad_domain_and_softening() {
        let bodies = vec![body(0.0, 0.0, 0.0, 0.0, 5.0, 5.0)];
        let config = SimConfig {
            domain_width: -1.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            Simulation::new(bodies.clone(), config),
            Err(InitError::InvalidDomain { .. })
        ));
        let config = SimConfig {
            softening: 0.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            Simulation::new(bodies, config),
            Err(InitError::InvalidSoftening(_))
        ));
    }

    #[test]
    fn rejects_bodies_without_positive_mass_or_radius() {
        for mass in [0.0, -3.0, f32::NAN, f32::INFINITY] {
            let mut bad = body(20.0, 20.0, 0.0, 0.0, 5.0, 5.0);
            bad.mass = mass;
            let bodies = vec![body(0.0, 0.0, 0.0, 0.0, 5.0, 5.0), bad, body(500.0, 500.0, 0.0, 0.0, 5.0, 5.0)];
            assert!(matches!(
                Simulation::new(bodies, SimConfig::default()),
                Err(InitError::InvalidMass(_))
            ));
        }
        for radius in [0.0, -1.0, f32::NAN] {
            let mut bad = body(20.0, 20.0, 0.0, 0.0, 5.0, 5.0);
            bad.radius = radius;
            assert!(matches!(
                Simulation::new(vec![bad], SimConfig::default()),
                Err(InitError::InvalidRadius(_))
            ));
        }
    }

    #[test]
    fn snapshot_and_pick() {
        let sim = Simulation::new(
            vec![body(10.0, 10.0, 0.0, 0.0, 5.0, 5.0), body(40.0, 10.0, 0.0, 0.0, 8.0, 5.0)],
            SimConfig::default(),
        )
        .unwrap();
        let views = sim.snapshot();
        assert_eq!(views.len(), 2);
        assert_eq!(views[1].pos, Vec2::new(40.0, 10.0));
        assert_eq!(views[1].radius, 8.0);
        assert_eq!(sim.pick(Vec2::new(44.0, 12.0)), Some(1));
        assert_eq!(sim.pick(Vec2::new(12.0, 9.0)), Some(0));
        assert_eq!(sim.pick(Vec2::new(25.0, 10.0)), None);
    }
}

#[cfg(test)]
mod stepping {
    use super::*;

    #[test]
    fn step_advances_frame_and_time() {
        let mut sim = Simulation::new(
            vec![body(100.0, 100.0, 60.0, 0.0, 5.0, 5.0)],
            SimConfig::default(),
        )
        .unwrap();
        sim.step(0.5, &[]);
        sim.step(0.5, &[]);
        assert_eq!(sim.frame, 2);
        assert_relative_eq!(sim.time, 1.0);
        assert_eq!(sim.bodies()[0].pos, Vec2::new(160.0, 100.0));
    }

    #[test]
    fn invalid_dt_skips_the_tick() {
        let mut sim = Simulation::new(
            vec![body(100.0, 100.0, 60.0, 0.0, 5.0, 5.0)],
            SimConfig::default(),
        )
        .unwrap();
        let before = sim.bodies().to_vec();
        sim.step(0.0, &[]);
        sim.step(-1.0, &[]);
        sim.step(f32::NAN, &[]);
        assert_eq!(sim.frame, 0);
        assert_eq!(sim.bodies(), &before[..]);
    }

    #[test]
    fn bodies_wrap_during_step() {
        let config = no_gravity();
        let width = config.domain_width;
        let mut sim = Simulation::new(vec![body(width + 4.0, 300.0, 120.0, 0.0, 5.0, 5.0)], config).unwrap();
        sim.step(DT, &[]);
        assert_eq!(sim.bodies()[0].pos.x, -5.0);
        assert_eq!(sim.bodies()[0].vel, Vec2::new(120.0, 0.0));
    }

    #[test]
    fn overlapping_bodies_separate_in_one_step() {
        let mut sim = Simulation::new(
            vec![body(500.0, 500.0, 0.0, 0.0, 10.0, 30.0), body(507.0, 501.0, 0.0, 0.0, 10.0, 30.0)],
            no_gravity(),
        )
        .unwrap();
        sim.step(DT, &[]);
        assert!(sim.last_contacts() >= 1);
        let b = sim.bodies();
        let gap = (b[1].pos - b[0].pos).mag();
        assert!(gap >= 20.0 - 1e-3, "gap = {}", gap);
    }

    #[test]
    fn momentum_is_conserved_without_contacts() {
        let bodies = vec![
            body(400.0, 300.0, 10.0, -5.0, 5.0, 20.0),
            body(700.0, 350.0, -8.0, 3.0, 5.0, 45.0),
            body(550.0, 600.0, 2.0, 9.0, 5.0, 30.0),
        ];
        let p0 = total_momentum(&bodies);
        let mut sim = Simulation::new(bodies, SimConfig::default()).unwrap();
        for _ in 0..120 {
            sim.step(DT, &[]);
            assert_eq!(sim.last_contacts(), 0);
        }
        let p1 = total_momentum(sim.bodies());
        assert!((p1 - p0).mag() < 0.05, "momentum drifted from {:?} to {:?}", p0, p1);
    }

    #[test]
    fn same_seed_runs_are_bit_identical() {
        let run = || {
            let bodies = spawn::initialize(150, 1600.0, 900.0, 11).unwrap();
            let mut sim = Simulation::new(bodies, SimConfig::default()).unwrap();
            for _ in 0..40 {
                sim.step(DT, &[]);
            }
            sim.into_bodies()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn head_on_pair_exchanges_velocities() {
        let mut bodies = spawn::initialize(2, 1600.0, 900.0, 2).unwrap();
        let starts = [(Vec2::new(700.0, 450.0), Vec2::new(50.0, 0.0)), (Vec2::new(900.0, 450.0), Vec2::new(-50.0, 0.0))];
        for (b, (pos, vel)) in bodies.iter_mut().zip(starts) {
            b.pos = pos;
            b.vel = vel;
            b.radius = 10.0;
            b.mass = 10.0;
        }
        let mut sim = Simulation::new(bodies, SimConfig::default()).unwrap();

        let mut collided = false;
        for _ in 0..600 {
            let pre: Vec<Vec2> = sim.bodies().iter().map(|b| b.vel).collect();
            sim.step(DT, &[]);
            if sim.last_contacts() > 0 {
                let post = sim.bodies();
                assert_relative_eq!(post[0].vel.x, pre[1].x, epsilon = 0.5);
                assert_relative_eq!(post[1].vel.x, pre[0].x, epsilon = 0.5);
                assert_eq!(post[0].vel.y, 0.0);
                assert_eq!(post[1].vel.y, 0.0);
                collided = true;
                break;
            }
        }
        assert!(collided, "bodies never met");
    }
}

#[cfg(test)]
mod overrides {
    use super::*;

    fn two_far_bodies(config: SimConfig) -> Simulation {
        Simulation::new(
            vec![body(200.0, 200.0, 30.0, 0.0, 5.0, 10.0), body(1200.0, 700.0, 0.0, 0.0, 5.0, 10.0)],
            config,
        )
        .unwrap()
    }

    #[test]
    fn begin_places_and_freezes_the_body() {
        let mut sim = two_far_bodies(SimConfig::default());
        let target = Vec2::new(300.0, 250.0);
        sim.step(DT, &[OverrideEvent::Begin { index: 0, position: target }]);
        assert_eq!(sim.held(), Some(0));
        assert_eq!(sim.bodies()[0].pos, target);
        assert_eq!(sim.bodies()[0].vel, Vec2::new(30.0, 0.0));
        assert_eq!(sim.bodies()[0].acc, Vec2::zero());
        // The free body keeps integrating toward the held one.
        assert!(sim.bodies()[1].acc.x < 0.0);

        sim.step(DT, &[]);
        assert_eq!(sim.bodies()[0].pos, target);
    }

    #[test]
    fn move_updates_the_held_position() {
        let mut sim = two_far_bodies(SimConfig::default());
        sim.step(DT, &[OverrideEvent::Begin { index: 0, position: Vec2::new(300.0, 300.0) }]);
        sim.step(DT, &[OverrideEvent::Move { index: 0, position: Vec2::new(310.0, 295.0) }]);
        assert_eq!(sim.bodies()[0].pos, Vec2::new(310.0, 295.0));
    }

    #[test]
    fn release_throws_with_positional_delta() {
        let mut sim = two_far_bodies(no_gravity());
        let held = Vec2::new(300.0, 300.0);
        sim.step(DT, &[OverrideEvent::Begin { index: 0, position: held }]);
        let release = Vec2::new(306.0, 297.0);
        sim.step(DT, &[OverrideEvent::Release { index: 0, position: release }]);
        assert_eq!(sim.held(), None);
        let expected = (release - held) / DT;
        let b = &sim.bodies()[0];
        assert_relative_eq!(b.vel.x, expected.x, max_relative = 1e-5);
        assert_relative_eq!(b.vel.y, expected.y, max_relative = 1e-5);
        // Integration resumes on the release tick.
        assert_relative_eq!(b.pos.x, release.x, epsilon = 1e-3);
        assert_relative_eq!(b.pos.y, release.y, epsilon = 1e-3);
    }

    #[test]
    fn malformed_events_are_ignored() {
        let mut sim = two_far_bodies(no_gravity());
        sim.step(DT, &[OverrideEvent::Begin { index: 7, position: Vec2::zero() }]);
        assert_eq!(sim.held(), None);
        sim.step(DT, &[OverrideEvent::Move { index: 1, position: Vec2::zero() }]);
        sim.step(DT, &[OverrideEvent::Release { index: 1, position: Vec2::zero() }]);
        assert_eq!(sim.held(), None);
        assert_eq!(sim.frame, 3);
        assert_eq!(sim.bodies()[1].pos, Vec2::new(1200.0, 700.0));
    }

    #[test]
    fn events_apply_in_order_within_a_tick() {
        let mut sim = two_far_bodies(no_gravity());
        sim.step(
            DT,
            &[
                OverrideEvent::Begin { index: 0, position: Vec2::new(400.0, 400.0) },
                OverrideEvent::Move { index: 0, position: Vec2::new(410.0, 400.0) },
            ],
        );
        assert_eq!(sim.bodies()[0].pos, Vec2::new(410.0, 400.0));
        assert_eq!(sim.held(), Some(0));
    }
}
