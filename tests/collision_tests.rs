use approx::assert_relative_eq;
use mechanica::{observables, *};

const DT: f32 = 1.0 / 60.0;

fn free_space_world(restitution: f32) -> SimulationWorld {
    SimulationWorld::with_environment(Environment {
        gravity: 0.0,
        restitution,
        collision_damping: 1.0,
        ..Environment::default()
    })
}

fn ball(mass: f32, x: f32, vx: f32) -> BodySpec {
    BodySpec::free(mass, 0.5, Vec2::new(x, 0.0)).with_velocity(Vec2::new(vx, 0.0))
}

#[test]
fn elastic_impact_conserves_momentum_and_kinetic_energy() {
    let mut world = free_space_world(1.0);
    let a = world.add_body(ball(2.0, 0.0, 5.0)).unwrap();
    let b = world.add_body(ball(3.0, 3.0, -4.0)).unwrap();

    let totals = |world: &SimulationWorld| {
        let (ba, bb) = (world.body(a).unwrap(), world.body(b).unwrap());
        (
            observables::momentum(ba).x + observables::momentum(bb).x,
            observables::kinetic_energy(ba) + observables::kinetic_energy(bb),
        )
    };

    let (momentum_before, energy_before) = totals(&world);
    for _ in 0..60 {
        world.step(DT);
        let (momentum, energy) = totals(&world);
        assert_relative_eq!(momentum, momentum_before, epsilon = 1e-3);
        assert_relative_eq!(energy, energy_before, max_relative = 1e-4);
    }

    // One-dimensional elastic impact has a closed-form outcome.
    let Motion::Translating { velocity, .. } = world.body(a).unwrap().motion else {
        unreachable!()
    };
    assert_relative_eq!(velocity.x, -5.8, epsilon = 1e-3);
}

#[test]
fn inelastic_impact_zeroes_relative_normal_velocity() {
    let mut world = free_space_world(0.0);
    let a = world.add_body(ball(2.0, 0.0, 5.0)).unwrap();
    let b = world.add_body(ball(3.0, 3.0, -4.0)).unwrap();

    for _ in 0..60 {
        world.step(DT);
    }

    let va = match world.body(a).unwrap().motion {
        Motion::Translating { velocity, .. } => velocity.x,
        _ => unreachable!(),
    };
    let vb = match world.body(b).unwrap().motion {
        Motion::Translating { velocity, .. } => velocity.x,
        _ => unreachable!(),
    };

    assert_relative_eq!(vb - va, 0.0, epsilon = 1e-4);
    // Shared velocity is the momentum-weighted average.
    assert_relative_eq!(va, (2.0 * 5.0 - 3.0 * 4.0) / 5.0, epsilon = 1e-3);
}

#[test]
fn coincident_bodies_survive_the_step() {
    let mut world = free_space_world(1.0);
    let a = world.add_body(ball(1.0, 2.0, 0.0)).unwrap();
    let b = world.add_body(ball(1.0, 2.0, 0.0)).unwrap();

    world.step(DT);

    for id in [a, b] {
        let body = world.body(id).unwrap();
        assert!(body.is_finite());
    }
    assert_eq!(world.metrics().contacts_resolved, 0);
}

#[test]
fn fault_in_one_pair_leaves_other_bodies_clean() {
    let mut world = free_space_world(1.0);
    // Degenerate coincident pair plus an unrelated traveling ball.
    world.add_body(ball(1.0, 2.0, 0.0)).unwrap();
    world.add_body(ball(1.0, 2.0, 0.0)).unwrap();
    let lone = world.add_body(ball(1.0, 10.0, 1.0)).unwrap();

    world.step(DT);

    let Motion::Translating {
        position, velocity, ..
    } = world.body(lone).unwrap().motion
    else {
        unreachable!()
    };
    assert_relative_eq!(velocity.x, 1.0, epsilon = 1e-6);
    assert_relative_eq!(position.x, 10.0 + DT, epsilon = 1e-5);
}

#[test]
fn container_walls_reflect_with_their_own_restitution() {
    let mut world = SimulationWorld::with_environment(Environment {
        gravity: 0.0,
        restitution: 1.0,
        wall_restitution: Some(0.5),
        ..Environment::default()
    });
    world.set_bounds(Some(Bounds::new(
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 10.0),
    )));
    let id = world
        .add_body(
            BodySpec::free(1.0, 0.5, Vec2::new(1.0, 5.0)).with_velocity(Vec2::new(-6.0, 0.0)),
        )
        .unwrap();

    for _ in 0..20 {
        world.step(DT);
    }

    let Motion::Translating { velocity, .. } = world.body(id).unwrap().motion else {
        unreachable!()
    };
    assert_relative_eq!(velocity.x, 3.0, epsilon = 1e-4);
}

#[test]
fn blocks_sharing_an_incline_collide_one_dimensionally() {
    let mut world = SimulationWorld::with_environment(Environment {
        gravity: 9.8,
        friction: 0.0,
        restitution: 1.0,
        collision_damping: 0.8,
        ..Environment::default()
    });
    let axis = ConstraintAxis::new(Vec2::ZERO, 30.0_f32.to_radians(), 100.0);
    let lower = world.add_body(BodySpec::on_axis(5.0, 0.5, axis, 40.0)).unwrap();
    let upper = world.add_body(BodySpec::on_axis(5.0, 0.5, axis, 46.0)).unwrap();

    // Give the upper block a shove down toward the lower one.
    world
        .set_body_kinematics(
            upper,
            Kinematics::OnAxis {
                coord: 46.0,
                speed: -8.0,
            },
        )
        .unwrap();

    let mut resolved = 0;
    for _ in 0..120 {
        world.step(DT);
        resolved += world.metrics().contacts_resolved;
    }

    assert!(resolved > 0, "the blocks should have collided");
    let (a, b) = (
        world.body(lower).unwrap().motion.axis_coord().unwrap(),
        world.body(upper).unwrap().motion.axis_coord().unwrap(),
    );
    assert!(
        b - a >= 1.0 - 1e-3,
        "blocks should be separated after resolution, gap = {}",
        b - a
    );
}
