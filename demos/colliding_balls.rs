use mechanica::{observables, *};

fn main() {
    // Zero gravity, perfectly elastic: the billiard-table setup.
    let mut engine = SimulationEngine::with_environment(Environment {
        gravity: 0.0,
        restitution: 1.0,
        ..Environment::default()
    });
    engine
        .world_mut()
        .set_bounds(Some(Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(16.0, 9.0))));

    let a = engine
        .add_body(BodySpec::free(2.0, 0.5, Vec2::new(3.0, 4.5)).with_velocity(Vec2::new(5.0, 0.0)))
        .expect("valid ball");
    let b = engine
        .add_body(
            BodySpec::free(3.0, 0.5, Vec2::new(12.0, 4.5)).with_velocity(Vec2::new(-4.0, 0.0)),
        )
        .expect("valid ball");

    for frame in 0..=240 {
        if frame % 30 == 0 {
            let (ball_a, ball_b) = (
                engine.body(a).expect("ball exists"),
                engine.body(b).expect("ball exists"),
            );
            let momentum = observables::momentum(ball_a) + observables::momentum(ball_b);
            let energy =
                observables::kinetic_energy(ball_a) + observables::kinetic_energy(ball_b);
            println!(
                "t={:>4.1}s p=({:>6.2}, {:>6.2}) kg·m/s KE={:>7.2} J",
                frame as f32 / 60.0,
                momentum.x,
                momentum.y,
                energy
            );
        }
        engine.step(1.0 / 60.0);
    }
}
