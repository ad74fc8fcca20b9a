use mechanica::{observables, *};

fn main() {
    let mut engine = SimulationEngine::new();
    let bob = engine
        .add_body(
            BodySpec::pivoted(1.0, Vec2::new(0.0, 3.0), 1.5, 60.0_f32.to_radians())
                .with_damping(0.999),
        )
        .expect("valid bob");

    println!(
        "small-angle period would be {:.3}s",
        observables::pendulum_period(1.5, engine.world().environment().gravity)
    );

    for frame in 0..=600 {
        if frame % 30 == 0 {
            let body = engine.body(bob).expect("bob exists");
            let Motion::Pivoted {
                angle,
                angular_velocity,
                ..
            } = body.motion
            else {
                unreachable!()
            };
            println!(
                "t={:>4.1}s θ={:>7.2}° ω={:>6.2} rad/s E={:>7.3} J",
                frame as f32 / 60.0,
                angle.to_degrees(),
                angular_velocity,
                observables::mechanical_energy(body, engine.world().environment()),
            );
        }
        engine.step(1.0 / 60.0);
    }
}
