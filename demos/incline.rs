use mechanica::*;

fn main() {
    let mut engine = SimulationEngine::with_environment(Environment {
        gravity: 9.8,
        friction: 0.2,
        restitution: 1.0,
        collision_damping: 0.8,
        ..Environment::default()
    });

    let axis = ConstraintAxis::new(Vec2::ZERO, 30.0_f32.to_radians(), 12.0);
    let block = engine
        .add_body(BodySpec::on_axis(5.0, 0.5, axis, 4.0))
        .expect("valid block");
    let upper = engine
        .add_body(BodySpec::on_axis(3.0, 0.5, axis, 8.0))
        .expect("valid block");

    // Push the lower block up the slope.
    engine
        .world_mut()
        .set_applied_force(block, 1, 40.0, 30.0_f32.to_radians())
        .expect("force accepted");

    for frame in 0..300 {
        engine.step(1.0 / 60.0);
        if frame % 60 == 0 {
            for id in [block, upper] {
                let body = engine.body(id).expect("body exists");
                println!(
                    "t={:>4.1}s block {:?}: s={:>6.2} v={:>6.2} [{:?}]",
                    frame as f32 / 60.0,
                    id,
                    body.motion.axis_coord().unwrap_or(0.0),
                    body.motion.axis_speed().unwrap_or(0.0),
                    body.friction_state,
                );
            }
        }
    }

    let metrics = engine.world().metrics();
    println!(
        "last step: {} bodies, {} contacts, {} boundary hits",
        metrics.bodies_stepped, metrics.contacts_resolved, metrics.boundary_hits
    );
}
