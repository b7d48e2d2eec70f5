use physlab::engine::{preset_scene, PRESET_DROP, PRESET_ORBIT};
use physlab::models::presets::DEMO_DT;
use physlab::{SandboxError, SimulationConfig, Simulator};

fn main() -> Result<(), SandboxError> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    // Ball dropped from 10 m: restitution 0.8, friction 0.1.
    let mut sim = Simulator::new(preset_scene(PRESET_DROP)?, SimulationConfig::default());
    let ghost = sim.predict("A")?;
    println!("ghost trajectory: {} points", ghost.len());

    sim.play();
    let mut last_vy = 0.0;
    let mut bounces = 0;
    while sim.time() < 4.0 {
        let report = sim.step(DEMO_DT);
        let body = sim.body("A").ok_or(SandboxError::UnknownBody { label: "A".into() })?;
        let vy = body.velocity().y;
        if last_vy < 0.0 && vy > 0.0 {
            bounces += 1;
            println!(
                "bounce {} at t = {:.3} s: {:.3} m/s -> {:.3} m/s",
                bounces, report.time, last_vy, vy
            );
        }
        last_vy = vy;
    }
    let m = sim.metrics_for("A")?;
    println!(
        "t = {:.3} s  KE = {:.3}  PE = {:.3}  total = {:.3}  speed = {:.3}",
        m.time, m.kinetic, m.potential, m.total, m.speed
    );

    // Orbit: one revolution around a fixed star.
    let mut orbit = Simulator::new(preset_scene(PRESET_ORBIT)?, SimulationConfig::default());
    orbit.play();
    for _ in 0..600 {
        orbit.step(DEMO_DT);
    }
    for snap in orbit.snapshots() {
        println!("{:>8}: pos = {:?}", snap.label, snap.position);
    }
    Ok(())
}
