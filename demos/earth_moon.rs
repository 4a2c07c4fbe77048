use glam::DVec2;
use orbital::prelude::*;
use tracing::info;

const DISTANCE_SCALE: f64 = 1e-6;
const SIZE_SCALE: f64 = 1e-5;
const WINDOW_CENTRE: DVec2 = DVec2::new(540.0, 540.0);

const SECONDS_PER_HOUR: u64 = 60 * 60;
const DAYS: u64 = 28;

fn main() -> Result<(), orbital::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let earth =
        BodyDescriptor::new("Earth", [0.0, 0.0], 5.974e24, 6378.1e3).with_color(Color::BLUE);
    let moon = BodyDescriptor::new("Moon", [0.4055e9, 0.0], 0.07346e24, 1738.1e3)
        .with_velocity([0.0, -0.970e3])
        .with_color(Color::WHITE);

    let projection = Projection::scaled(DISTANCE_SCALE)
        .flipped()
        .with_offset(WINDOW_CENTRE);
    let config = SimulationConfig::default()
        .with_time_step(1.0)
        .with_trail(
            TrailConfig::every(SECONDS_PER_HOUR)
                .with_capacity(24 * 7)
                .with_projection(projection),
        );

    let mut simulation = Simulation::from_descriptors([earth, moon], config)?;

    for _ in 0..DAYS * 24 {
        simulation.run(SECONDS_PER_HOUR);

        let hours = simulation.elapsed() / SECONDS_PER_HOUR as f64;
        for body in simulation.bodies() {
            let (d, v, f) = (body.position(), body.velocity(), body.force());
            println!(
                "{:>5}: d ({:+.1e}, {:+.1e}) v ({:+.1e}, {:+.1e}) f ({:+.1e}, {:+.1e})",
                body.name(),
                d.x,
                d.y,
                v.x,
                v.y,
                f.x,
                f.y,
            );
        }
        println!("Hours: {hours:.0}");
    }

    for body in simulation.snapshots() {
        let pixel = projection.project(body.position);
        info!(
            body = body.name,
            x = pixel.x,
            y = pixel.y,
            radius = body.radius * SIZE_SCALE,
            trail = body.trail.map_or(0, Trail::len),
            "final display position"
        );
    }

    info!(
        momentum = %simulation.total_momentum(),
        energy = simulation.total_energy(),
        "final state"
    );

    Ok(())
}
