use log::info;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use scene2d::forces::create_newtonian_gravity;
use scene2d::shapes::star;
use scene2d::{Body, BodyId, Color, Scene, SimulationConfig, Vec2};

const MIN_POS: Vec2 = Vec2 { x: 0.0, y: 0.0 };
const MAX_POS: Vec2 = Vec2 { x: 2000.0, y: 1000.0 };
const G: f64 = 30.0;
const MIN_RADIUS: f64 = 20.0;
const MAX_RADIUS: f64 = 60.0;
const RAINBOW_STEPS: usize = 5;
// Stars spawn in the middle 3/4 of the field
const SPAWN_FRACTION: f64 = 0.75;

pub fn build(config: SimulationConfig, count: usize, seed: u64) -> (Scene, Vec<BodyId>) {
    let mut rng = Pcg32::seed_from_u64(seed);
    let rainbow = Color::rainbow(RAINBOW_STEPS);
    let size = MAX_POS - MIN_POS;
    let margin = size * ((1.0 - SPAWN_FRACTION) / 2.0);

    let mut scene = Scene::with_config(config);
    let stars: Vec<BodyId> = (0..count)
        .map(|i| {
            let radius = rng.random_range(MIN_RADIUS..MAX_RADIUS);
            let center = Vec2::new(
                MIN_POS.x + margin.x + rng.random_range(0.0..size.x * SPAWN_FRACTION),
                MIN_POS.y + margin.y + rng.random_range(0.0..size.y * SPAWN_FRACTION),
            );
            let color = rainbow[i % rainbow.len()];
            scene.add_body(Body::new(star(4, center, radius / 2.0, radius), radius * radius, color))
        })
        .collect();

    for (i, &a) in stars.iter().enumerate() {
        for &b in &stars[i + 1..] {
            create_newtonian_gravity(&mut scene, G, a, b);
        }
    }
    (scene, stars)
}

/// Mass-weighted RMS distance of the stars from their center of mass.
pub fn spread(scene: &Scene, stars: &[BodyId]) -> f64 {
    let total_mass: f64 = stars.iter().map(|id| scene.body(*id).mass()).sum();
    if total_mass == 0.0 {
        return 0.0;
    }
    let center = stars
        .iter()
        .fold(Vec2::ZERO, |acc, id| acc + scene.body(*id).centroid() * scene.body(*id).mass())
        * (1.0 / total_mass);
    let inertia: f64 = stars
        .iter()
        .map(|id| scene.body(*id).mass() * scene.body(*id).centroid().distance_squared(center))
        .sum();
    (inertia / total_mass).sqrt()
}

pub fn run(config: SimulationConfig, count: usize, seed: u64, ticks: usize, dt: f64) {
    let (mut scene, stars) = build(config, count, seed);
    info!(
        "nbodies: {} stars, {} gravity pairs, initial spread {:.1}",
        stars.len(),
        scene.force_creator_count(),
        spread(&scene, &stars)
    );

    for _ in 0..ticks {
        scene.tick(dt);
    }

    info!("nbodies: t={:.2}s, spread {:.1}", scene.time(), spread(&scene, &stars));
}
