use std::f64::consts::PI;

use log::info;
use scene2d::forces::{create_drag, create_spring};
use scene2d::shapes::circle;
use scene2d::{Body, BodyId, Color, Scene, SimulationConfig, Vec2};

const WIDTH: f64 = 2000.0;
const HEIGHT: f64 = 1000.0;
const K: f64 = 5000.0;
const GAMMA: f64 = 0.5;
const INIT_SPEED: f64 = 75.0;

/// Builds `anchor, link_0 .. link_{n-1}, anchor`, each neighbour pair joined by
/// a spring and every body damped by drag.
pub fn build(config: SimulationConfig, count: usize) -> (Scene, Vec<BodyId>) {
    let count = count.max(1);
    let radius = WIDTH / (2 * count) as f64;
    let mid_y = HEIGHT / 2.0;
    let rainbow = Color::rainbow((count / 6).max(1));
    // one full wave every third of the chain
    let wave = (count / 3).max(1) as f64;

    let mut scene = Scene::with_config(config);
    let mut chain = Vec::with_capacity(count + 2);
    chain.push(scene.add_body(Body::new(
        circle(Vec2::new(-radius, mid_y), radius),
        f64::INFINITY,
        Color::BLACK,
    )));

    for i in 0..count {
        let center = Vec2::new(radius * (2 * i + 1) as f64, mid_y);
        let id = scene.add_body(Body::new(circle(center, radius), radius * radius, rainbow[i % rainbow.len()]));
        let speed = INIT_SPEED * ((count - i) as f64).sqrt() * (PI * i as f64 / wave).sin();
        scene.body_mut(id).set_velocity(Vec2::new(0.0, speed));
        chain.push(id);
    }

    chain.push(scene.add_body(Body::new(
        circle(Vec2::new(WIDTH + radius, mid_y), radius),
        f64::INFINITY,
        Color::BLACK,
    )));

    for pair in chain.windows(2) {
        create_spring(&mut scene, K, pair[0], pair[1]);
        create_drag(&mut scene, GAMMA, pair[0]);
    }
    if let Some(&last) = chain.last() {
        create_drag(&mut scene, GAMMA, last);
    }
    (scene, chain)
}

/// Largest vertical distance of any link from the rest line.
pub fn amplitude(scene: &Scene, chain: &[BodyId]) -> f64 {
    chain
        .iter()
        .map(|id| (scene.body(*id).centroid().y - HEIGHT / 2.0).abs())
        .fold(0.0, f64::max)
}

pub fn kinetic_energy(scene: &Scene, chain: &[BodyId]) -> f64 {
    chain
        .iter()
        .map(|id| scene.body(*id))
        .filter(|body| !body.is_immovable())
        .map(|body| 0.5 * body.mass() * body.velocity().magnitude_squared())
        .sum()
}

pub fn run(config: SimulationConfig, count: usize, ticks: usize, dt: f64) {
    let (mut scene, chain) = build(config, count);
    info!(
        "damping: {} links, kinetic energy {:.3e}",
        chain.len() - 2,
        kinetic_energy(&scene, &chain)
    );

    for _ in 0..ticks {
        scene.tick(dt);
    }

    info!(
        "damping: t={:.2}s, kinetic energy {:.3e}, amplitude {:.1}",
        scene.time(),
        kinetic_energy(&scene, &chain),
        amplitude(&scene, &chain)
    );
}
