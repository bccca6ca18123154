use std::f64::consts::PI;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use scene2d::forces::create_destructive_collision;
use scene2d::shapes::{ellipse, pie, rectangle};
use scene2d::{Body, BodyId, BodyInfo, Color, Scene, SimulationConfig, Vec2};

const MAX_POS: Vec2 = Vec2 { x: 1000.0, y: 1000.0 };

const SHIP_PADDING: f64 = 5.0;
const MAJOR: f64 = 60.0;
const MINOR: f64 = 20.0;
const SHIP_MASS: f64 = 50.0;
const SHIP_COLOR: Color = Color::new(0.40, 0.60, 0.80);
const SHIP_SPEED: f64 = 750.0;

const ENEMIES_PER_ROW: usize = 8;
const ENEMY_ROWS: usize = 3;
const ENEMY_PADDING: f64 = 25.0;
const ENEMY_MASS: f64 = 100.0;
const ENEMY_SPEED: f64 = 100.0;
// Leaves two enemies' worth of room to march sideways
const ENEMY_RADIUS: f64 = MAX_POS.x / (2.0 * (ENEMIES_PER_ROW + 2) as f64);

const AMMO_WIDTH: f64 = 10.0;
const AMMO_HEIGHT: f64 = 40.0;
const AMMO_MASS: f64 = 5.0;
const AMMO_SPEED: f64 = 1000.0;
const TIME_BETWEEN_AMMO: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Ship,
    Enemy,
    ShipAmmo,
    EnemyAmmo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Running,
    Cleared,
    ShipDestroyed,
    Invaded,
}

pub struct Invaders {
    pub scene: Scene,
    pub ship: BodyId,
    pub shots_fired: usize,
    rng: Pcg32,
}

impl Invaders {
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        let mut scene = Scene::with_config(config);
        let ship = scene.add_body(Body::with_info(
            ellipse(Vec2::new(MAX_POS.x / 2.0, SHIP_PADDING + MINOR), MAJOR, MINOR),
            SHIP_MASS,
            SHIP_COLOR,
            BodyInfo::new(Tag::Ship),
        ));

        for row in 0..ENEMY_ROWS {
            for column in 0..ENEMIES_PER_ROW {
                let center = Vec2::new(
                    (2 * column + 1) as f64 * ENEMY_RADIUS + 1.0,
                    MAX_POS.y - (row + 1) as f64 * (ENEMY_RADIUS + ENEMY_PADDING),
                );
                // a wedge with its point facing the ship
                let shape = pie(center, ENEMY_RADIUS, PI / 6.0, 5.0 * PI / 6.0);
                let mut enemy = Body::with_info(shape, ENEMY_MASS, Color::GRAY, BodyInfo::new(Tag::Enemy));
                enemy.set_velocity(Vec2::new(ENEMY_SPEED, 0.0));
                scene.add_body(enemy);
            }
        }

        Self {
            scene,
            ship,
            shots_fired: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn tagged(&self, tag: Tag) -> Vec<BodyId> {
        self.scene
            .bodies()
            .iter()
            .filter(|(_, body)| body.info_as::<Tag>() == Some(&tag))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn enemies_left(&self) -> usize {
        self.tagged(Tag::Enemy).len()
    }

    pub fn ship_alive(&self) -> bool {
        self.scene.bodies().contains(self.ship)
    }

    pub fn outcome(&self) -> Outcome {
        if !self.ship_alive() {
            return Outcome::ShipDestroyed;
        }
        let enemies = self.tagged(Tag::Enemy);
        if enemies.is_empty() {
            return Outcome::Cleared;
        }
        let ship_y = self.scene.body(self.ship).centroid().y;
        if enemies.iter().any(|id| self.scene.body(*id).centroid().y <= ship_y) {
            return Outcome::Invaded;
        }
        Outcome::Running
    }

    pub fn step(&mut self, dt: f64) {
        let ship_alive = self.ship_alive();
        if self.scene.time() >= TIME_BETWEEN_AMMO {
            self.scene.reset_time();
            if ship_alive {
                self.fire_from_ship();
                self.fire_from_enemy();
            }
        }
        if ship_alive {
            self.steer_ship();
        }
        self.march_enemies();
        self.scene.tick(dt);
        self.clear_stray_ammo();
    }

    fn fire_from_ship(&mut self) {
        let enemies = self.tagged(Tag::Enemy);
        let origin = self.scene.body(self.ship).centroid();
        let ammo = self.scene.add_body(ammo_body(origin, Tag::ShipAmmo, AMMO_SPEED));
        for enemy in enemies {
            create_destructive_collision(&mut self.scene, ammo, enemy);
        }
        self.shots_fired += 1;
    }

    fn fire_from_enemy(&mut self) {
        let enemies = self.tagged(Tag::Enemy);
        if enemies.is_empty() {
            return;
        }
        let shooter = enemies[self.rng.random_range(0..enemies.len())];
        let origin = self.scene.body(shooter).centroid() - Vec2::new(0.0, ENEMY_PADDING);
        let ammo = self.scene.add_body(ammo_body(origin, Tag::EnemyAmmo, -AMMO_SPEED));
        create_destructive_collision(&mut self.scene, self.ship, ammo);
    }

    /// Moves the ship under the lowest enemy, leading it by the shot's flight time.
    fn steer_ship(&mut self) {
        let ship = self.scene.body(self.ship);
        let ship_x = ship.centroid().x;
        let ship_y = ship.centroid().y;

        let target = self
            .tagged(Tag::Enemy)
            .into_iter()
            .map(|id| self.scene.body(id))
            .min_by(|a, b| {
                let key = |body: &Body| (body.centroid().y, (body.centroid().x - ship_x).abs());
                key(*a).partial_cmp(&key(*b)).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|enemy| {
                let flight = (enemy.centroid().y - ship_y) / AMMO_SPEED;
                enemy.centroid().x + enemy.velocity().x * flight
            });

        let velocity = match target {
            Some(x) if (x - ship_x).abs() > SHIP_SPEED / 60.0 => Vec2::new(SHIP_SPEED.copysign(x - ship_x), 0.0),
            _ => Vec2::ZERO,
        };
        let clamped_x = ship_x.clamp(MAJOR, MAX_POS.x - MAJOR);
        let ship = self.scene.body_mut(self.ship);
        ship.set_velocity(velocity);
        ship.set_centroid(Vec2::new(clamped_x, ship_y));
    }

    /// The formation reverses and steps down once any enemy reaches a side.
    fn march_enemies(&mut self) {
        let enemies = self.tagged(Tag::Enemy);
        let at_edge = enemies.iter().any(|id| {
            let body = self.scene.body(*id);
            let x = body.centroid().x;
            let vx = body.velocity().x;
            (vx > 0.0 && x + ENEMY_RADIUS >= MAX_POS.x) || (vx < 0.0 && x - ENEMY_RADIUS <= 0.0)
        });
        if !at_edge {
            return;
        }
        debug!("invaders turn at t={:.2}", self.scene.time());
        for id in enemies {
            let enemy = self.scene.body_mut(id);
            enemy.set_velocity(-enemy.velocity());
            enemy.translate(Vec2::new(0.0, -ENEMY_RADIUS / 2.0));
        }
    }

    fn clear_stray_ammo(&mut self) {
        for tag in [Tag::ShipAmmo, Tag::EnemyAmmo] {
            for id in self.tagged(tag) {
                let y = self.scene.body(id).centroid().y;
                if !(-AMMO_HEIGHT..=MAX_POS.y + AMMO_HEIGHT).contains(&y) {
                    self.scene.body_mut(id).remove();
                }
            }
        }
    }
}

fn ammo_body(origin: Vec2, tag: Tag, speed: f64) -> Body {
    let color = match tag {
        Tag::ShipAmmo => Color::new(0.22, 1.0, 0.08),
        _ => Color::new(0.3, 0.3, 0.3),
    };
    let mut ammo = Body::with_info(rectangle(origin, AMMO_WIDTH, AMMO_HEIGHT), AMMO_MASS, color, BodyInfo::new(tag));
    ammo.set_velocity(Vec2::new(0.0, speed));
    ammo
}

pub fn run(config: SimulationConfig, ticks: usize, dt: f64) {
    let mut game = Invaders::new(config, 0);
    let starting = game.enemies_left();
    info!("invaders: {} enemies", starting);

    let mut outcome = Outcome::Running;
    for _ in 0..ticks {
        game.step(dt);
        outcome = game.outcome();
        if outcome != Outcome::Running {
            break;
        }
    }

    info!(
        "invaders: {:?}, {} shots fired, {} of {} enemies destroyed",
        outcome,
        game.shots_fired,
        starting - game.enemies_left(),
        starting
    );
}
