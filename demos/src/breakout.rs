use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

use log::{debug, info};
use scene2d::forces::{create_breaking_collision, create_physics_collision_with_hook};
use scene2d::shapes::{circle, rectangle};
use scene2d::{Body, BodyId, BodyInfo, Color, Scene, SimulationConfig, Vec2};

const MAX_POS: Vec2 = Vec2 { x: 1000.0, y: 1000.0 };
const WALL_WIDTH: f64 = 20.0;
const WALL_ELASTICITY: f64 = 1.0;
const BRICK_ELASTICITY: f64 = 1.02;

const PADDLE_WIDTH: f64 = 100.0;
const PADDLE_HEIGHT: f64 = 20.0;

const BALL_RADIUS: f64 = 15.0;
const BALL_MASS: f64 = 20.0;
const BALL_INITIAL_VELOCITY: Vec2 = Vec2 { x: 750.0, y: 750.0 };

const BRICK_ROWS: usize = 3;
const BRICK_COLUMNS: usize = 10;
const BRICK_PADDING: f64 = 10.0;
const BRICK_HEIGHT: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Wall,
    Paddle,
    Brick,
    Ball,
}

/// Stand-in for an audio mixer: counts the bounce sounds that would play.
#[derive(Debug, Default)]
pub struct SoundBoard {
    pub bounces: Cell<usize>,
}

pub struct Breakout {
    pub scene: Scene,
    pub paddle: BodyId,
    pub ball: BodyId,
    pub broken: Rc<Cell<usize>>,
    pub balls_lost: usize,
}

impl Breakout {
    pub fn new(config: SimulationConfig) -> Self {
        let mut scene = Scene::with_config(config).with_side_channel(Rc::new(SoundBoard::default()));
        let broken = Rc::new(Cell::new(0));

        add_walls(&mut scene);
        let paddle = scene.add_body(Body::with_info(
            rectangle(Vec2::new(MAX_POS.x / 2.0, 0.8 * PADDLE_HEIGHT), PADDLE_WIDTH, PADDLE_HEIGHT),
            f64::INFINITY,
            Color::RED,
            BodyInfo::new(Tag::Paddle),
        ));
        add_bricks(&mut scene, &broken);
        let ball = spawn_ball(&mut scene, paddle);

        Self {
            scene,
            paddle,
            ball,
            broken,
            balls_lost: 0,
        }
    }

    pub fn bricks_left(&self) -> usize {
        self.scene
            .bodies()
            .iter()
            .filter(|(_, body)| body.info_as::<Tag>() == Some(&Tag::Brick))
            .count()
    }

    pub fn step(&mut self, dt: f64) {
        // the paddle follows the ball, clamped to the field
        let half = PADDLE_WIDTH / 2.0;
        let ball_x = self.scene.body(self.ball).centroid().x;
        let paddle = self.scene.body_mut(self.paddle);
        let y = paddle.centroid().y;
        paddle.set_centroid(Vec2::new(ball_x.clamp(half, MAX_POS.x - half), y));

        self.scene.tick(dt);

        if self.scene.body(self.ball).centroid().y < -BALL_RADIUS {
            debug!("ball lost at t={:.2}", self.scene.time());
            self.scene.body_mut(self.ball).remove();
            self.ball = spawn_ball(&mut self.scene, self.paddle);
            self.balls_lost += 1;
        }
    }
}

fn add_walls(scene: &mut Scene) {
    let walls = [
        (Vec2::new(MAX_POS.x / 2.0, MAX_POS.y + WALL_WIDTH / 2.0), MAX_POS.x, WALL_WIDTH),
        (Vec2::new(MAX_POS.x + WALL_WIDTH / 2.0, MAX_POS.y / 2.0), WALL_WIDTH, MAX_POS.y),
        (Vec2::new(-WALL_WIDTH / 2.0, MAX_POS.y / 2.0), WALL_WIDTH, MAX_POS.y),
    ];
    for (center, width, height) in walls {
        scene.add_body(Body::with_info(
            rectangle(center, width, height),
            f64::INFINITY,
            Color::WHITE,
            BodyInfo::new(Tag::Wall),
        ));
    }
}

fn add_bricks(scene: &mut Scene, broken: &Rc<Cell<usize>>) {
    let brick_width = (MAX_POS.x - (BRICK_COLUMNS + 1) as f64 * BRICK_PADDING) / BRICK_COLUMNS as f64;
    let colors = Color::rainbow(BRICK_COLUMNS);

    for row in 0..BRICK_ROWS {
        for column in 0..BRICK_COLUMNS {
            let center = Vec2::new(
                BRICK_PADDING + brick_width / 2.0 + column as f64 * (brick_width + BRICK_PADDING),
                MAX_POS.y - BRICK_PADDING - BRICK_HEIGHT / 2.0 - row as f64 * (BRICK_HEIGHT + BRICK_PADDING),
            );
            let counter = Rc::clone(broken);
            let info = BodyInfo::with_release(Tag::Brick, move |_| counter.set(counter.get() + 1));
            // built upright, then laid on its side
            let mut brick = Body::with_info(
                rectangle(center, BRICK_HEIGHT, brick_width),
                f64::INFINITY,
                colors[column * 6],
                info,
            );
            brick.rotate_about_point(-PI / 2.0, center);
            scene.add_body(brick);
        }
    }
}

/// Adds a ball just above the paddle and wires its collisions by tag.
fn spawn_ball(scene: &mut Scene, paddle: BodyId) -> BodyId {
    let center = scene.body(paddle).centroid() + Vec2::new(0.0, 2.0 * BALL_RADIUS);
    let mut ball = Body::with_info(circle(center, BALL_RADIUS), BALL_MASS, Color::RED, BodyInfo::new(Tag::Ball));
    ball.set_velocity(BALL_INITIAL_VELOCITY);
    let ball = scene.add_body(ball);

    let targets: Vec<(BodyId, Tag)> = scene
        .bodies()
        .iter()
        .filter_map(|(id, body)| body.info_as::<Tag>().map(|tag| (id, *tag)))
        .collect();
    let sounds = scene.side_channel::<Rc<SoundBoard>>().cloned();

    for (target, tag) in targets {
        match tag {
            Tag::Wall | Tag::Paddle => {
                let sounds = sounds.clone();
                create_physics_collision_with_hook(scene, WALL_ELASTICITY, ball, target, move |_, _| {
                    if let Some(sounds) = &sounds {
                        sounds.bounces.set(sounds.bounces.get() + 1);
                    }
                });
            }
            Tag::Brick => create_breaking_collision(scene, BRICK_ELASTICITY, ball, target),
            Tag::Ball => {}
        }
    }
    ball
}

pub fn run(config: SimulationConfig, ticks: usize, dt: f64) {
    let mut game = Breakout::new(config);
    info!("breakout: {} bricks", game.bricks_left());

    for _ in 0..ticks {
        game.step(dt);
        if game.bricks_left() == 0 {
            info!("breakout: cleared at t={:.2}s", game.scene.time());
            break;
        }
    }

    let bounces = game
        .scene
        .side_channel::<Rc<SoundBoard>>()
        .map_or(0, |sounds| sounds.bounces.get());
    info!(
        "breakout: t={:.2}s, {} bricks broken, {} left, {} bounces, {} balls lost",
        game.scene.time(),
        game.broken.get(),
        game.bricks_left(),
        bounces,
        game.balls_lost
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let game = Breakout::new(SimulationConfig::default());
        // 3 walls, paddle, 30 bricks, ball
        assert_eq!(game.scene.body_count(), 35);
        assert_eq!(game.bricks_left(), 30);
        // ball against every other body
        assert_eq!(game.scene.force_creator_count(), 34);
    }

    #[test]
    fn test_ball_breaks_bricks() {
        let mut game = Breakout::new(SimulationConfig::default());
        for _ in 0..180 {
            game.step(1.0 / 60.0);
        }
        assert!(game.broken.get() >= 1);
        assert_eq!(game.bricks_left(), 30 - game.broken.get());
        let sounds = game.scene.side_channel::<Rc<SoundBoard>>().unwrap();
        assert!(sounds.bounces.get() >= 1);
    }
}
