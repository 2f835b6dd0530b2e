//! Headless demo: follow a moving entity around an obstacle, then play a
//! recorded fly-by and hand control back to the follow camera.
//!
//! Usage: `cinecam [options.toml]`. Set `RUST_LOG=debug` for mode
//! transitions.

use std::{path::Path, sync::Arc};

use cinecam::{
    camera::{CameraController, CameraMode, PathData, Pose, TickContext},
    options::Options,
    world::{Collider, ColliderSet, EntityArena, EntityPose},
    CameraError,
};
use glam::{Quat, Vec3};

const TICK: f32 = 1.0 / 60.0;

fn load_options() -> Result<Options, CameraError> {
    match std::env::args().nth(1) {
        Some(path) => Options::load(Path::new(&path)),
        None => Ok(Options::default()),
    }
}

fn demo_path() -> Result<PathData, CameraError> {
    let center = Vec3::new(0.0, 1.0, -20.0);
    PathData::from_poses([
        (0.0, Pose::looking_at(Vec3::new(-30.0, 15.0, 10.0), center, 60.0)),
        (3.0, Pose::looking_at(Vec3::new(0.0, 25.0, 20.0), center, 50.0)),
        (6.0, Pose::looking_at(Vec3::new(30.0, 10.0, 0.0), center, 70.0)),
    ])
}

fn run() -> Result<(), CameraError> {
    let options = load_options()?;

    let mut arena = EntityArena::new();
    let runner = arena.spawn(EntityPose::at(Vec3::ZERO));

    let mut world = ColliderSet::new();
    let _ = world.push(Collider::ground(-0.5));
    let _ = world.push(Collider::Sphere {
        center: Vec3::new(0.0, 1.0, -20.0),
        radius: 3.0,
    });

    let mut camera = CameraController::new(options)?;
    camera.load_path(Arc::new(demo_path()?));

    // Entity runs down -Z past the obstacle for three seconds
    for tick in 0..180u32 {
        let t = tick as f32 * TICK;
        let _ = arena.set_pose(
            runner,
            EntityPose {
                position: Vec3::new((t * 1.5).sin() * 4.0, 0.0, -t * 10.0),
                orientation: Quat::IDENTITY,
                extent: Vec3::ONE,
            },
        );
        let ctx = TickContext::new(TICK, &arena, &world);
        camera.follow_entity(&ctx, runner, 0.0, 8.0)?;
        if tick % 30 == 0 {
            log_pose("follow", camera.pose());
        }
    }

    camera.play_flyby(4.0)?;
    let mut ticks = 0u32;
    while camera.mode() == CameraMode::FlyingBy {
        camera.advance(TICK)?;
        ticks += 1;
        if ticks % 30 == 0 {
            log_pose("fly-by", camera.pose());
        }
    }

    let ctx = TickContext::new(TICK, &arena, &world);
    for _ in 0..60 {
        camera.follow_entity(&ctx, runner, 0.0, 8.0)?;
    }
    log_pose("resumed", camera.pose());
    Ok(())
}

fn log_pose(label: &str, pose: Pose) {
    let (yaw, pitch) = pose.yaw_pitch();
    log::info!(
        "{label}: position ({:.2}, {:.2}, {:.2}) yaw {:.1} pitch {:.1} fov {:.1}",
        pose.position.x,
        pose.position.y,
        pose.position.z,
        yaw.to_degrees(),
        pitch.to_degrees(),
        pose.fov
    );
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
