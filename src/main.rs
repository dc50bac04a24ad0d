use clap::Parser;
use glam::{Vec2, Vec3};
use hecs::World;
use std::sync::{Arc, Mutex};

use strider::backend::{CharacterMover, FlatGround, NullAnimator};
use strider::components::{LocoFsm, MovementContext};
use strider::engine::input::{InputEvent, InputQueue};
use strider::engine::time::{FrameTimer, TimerQueue};
use strider::systems::{player_tick, spawn_player};
use strider::LocomotionConfig;

#[derive(Parser)]
#[command(name = "strider", about = "Headless locomotion demo")]
struct Args {
    /// Simulated duration in seconds
    #[arg(long, default_value_t = 3.0)]
    seconds: f32,

    /// Fixed tick length in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Advance by wall-clock delta time instead of the fixed tick
    #[arg(long)]
    realtime: bool,
}

/// Mover shared between the world and the printout below.
struct SharedMover(Arc<Mutex<FlatGround>>);

impl CharacterMover for SharedMover {
    fn move_by(&mut self, displacement: Vec3) -> bool {
        self.0.lock().expect("mover poisoned").move_by(displacement)
    }
}

fn main() {
    let args = Args::parse();

    let ground = Arc::new(Mutex::new(FlatGround::new(Vec3::ZERO, 0.0)));
    let mut world = World::new();
    let mut timers = TimerQueue::new();
    let player = spawn_player(
        &mut world,
        &mut timers,
        LocomotionConfig::default(),
        Box::new(SharedMover(ground.clone())),
        Box::new(NullAnimator),
    );

    // Scripted input: start running, then a three-jump combo, then settle.
    let mut script = vec![
        (0.20, InputEvent::MoveChanged(Vec2::new(0.0, 1.0))),
        (0.50, InputEvent::JumpChanged(true)),
        (0.60, InputEvent::JumpChanged(false)),
        (1.40, InputEvent::JumpChanged(true)),
        (1.50, InputEvent::JumpChanged(false)),
        (2.40, InputEvent::JumpChanged(true)),
        (2.50, InputEvent::JumpChanged(false)),
        (2.80, InputEvent::MoveChanged(Vec2::ZERO)),
    ];
    script.retain(|(at, _)| *at <= args.seconds);

    let mut elapsed = 0.0_f32;
    let mut frame = FrameTimer::new();
    let mut last_label = {
        let fsm = world.get::<&LocoFsm>(player).expect("player fsm");
        fsm.state.label()
    };
    println!("{elapsed:6.3}s  {last_label:<14}");

    while elapsed < args.seconds {
        let dt = if args.realtime {
            frame.tick();
            frame.dt
        } else {
            args.dt
        };

        while script.first().is_some_and(|(at, _)| *at <= elapsed) {
            let (_, event) = script.remove(0);
            world
                .get::<&mut InputQueue>(player)
                .expect("player input queue")
                .push(event);
        }

        player_tick(&mut world, &mut timers, dt);
        elapsed += dt;

        let ctx = world.get::<&MovementContext>(player).expect("player ctx");
        let fsm = world.get::<&LocoFsm>(player).expect("player fsm");
        if fsm.state.label() != last_label {
            last_label = fsm.state.label();
            let height = ground.lock().expect("mover poisoned").position.y;
            println!(
                "{elapsed:6.3}s  {last_label:<14} combo={} vy={:+.2} y={:.2}",
                ctx.jump_count, ctx.applied_movement.y, height,
            );
        }
    }
}
