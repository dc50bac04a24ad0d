mod kinematics;
mod locomotion;
mod movement;

pub use kinematics::vertical_velocity_system;
pub use locomotion::{input_system, locomotion_state_system, spawn_player};
pub use movement::movement_system;

use crate::engine::time::TimerQueue;
use hecs::World;

/// One full simulation tick for every controller in the world, in the
/// canonical order: clock → input → state machine → vertical kinematics →
/// movement. The individual systems stay public for hosts (and tests) that
/// need to interleave their own work.
pub fn player_tick(world: &mut World, timers: &mut TimerQueue, dt: f32) {
    timers.tick(dt);
    input_system(world);
    locomotion_state_system(world, timers, dt);
    vertical_velocity_system(world, timers, dt);
    movement_system(world, dt);
}
