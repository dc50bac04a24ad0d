use hecs::World;

use crate::components::{LocoFsm, MovementContext};
use crate::engine::time::TimerQueue;
use crate::kinematics::update_vertical_velocity;

/// Integrate vertical velocity for every controller. Runs after the state
/// system (so the tick a jump starts integrates the takeoff velocity, not
/// grounded gravity) and before the movement system.
///
/// Also polls the combo-reset timer: once 0.5 s of grounded time pass without
/// a re-jump cancelling it, the combo level drops back to 0.
pub fn vertical_velocity_system(world: &mut World, timers: &mut TimerQueue, dt: f32) {
    for (_entity, (ctx, fsm)) in world.query_mut::<(&mut MovementContext, &LocoFsm)>() {
        if let Some(handle) = ctx.jump_reset_timer {
            if timers.poll(handle) {
                ctx.jump_reset_timer = None;
                ctx.jump_count = 0;
                #[cfg(debug_assertions)]
                println!("[kinematics] jump count reset");
            }
        }

        update_vertical_velocity(ctx, fsm.state.is_grounded_root(), timers, dt);
    }
}
