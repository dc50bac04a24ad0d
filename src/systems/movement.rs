use glam::{Quat, Vec3};
use hecs::World;

use crate::backend::MoverBinding;
use crate::components::{Facing, MovementContext};

/// Apply orientation and hand the tick's displacement to the mover.
/// Runs last each tick.
///
/// Rotation: while movement is pressed, slerp the facing toward the
/// horizontal movement direction; with no input the orientation holds (no
/// drift back to a rest pose). The slerp factor is clamped to 1 so a long
/// frame cannot overshoot the target.
///
/// The mover's return value is the ground probe for the **next** tick's
/// transition evaluation.
pub fn movement_system(world: &mut World, dt: f32) {
    for (_entity, (ctx, facing, mover)) in
        world.query_mut::<(&mut MovementContext, &mut Facing, &mut MoverBinding)>()
    {
        if ctx.is_movement_pressed {
            let direction = Vec3::new(ctx.current_movement.x, 0.0, ctx.current_movement.z);
            if direction.length_squared() > 0.0 {
                let target = Quat::from_rotation_y(direction.x.atan2(direction.z));
                let t = (ctx.config.rotation_factor_per_frame * dt).min(1.0);
                facing.0 = facing.0.slerp(target, t);
            }
        }

        ctx.grounded = mover.0.move_by(ctx.applied_movement * dt);
    }
}
