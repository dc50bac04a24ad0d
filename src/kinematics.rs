use crate::components::MovementContext;
use crate::engine::time::TimerQueue;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// How long the character must stay grounded (without re-jumping) before the
/// combo level resets to 0.
pub const JUMP_RESET_DELAY: f32 = 0.5;

/// Floor for the smoothed vertical velocity while descending (terminal fall
/// speed). Ascent is never clamped.
pub const TERMINAL_FALL_SPEED: f32 = -20.0;

/// Highest combo level; `jump_count` lives in `0..=MAX_JUMP_LEVEL`.
pub const MAX_JUMP_LEVEL: u8 = 3;

// ---------------------------------------------------------------------------
// Jump profile
// ---------------------------------------------------------------------------

/// Per-level gravity and takeoff velocity, derived once from the desired
/// first-jump height `h` and total airtime `T`.
///
/// With `apex = T / 2`, a level targeting `h + dh` over `apex * s` gets:
///
/// ```text
/// gravity          = -2 (h + dh) / (apex * s)^2
/// initial_velocity =  2 (h + dh) / (apex * s)
/// ```
///
/// Combo levels go higher and hang longer — level 2 adds 2 units of height at
/// 1.25x the apex time, level 3 adds 4 at 1.5x. Gameplay tuning, not physics.
///
/// Both tables are indexed directly by combo level. Index 0 of `gravity` is
/// the base (grounded) gravity and aliases level 1; index 0 of
/// `initial_velocity` is unused because a jump always starts at level 1.
#[derive(Clone, Copy, Debug)]
pub struct JumpProfile {
    pub gravity: [f32; 4],
    pub initial_velocity: [f32; 4],
}

impl JumpProfile {
    pub fn derive(max_jump_height: f32, max_jump_time: f32) -> Self {
        let time_to_apex = max_jump_time / 2.0;

        let first_gravity = (-2.0 * max_jump_height) / (time_to_apex * time_to_apex);
        let first_velocity = (2.0 * max_jump_height) / time_to_apex;
        let second_apex = time_to_apex * 1.25;
        let second_gravity = (-2.0 * (max_jump_height + 2.0)) / (second_apex * second_apex);
        let second_velocity = (2.0 * (max_jump_height + 2.0)) / second_apex;
        let third_apex = time_to_apex * 1.5;
        let third_gravity = (-2.0 * (max_jump_height + 4.0)) / (third_apex * third_apex);
        let third_velocity = (2.0 * (max_jump_height + 4.0)) / third_apex;

        Self {
            gravity: [first_gravity, first_gravity, second_gravity, third_gravity],
            initial_velocity: [0.0, first_velocity, second_velocity, third_velocity],
        }
    }
}

// ---------------------------------------------------------------------------
// Per-tick vertical integration
// ---------------------------------------------------------------------------

/// Integrate vertical velocity for one tick. Runs every tick regardless of
/// the active state.
///
/// `grounded_root` is whether the FSM's active root state is `Grounded` —
/// not the raw collision probe. On the tick a jump starts, the probe still
/// reports ground contact but the machine is already in `Jump`, and snapping
/// back to grounded gravity would swallow the takeoff velocity.
///
/// Three regimes:
/// - grounded: pin vertical velocity to the small negative `grounded_gravity`
///   so the collision probe keeps reporting contact. The first grounded tick
///   after a jump also re-arms the combo-reset timer.
/// - falling (`y <= 0` or jump released): gravity scaled by `fall_multiplier`
///   for a snappier descent; the applied velocity is the average of the
///   previous and new value, floored at [`TERMINAL_FALL_SPEED`].
/// - ascending: plain gravity, same averaging, no clamp.
pub fn update_vertical_velocity(
    ctx: &mut MovementContext,
    grounded_root: bool,
    timers: &mut TimerQueue,
    dt: f32,
) {
    let gravity = ctx.jump.gravity[ctx.jump_count as usize];

    if grounded_root {
        if ctx.is_jump_animating {
            ctx.is_jump_animating = false;
            if let Some(handle) = ctx.jump_reset_timer.take() {
                timers.cancel(handle);
            }
            ctx.jump_reset_timer = Some(timers.arm(JUMP_RESET_DELAY));
        }
        ctx.current_movement.y = ctx.config.grounded_gravity;
        ctx.applied_movement.y = ctx.config.grounded_gravity;
    } else if ctx.current_movement.y <= 0.0 || !ctx.is_jump_pressed {
        let previous_y = ctx.current_movement.y;
        ctx.current_movement.y = previous_y + gravity * ctx.config.fall_multiplier * dt;
        ctx.applied_movement.y =
            ((previous_y + ctx.current_movement.y) * 0.5).max(TERMINAL_FALL_SPEED);
    } else {
        let previous_y = ctx.current_movement.y;
        ctx.current_movement.y = previous_y + gravity * dt;
        ctx.applied_movement.y = (previous_y + ctx.current_movement.y) * 0.5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::LocomotionConfig;

    #[test]
    fn level_one_constants_match_closed_form() {
        let profile = JumpProfile::derive(2.0, 0.75);
        let apex = 0.75 / 2.0;
        assert_eq!(profile.gravity[1], (-2.0 * 2.0) / (apex * apex));
        assert_eq!(profile.initial_velocity[1], (2.0 * 2.0) / apex);
        // Worked example: h = 2, T = 0.75.
        assert!((profile.gravity[1] - -28.444_445).abs() < 1e-3);
        assert!((profile.initial_velocity[1] - 10.666_667).abs() < 1e-3);
    }

    #[test]
    fn higher_levels_follow_delta_and_scale() {
        let h = 2.0_f32;
        let profile = JumpProfile::derive(h, 0.75);
        let apex = 0.75_f32 / 2.0;

        let second_apex = apex * 1.25;
        assert_eq!(profile.gravity[2], (-2.0 * (h + 2.0)) / (second_apex * second_apex));
        assert_eq!(profile.initial_velocity[2], (2.0 * (h + 2.0)) / second_apex);

        let third_apex = apex * 1.5;
        assert_eq!(profile.gravity[3], (-2.0 * (h + 4.0)) / (third_apex * third_apex));
        assert_eq!(profile.initial_velocity[3], (2.0 * (h + 4.0)) / third_apex);
    }

    #[test]
    fn base_gravity_aliases_level_one() {
        let profile = JumpProfile::derive(3.0, 0.6);
        assert_eq!(profile.gravity[0], profile.gravity[1]);
        assert_eq!(profile.initial_velocity[0], 0.0);
    }

    #[test]
    fn grounded_pins_velocity_and_arms_reset_timer() {
        let mut ctx = MovementContext::new(LocomotionConfig::default());
        let mut timers = TimerQueue::new();
        ctx.current_movement.y = 5.0;
        ctx.is_jump_animating = true;

        update_vertical_velocity(&mut ctx, true, &mut timers, 0.02);

        assert_eq!(ctx.current_movement.y, ctx.config.grounded_gravity);
        assert_eq!(ctx.applied_movement.y, ctx.config.grounded_gravity);
        assert!(!ctx.is_jump_animating);
        let handle = ctx.jump_reset_timer.expect("reset timer armed");

        // Fires only once the full delay has elapsed.
        timers.tick(JUMP_RESET_DELAY - 0.01);
        assert!(!timers.poll(handle));
        timers.tick(0.01);
        assert!(timers.poll(handle));
    }

    #[test]
    fn falling_applies_fall_multiplier_and_clamp() {
        let mut ctx = MovementContext::new(LocomotionConfig::default());
        let mut timers = TimerQueue::new();
        let gravity = ctx.jump.gravity[0];

        ctx.current_movement.y = -1.0;
        ctx.is_jump_pressed = false;
        update_vertical_velocity(&mut ctx, false, &mut timers, 0.02);
        let expected = -1.0 + gravity * ctx.config.fall_multiplier * 0.02;
        assert_eq!(ctx.current_movement.y, expected);
        assert_eq!(ctx.applied_movement.y, (-1.0 + expected) * 0.5);

        // A long fall bottoms out at the terminal speed.
        ctx.current_movement.y = -300.0;
        update_vertical_velocity(&mut ctx, false, &mut timers, 0.02);
        assert_eq!(ctx.applied_movement.y, TERMINAL_FALL_SPEED);
    }

    #[test]
    fn ascending_averages_without_clamp() {
        let mut ctx = MovementContext::new(LocomotionConfig::default());
        let mut timers = TimerQueue::new();
        ctx.jump_count = 1;
        ctx.is_jump_pressed = true;
        let v0 = ctx.jump.initial_velocity[1];
        ctx.current_movement.y = v0;

        update_vertical_velocity(&mut ctx, false, &mut timers, 0.02);

        let gravity = ctx.jump.gravity[1];
        assert_eq!(ctx.current_movement.y, v0 + gravity * 0.02);
        assert_eq!(ctx.applied_movement.y, (v0 + v0 + gravity * 0.02) * 0.5);
    }

    #[test]
    fn released_button_switches_to_fall_gravity_mid_ascent() {
        let mut ctx = MovementContext::new(LocomotionConfig::default());
        let mut timers = TimerQueue::new();
        ctx.jump_count = 1;
        ctx.is_jump_pressed = false;
        ctx.current_movement.y = 4.0;

        update_vertical_velocity(&mut ctx, false, &mut timers, 0.02);

        let gravity = ctx.jump.gravity[1];
        assert_eq!(ctx.current_movement.y, 4.0 + gravity * ctx.config.fall_multiplier * 0.02);
    }
}
