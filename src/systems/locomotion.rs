use hecs::{Entity, World};

use crate::backend::{
    Animator, AnimatorBinding, CharacterMover, MoverBinding, ANIM_IS_FALLING, ANIM_IS_RUNNING,
    ANIM_JUMP,
};
use crate::components::{Facing, GroundSub, LocoFsm, LocoState, LocomotionConfig, MovementContext};
use crate::engine::input::InputQueue;
use crate::engine::time::TimerQueue;
use crate::fsm::StateMachine;
use crate::kinematics::MAX_JUMP_LEVEL;

// ---------------------------------------------------------------------------
// Spawning
// ---------------------------------------------------------------------------

/// Create a controller entity. The mover and animator are required here so a
/// controller can never exist without its collaborators.
///
/// The character starts in `Grounded` with the sub-state picked from the
/// (empty) initial input, with the grounded-entry effects already applied.
pub fn spawn_player(
    world: &mut World,
    timers: &mut TimerQueue,
    config: LocomotionConfig,
    mover: Box<dyn CharacterMover>,
    mut animator: Box<dyn Animator>,
) -> Entity {
    let mut ctx = MovementContext::new(config);
    let initial = LocoState::Grounded(initial_ground_sub(&ctx));
    enter_state(&initial, None, &mut ctx, animator.as_mut(), timers);

    world.spawn((
        ctx,
        StateMachine::new(initial),
        Facing(glam::Quat::IDENTITY),
        InputQueue::new(),
        MoverBinding(mover),
        AnimatorBinding(animator),
    ))
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Drain queued input events into the movement context. Runs first each tick
/// so every later system sees a consistent input snapshot.
pub fn input_system(world: &mut World) {
    for (_entity, (queue, ctx)) in world.query_mut::<(&mut InputQueue, &mut MovementContext)>() {
        for event in queue.drain() {
            ctx.apply_input(event);
        }
    }
}

/// Drive locomotion FSM transitions and the active state's per-tick update.
/// Runs **before** the vertical-velocity and movement systems.
///
/// Timing note: `fsm.tick(dt)` is called **first** each tick so that the
/// `just_entered` flag stays `true` for the entire tick a transition fires,
/// letting downstream systems react on the same tick.
pub fn locomotion_state_system(world: &mut World, timers: &mut TimerQueue, dt: f32) {
    for (_entity, (fsm, ctx, animator)) in
        world.query_mut::<(&mut LocoFsm, &mut MovementContext, &mut AnimatorBinding)>()
    {
        fsm.tick(dt);

        // At most one transition per tick; leaf rules are checked before the
        // rules of the enclosing root state.
        if let Some(next) = next_state(&fsm.state, ctx) {
            let from = fsm.state;
            exit_state(&from, ctx, animator.0.as_mut());
            fsm.go(next);
            enter_state(&next, Some(&from), ctx, animator.0.as_mut(), timers);
        }

        update_state(&fsm.state, ctx);

        #[cfg(debug_assertions)]
        if fsm.just_entered() {
            println!("[locomotion] → {}", fsm.state.label());
        }
    }
}

// ---------------------------------------------------------------------------
// Transition table
// ---------------------------------------------------------------------------

/// Return the next state if a transition should fire, or `None` to stay.
///
/// Evaluated once per tick in the active leaf; when the leaf has no
/// applicable rule the check bubbles to its root state. `ctx.grounded` is the
/// mover's probe result from the previous tick.
fn next_state(state: &LocoState, ctx: &MovementContext) -> Option<LocoState> {
    match state {
        LocoState::Grounded(sub) => {
            // Leaf rules: Idle <-> Run purely on movement input.
            match sub {
                GroundSub::Idle if ctx.is_movement_pressed => {
                    return Some(LocoState::Grounded(GroundSub::Run));
                }
                GroundSub::Run if !ctx.is_movement_pressed => {
                    return Some(LocoState::Grounded(GroundSub::Idle));
                }
                _ => {}
            }
            // Root rules.
            if ctx.is_jump_pressed && !ctx.require_new_jump_press {
                Some(LocoState::Jump)
            } else if !ctx.grounded {
                Some(LocoState::Fall)
            } else {
                None
            }
        }

        // Jump-to-fall: past the apex, or the button was released early.
        LocoState::Jump => {
            if ctx.current_movement.y < 0.0 || !ctx.is_jump_pressed {
                Some(LocoState::Fall)
            } else {
                None
            }
        }

        // Fall ends on ground contact; the grounded sub-state is picked from
        // the current movement input.
        LocoState::Fall => {
            if ctx.grounded {
                Some(LocoState::Grounded(initial_ground_sub(ctx)))
            } else {
                None
            }
        }
    }
}

fn initial_ground_sub(ctx: &MovementContext) -> GroundSub {
    if ctx.is_movement_pressed {
        GroundSub::Run
    } else {
        GroundSub::Idle
    }
}

// ---------------------------------------------------------------------------
// Enter / exit / update effects
// ---------------------------------------------------------------------------

/// Entry side effects for `to`. Root-level effects only run when the root
/// actually changed (an Idle<->Run flip must not re-run the Grounded entry);
/// `from = None` means initial spawn, which counts as a root change.
fn enter_state(
    to: &LocoState,
    from: Option<&LocoState>,
    ctx: &mut MovementContext,
    animator: &mut dyn Animator,
    timers: &mut TimerQueue,
) {
    match to {
        LocoState::Grounded(sub) => {
            let root_changed = !matches!(from, Some(LocoState::Grounded(_)));
            if root_changed {
                ctx.is_jumping = false;
                ctx.current_movement.y = ctx.config.grounded_gravity;
                ctx.applied_movement.y = ctx.config.grounded_gravity;
            }
            match sub {
                GroundSub::Idle => {
                    ctx.applied_movement.x = 0.0;
                    ctx.applied_movement.z = 0.0;
                    animator.set_bool(ANIM_IS_RUNNING, false);
                }
                GroundSub::Run => {
                    animator.set_bool(ANIM_IS_RUNNING, true);
                }
            }
        }

        LocoState::Jump => {
            // A re-jump inside the combo window keeps the combo going: kill
            // the pending reset. At the top level the window has closed by
            // construction (the count resets on Jump exit), so the guard can
            // only fail while a stale timer should be left to run out.
            if ctx.jump_count < MAX_JUMP_LEVEL {
                if let Some(handle) = ctx.jump_reset_timer.take() {
                    timers.cancel(handle);
                }
            }
            ctx.is_jumping = true;
            ctx.is_jump_animating = true;
            ctx.jump_count += 1;
            assert!(
                ctx.jump_count <= MAX_JUMP_LEVEL,
                "jump combo level out of range: {}",
                ctx.jump_count
            );
            let takeoff = ctx.jump.initial_velocity[ctx.jump_count as usize];
            ctx.current_movement.y = takeoff;
            ctx.applied_movement.y = takeoff;
            animator.set_trigger(ANIM_JUMP);
        }

        LocoState::Fall => {
            animator.set_bool(ANIM_IS_FALLING, true);
        }
    }
}

/// Exit side effects for `from`.
fn exit_state(from: &LocoState, ctx: &mut MovementContext, animator: &mut dyn Animator) {
    match from {
        LocoState::Grounded(_) => {}

        LocoState::Jump => {
            // Leaving with the button still held latches out held-button
            // auto-repeat until a fresh press.
            if ctx.is_jump_pressed {
                ctx.require_new_jump_press = true;
            }
            // Top of the combo: the ladder is complete, start over.
            if ctx.jump_count == MAX_JUMP_LEVEL {
                ctx.jump_count = 0;
            }
        }

        LocoState::Fall => {
            animator.set_bool(ANIM_IS_FALLING, false);
        }
    }
}

/// Per-tick behavior of the active state. Only the Run sub-state does
/// per-tick work on the horizontal axes: it owns horizontal speed while
/// active (applied and current stay mirrored; airborne states keep the
/// takeoff momentum instead).
fn update_state(state: &LocoState, ctx: &mut MovementContext) {
    if let LocoState::Grounded(GroundSub::Run) = state {
        let horizontal = ctx.movement_input * ctx.config.run_multiplier;
        ctx.current_movement.x = horizontal.x;
        ctx.current_movement.z = horizontal.y;
        ctx.applied_movement.x = horizontal.x;
        ctx.applied_movement.z = horizontal.y;
    }
}
