use glam::{Quat, Vec2, Vec3};

use crate::engine::input::InputEvent;
use crate::engine::time::TimerHandle;
use crate::fsm::StateMachine;
use crate::kinematics::JumpProfile;

// ---------------------------------------------------------------------------
// Locomotion state machine
// ---------------------------------------------------------------------------

/// Sub-states of [`LocoState::Grounded`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GroundSub {
    /// No movement input; horizontal velocity zeroed.
    Idle,
    /// Movement input held; horizontal velocity driven from input each tick.
    Run,
}

/// All discrete locomotion states.
///
/// `Grounded` is a root state with a sub-state payload; `Jump` and `Fall` are
/// root leaves. Exactly one variant (and so exactly one leaf) is active at a
/// time. Transition logic lives in `systems/locomotion.rs` (where it has
/// access to the movement context) rather than here so that this file stays
/// pure data.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LocoState {
    /// On the ground, in one of the [`GroundSub`] sub-states.
    Grounded(GroundSub),
    /// Ascending after jump input.
    Jump,
    /// Airborne and descending (or walked off an edge).
    Fall,
}

impl LocoState {
    /// Whether the active root state is `Grounded`, regardless of sub-state.
    pub fn is_grounded_root(&self) -> bool {
        matches!(self, Self::Grounded(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Grounded(GroundSub::Idle) => "Grounded/Idle",
            Self::Grounded(GroundSub::Run) => "Grounded/Run",
            Self::Jump => "Jump",
            Self::Fall => "Fall",
        }
    }
}

/// FSM component attached to the controller entity.
pub type LocoFsm = StateMachine<LocoState>;

// ---------------------------------------------------------------------------
// Tunables
// ---------------------------------------------------------------------------

/// Fixed set of locomotion tunables. Defaults give a 2-unit, 0.75-second
/// base jump with 2x run speed.
#[derive(Clone, Copy, Debug)]
pub struct LocomotionConfig {
    /// Peak height of a level-1 jump, in world units.
    pub max_jump_height: f32,
    /// Total airtime of a level-1 jump, in seconds.
    pub max_jump_time: f32,
    /// Horizontal speed multiplier applied while the Run sub-state is active.
    pub run_multiplier: f32,
    /// Slerp factor per second for turning toward the movement direction.
    pub rotation_factor_per_frame: f32,
    /// Small negative vertical velocity held while grounded so the collision
    /// probe keeps reporting contact.
    pub grounded_gravity: f32,
    /// Gravity scale while descending (asymmetric gravity for snappier falls).
    pub fall_multiplier: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            max_jump_height: 2.0,
            max_jump_time: 0.75,
            run_multiplier: 2.0,
            rotation_factor_per_frame: 15.0,
            grounded_gravity: -0.05,
            fall_multiplier: 2.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Movement context
// ---------------------------------------------------------------------------

/// Shared movement context, attached to the controller entity and mutated by
/// the input handlers, the state machine, the kinematics model, and the
/// movement integrator.
///
/// `current_movement` is the raw simulated velocity (x/z from input, y from
/// jump/gravity integration); `applied_movement` is what actually goes to the
/// mover. Only the vertical axis ever differs between the two (averaging and
/// terminal clamping) — horizontal axes are never smoothed.
pub struct MovementContext {
    pub movement_input: Vec2,
    pub current_movement: Vec3,
    pub applied_movement: Vec3,
    pub is_movement_pressed: bool,
    pub is_run_pressed: bool,

    pub is_jump_pressed: bool,
    /// Held-button latch: while set, a jump press is ignored until the button
    /// is released and pressed again.
    pub require_new_jump_press: bool,
    pub is_jumping: bool,
    /// Set on takeoff, cleared on the first grounded tick — that tick also
    /// arms the combo-reset timer.
    pub is_jump_animating: bool,
    /// Current combo level, always in `0..=3`.
    pub jump_count: u8,
    /// Per-level gravity/velocity constants, immutable after construction.
    pub jump: JumpProfile,
    /// Pending combo-reset timer, if armed.
    pub jump_reset_timer: Option<TimerHandle>,

    /// Result of the mover's ground probe from the previous tick.
    pub grounded: bool,

    pub config: LocomotionConfig,
}

impl MovementContext {
    /// Build a context from tunables; the jump profile is derived once here
    /// and never recomputed. The character starts grounded.
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            movement_input: Vec2::ZERO,
            current_movement: Vec3::ZERO,
            applied_movement: Vec3::ZERO,
            is_movement_pressed: false,
            is_run_pressed: false,
            is_jump_pressed: false,
            require_new_jump_press: false,
            is_jumping: false,
            is_jump_animating: false,
            jump_count: 0,
            jump: JumpProfile::derive(config.max_jump_height, config.max_jump_time),
            jump_reset_timer: None,
            grounded: true,
            config,
        }
    }

    // -- input entry points --------------------------------------------------
    // Invoked by the host whenever the corresponding input changes, possibly
    // several times (or not at all) between ticks. Last value wins; duplicate
    // events are idempotent.

    pub fn on_move(&mut self, input: Vec2) {
        self.movement_input = input;
        self.current_movement.x = input.x;
        self.current_movement.z = input.y;
        self.is_movement_pressed = input.x != 0.0 || input.y != 0.0;
    }

    /// Any edge (press or release) re-arms the jump attempt: releasing and
    /// pressing again always clears the held-button latch.
    pub fn on_jump_changed(&mut self, pressed: bool) {
        self.is_jump_pressed = pressed;
        self.require_new_jump_press = false;
    }

    pub fn on_run_changed(&mut self, pressed: bool) {
        self.is_run_pressed = pressed;
    }

    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveChanged(input) => self.on_move(input),
            InputEvent::JumpChanged(pressed) => self.on_jump_changed(pressed),
            InputEvent::RunChanged(pressed) => self.on_run_changed(pressed),
        }
    }
}

/// World-space orientation of the character, rotated toward the movement
/// direction by the movement integrator.
pub struct Facing(pub Quat);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_move_mirrors_into_current_movement() {
        let mut ctx = MovementContext::new(LocomotionConfig::default());
        ctx.on_move(Vec2::new(0.5, -1.0));
        assert_eq!(ctx.current_movement.x, 0.5);
        assert_eq!(ctx.current_movement.z, -1.0);
        assert!(ctx.is_movement_pressed);

        ctx.on_move(Vec2::ZERO);
        assert!(!ctx.is_movement_pressed);
    }

    #[test]
    fn jump_edge_clears_latch() {
        let mut ctx = MovementContext::new(LocomotionConfig::default());
        ctx.require_new_jump_press = true;
        ctx.on_jump_changed(false);
        assert!(!ctx.require_new_jump_press);
        ctx.require_new_jump_press = true;
        ctx.on_jump_changed(true);
        assert!(ctx.is_jump_pressed);
        assert!(!ctx.require_new_jump_press);
    }

    #[test]
    fn duplicate_events_are_idempotent() {
        let mut ctx = MovementContext::new(LocomotionConfig::default());
        ctx.on_run_changed(true);
        ctx.on_run_changed(true);
        assert!(ctx.is_run_pressed);
        ctx.on_move(Vec2::X);
        let snapshot = ctx.current_movement;
        ctx.on_move(Vec2::X);
        assert_eq!(ctx.current_movement, snapshot);
    }
}
