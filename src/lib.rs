//! Locomotion and jump-physics core for a third-person character controller.
//!
//! Converts discrete input-change events into per-tick velocity, orientation,
//! and a hierarchical movement state (Grounded/Idle, Grounded/Run, Jump,
//! Fall), with a three-level combo-jump model whose gravity and takeoff
//! constants are derived analytically from the desired jump height and
//! airtime.
//!
//! The host owns the frame loop, input devices, collision resolution, and
//! animation playback; this crate talks to them through [`backend`] traits
//! and the [`engine::input::InputQueue`]. Drive it with
//! [`systems::player_tick`] once per simulation tick.

pub mod backend;
pub mod components;
pub mod engine;
pub mod fsm;
pub mod kinematics;
pub mod systems;

pub use backend::{Animator, CharacterMover, FlatGround, NullAnimator};
pub use components::{Facing, GroundSub, LocoFsm, LocoState, LocomotionConfig, MovementContext};
pub use engine::input::{InputEvent, InputQueue};
pub use engine::time::{FrameTimer, TimerQueue};
pub use systems::{player_tick, spawn_player};
