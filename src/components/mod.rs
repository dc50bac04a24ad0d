mod locomotion;

pub use locomotion::{
    Facing, GroundSub, LocoFsm, LocoState, LocomotionConfig, MovementContext,
};
