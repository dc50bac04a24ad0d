use glam::Vec3;

// Animator parameter names shared with the host's animation graph.
pub const ANIM_IS_RUNNING: &str = "isRunning";
pub const ANIM_IS_FALLING: &str = "isFalling";
pub const ANIM_JUMP: &str = "jump";

/// Collision/mover backend. The core hands it the already-scaled displacement
/// for the tick and treats the returned grounded flag as authoritative on the
/// next transition evaluation.
pub trait CharacterMover: Send + Sync {
    /// Sweep the character by `displacement` and report whether it ended the
    /// move on the ground.
    fn move_by(&mut self, displacement: Vec3) -> bool;
}

/// Animation parameter sink. Fire and forget; the core never reads animator
/// state back.
pub trait Animator: Send + Sync {
    fn set_bool(&mut self, param: &'static str, value: bool);
    fn set_trigger(&mut self, param: &'static str);
}

/// Mover bound to a controller entity. Required at spawn, so a controller
/// without a mover cannot exist.
pub struct MoverBinding(pub Box<dyn CharacterMover>);

/// Animator bound to a controller entity.
pub struct AnimatorBinding(pub Box<dyn Animator>);

// ---------------------------------------------------------------------------
// Headless implementations
// ---------------------------------------------------------------------------

/// Kinematic mover over an infinite flat floor. Integrates displacement and
/// clamps the character to the floor plane; good enough for the demo binary
/// and headless tests, where terrain is out of scope.
pub struct FlatGround {
    pub position: Vec3,
    pub floor_height: f32,
}

impl FlatGround {
    pub fn new(position: Vec3, floor_height: f32) -> Self {
        Self {
            position,
            floor_height,
        }
    }
}

impl CharacterMover for FlatGround {
    fn move_by(&mut self, displacement: Vec3) -> bool {
        self.position += displacement;
        if self.position.y <= self.floor_height {
            self.position.y = self.floor_height;
            true
        } else {
            false
        }
    }
}

/// Discards all animator calls. For hosts without an animation graph.
pub struct NullAnimator;

impl Animator for NullAnimator {
    fn set_bool(&mut self, _param: &'static str, _value: bool) {}
    fn set_trigger(&mut self, _param: &'static str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_ground_reports_grounded_on_floor_contact() {
        let mut mover = FlatGround::new(Vec3::new(0.0, 0.0, 0.0), 0.0);
        assert!(mover.move_by(Vec3::new(1.0, -0.01, 0.0)));
        assert_eq!(mover.position.y, 0.0);

        assert!(!mover.move_by(Vec3::new(0.0, 2.0, 0.0)));
        assert_eq!(mover.position.y, 2.0);

        assert!(mover.move_by(Vec3::new(0.0, -5.0, 0.0)));
        assert_eq!(mover.position.y, 0.0);
    }
}
