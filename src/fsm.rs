/// Minimal finite-state-machine container.
///
/// `S` is the state type (usually an enum). The machine tracks the current
/// state, the previous state, and how long the machine has been in its current
/// state. **Transition logic is intentionally kept out of the machine itself**
/// — it lives in the system that drives it, where it has access to the shared
/// movement context.
///
/// States are compared with `PartialEq` rather than by discriminant: the
/// locomotion states are hierarchical (`Grounded(Idle)` and `Grounded(Run)`
/// share a discriminant) and a sub-state change is still a transition.
///
/// # Usage
/// ```ignore
/// let mut fsm = StateMachine::new(MyState::Idle);
/// // Each tick:
/// fsm.tick(dt);
/// if let Some(next) = next_state(&fsm.state, &ctx) { fsm.go(next); }
/// ```
pub struct StateMachine<S: Clone + PartialEq> {
    pub state: S,
    pub previous: S,
    /// Seconds spent in the current state. Reset to 0.0 on each transition.
    pub elapsed: f32,
    entered_this_frame: bool,
}

impl<S: Clone + PartialEq> StateMachine<S> {
    /// Create a new machine starting in `initial`.
    /// `just_entered()` returns `true` on the first tick.
    pub fn new(initial: S) -> Self {
        Self {
            previous: initial.clone(),
            state: initial,
            elapsed: 0.0,
            entered_this_frame: true,
        }
    }

    /// Transition to `next` only if it differs from the current state.
    /// Resets `elapsed` to 0.0 and sets `just_entered()` for one tick.
    pub fn go(&mut self, next: S) {
        if self.state != next {
            self.previous = std::mem::replace(&mut self.state, next);
            self.elapsed = 0.0;
            self.entered_this_frame = true;
        }
    }

    /// Advance the elapsed-in-state timer by `dt` seconds and clear the
    /// `just_entered` flag. Call once per tick **before** processing
    /// transitions so the flag stays observable for the whole tick on which
    /// a transition fires.
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
        self.entered_this_frame = false;
    }

    /// Returns `true` only on the first tick after entering this state.
    pub fn just_entered(&self) -> bool {
        self.entered_this_frame
    }
}
