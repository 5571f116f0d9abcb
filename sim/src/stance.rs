//! Crouch stance state machine.
//!
//! Standing <-> FullyCrouched always passes through the transitional
//! `Crouching` state. Leaving `Crouching` is driven only by the external
//! animation-completion signal, never by time, so the machine stays in sync
//! with whatever animation rig reports back. Standing up additionally
//! requires a clear overhead probe.

/// Current crouch stance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Stance {
    #[default]
    Standing,
    /// Mid-transition, either direction.
    Crouching,
    FullyCrouched,
}

/// Which way an active `Crouching` transition is headed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Heading {
    Lowering,
    Rising,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StanceMachine {
    stance: Stance,
    heading: Option<Heading>,
}

impl StanceMachine {
    pub fn stance(&self) -> Stance {
        self.stance
    }

    /// True for any stance other than upright standing. Lowers movement
    /// speed and blocks running/jumping.
    pub fn is_lowered(&self) -> bool {
        self.stance != Stance::Standing
    }

    pub fn is_fully_crouched(&self) -> bool {
        self.stance == Stance::FullyCrouched
    }

    /// Eye height as a fraction of standing eye height, for cameras.
    pub fn height_factor(&self) -> f32 {
        match self.stance {
            Stance::Standing => 1.0,
            Stance::Crouching => 0.75,
            Stance::FullyCrouched => 0.5,
        }
    }

    /// Handle a crouch-toggle press. `stand_probe_clear` is only evaluated
    /// when standing up is actually attempted. Returns whether the toggle
    /// changed anything; a rejected toggle is a no-op for this tick.
    pub fn try_toggle(
        &mut self,
        can_crouch: bool,
        stand_probe_clear: impl FnOnce() -> bool,
    ) -> bool {
        match self.stance {
            Stance::Standing => {
                if can_crouch {
                    self.stance = Stance::Crouching;
                    self.heading = Some(Heading::Lowering);
                    true
                } else {
                    false
                }
            }
            Stance::FullyCrouched => {
                if stand_probe_clear() {
                    self.stance = Stance::Crouching;
                    self.heading = Some(Heading::Rising);
                    true
                } else {
                    false
                }
            }
            // Mid-transition presses are swallowed; the animation signal
            // has to land first.
            Stance::Crouching => false,
        }
    }

    /// External animation-completion signal routed back into the machine.
    pub fn crouch_animation_finished(&mut self) {
        if self.stance == Stance::Crouching {
            self.stance = match self.heading {
                Some(Heading::Lowering) => Stance::FullyCrouched,
                Some(Heading::Rising) => Stance::Standing,
                None => Stance::Standing,
            };
            self.heading = None;
        }
    }
}
