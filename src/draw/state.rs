/// Pen state of the session, advanced once per frame from the finger count.
///
/// | from     | fingers | guard                          | to      | effect                |
/// |----------|---------|--------------------------------|---------|-----------------------|
/// | any      | 1       |                                | Drawing | record smoothed point |
/// | any      | 3       |                                | Idle    | clear all             |
/// | Drawing  | 2       |                                | Idle    | pen lift (break)      |
/// | Idle     | 2       | game active, buffer non-empty  | Scoring | score once            |
/// | Idle     | 2       | otherwise                      | Idle    | none                  |
/// | Scoring  | 2       |                                | Scoring | keep last score       |
/// | any      | 0, 4, 5 |                                | Idle    | pen lift (break)      |
///
/// A frame without a detected hand leaves the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenState {
    #[default]
    Idle,
    Drawing,
    Scoring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Draw,
    Finish,
    ClearAll,
    Lift,
}

impl Gesture {
    pub fn from_fingers(fingers_up: u8) -> Self {
        match fingers_up {
            1 => Gesture::Draw,
            2 => Gesture::Finish,
            3 => Gesture::ClearAll,
            _ => Gesture::Lift,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenEffect {
    RecordPoint,
    ClearAll,
    LiftPen,
    Score,
    None,
}

/// Guards consulted when a transition depends on session data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransitionGuards {
    pub game_active: bool,
    pub buffer_empty: bool,
}

pub fn next_state(
    from: PenState,
    gesture: Gesture,
    guards: TransitionGuards,
) -> (PenState, PenEffect) {
    match (from, gesture) {
        (_, Gesture::Draw) => (PenState::Drawing, PenEffect::RecordPoint),
        (_, Gesture::ClearAll) => (PenState::Idle, PenEffect::ClearAll),
        (PenState::Drawing, Gesture::Finish) => (PenState::Idle, PenEffect::LiftPen),
        (PenState::Idle, Gesture::Finish) if guards.game_active && !guards.buffer_empty => {
            (PenState::Scoring, PenEffect::Score)
        }
        (PenState::Idle, Gesture::Finish) => (PenState::Idle, PenEffect::None),
        (PenState::Scoring, Gesture::Finish) => (PenState::Scoring, PenEffect::None),
        (_, Gesture::Lift) => (PenState::Idle, PenEffect::LiftPen),
    }
}

pub fn can_transition(from: PenState, to: PenState) -> bool {
    matches!(
        (from, to),
        (PenState::Idle, PenState::Drawing)
            | (PenState::Idle, PenState::Scoring)
            | (PenState::Drawing, PenState::Idle)
            | (PenState::Scoring, PenState::Idle)
            | (PenState::Scoring, PenState::Drawing)
    ) || from == to
}
