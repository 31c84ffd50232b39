/// Batches shorter than this are treated as noise bursts, not gestures.
pub const MIN_EVIDENCE: usize = 6;

/// Direction of a swing the tree can actually perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingDirection {
    Left,
    Right,
}

/// Outcome of classifying one debounced batch of deltas.
///
/// `None` means insufficient evidence; it is produced here and dropped here,
/// never forwarded to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Left,
    Right,
    None,
}

impl Gesture {
    /// The swing this gesture asks for, if any.
    pub fn direction(self) -> Option<SwingDirection> {
        match self {
            Gesture::Left => Some(SwingDirection::Left),
            Gesture::Right => Some(SwingDirection::Right),
            Gesture::None => None,
        }
    }
}

/// Turns a batch of signed deltas into a gesture decision by sign majority.
///
/// A delta counts as positive only when strictly greater than zero; the
/// filter upstream already rejects small magnitudes, so zeros cannot occur,
/// but a stray zero would land on the negative side. Equal counts resolve to
/// `Right` — an artifact of comparing negatives against positives, kept for
/// fidelity rather than meaning.
pub fn classify(deltas: &[f32]) -> Gesture {
    if deltas.len() < MIN_EVIDENCE {
        return Gesture::None;
    }

    let positives = deltas.iter().filter(|delta| **delta > 0.0).count();
    let negatives = deltas.len() - positives;

    if negatives > positives {
        Gesture::Left
    } else {
        Gesture::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_batches_are_not_gestures() {
        assert_eq!(classify(&[]), Gesture::None);
        assert_eq!(classify(&[-20.0; 5]), Gesture::None);
        assert_eq!(classify(&[20.0; 5]), Gesture::None);
    }

    #[test]
    fn negative_majority_swings_left() {
        let deltas = [-20.0, -18.0, -25.0, -14.5, 16.0, -30.0];
        assert_eq!(classify(&deltas), Gesture::Left);
    }

    #[test]
    fn positive_majority_swings_right() {
        let deltas = [20.0, 18.0, 25.0, 14.5, -16.0, 30.0, 21.0];
        assert_eq!(classify(&deltas), Gesture::Right);
    }

    #[test]
    fn ties_resolve_to_right() {
        let deltas = [-20.0, -20.0, -20.0, 20.0, 20.0, 20.0];
        assert_eq!(classify(&deltas), Gesture::Right);
    }

    #[test]
    fn none_has_no_direction() {
        assert_eq!(Gesture::None.direction(), None);
        assert_eq!(Gesture::Left.direction(), Some(SwingDirection::Left));
        assert_eq!(Gesture::Right.direction(), Some(SwingDirection::Right));
    }
}
