//! Transient search state: partial assignment and decision trail.
//!
//! One `SolverState` exists per solve attempt and is never shared; racing
//! several seeds in parallel means one state per attempt. Participants
//! are indices into the caller's name slice throughout.

/// One decision level: a giver, its shuffled candidate list, and the
/// candidate currently committed at this level (if any).
#[derive(Debug)]
pub(crate) struct Frame {
    pub giver: usize,
    candidates: Vec<usize>,
    cursor: usize,
    pub chosen: Option<usize>,
}

impl Frame {
    pub fn new(giver: usize, candidates: Vec<usize>) -> Self {
        Self {
            giver,
            candidates,
            cursor: 0,
            chosen: None,
        }
    }

    /// Advances to the next untried candidate at this level.
    pub fn next_candidate(&mut self) -> Option<usize> {
        let candidate = self.candidates.get(self.cursor).copied();
        self.cursor += 1;
        candidate
    }
}

/// Partial assignment under construction, plus the trail of decisions
/// that produced it.
///
/// `assigned` maps giver → recipient and `taker` recipient → giver; the
/// two are kept in lockstep so injectivity holds at every step and a
/// recipient collision can name both claimants.
#[derive(Debug)]
pub(crate) struct SolverState {
    assigned: Vec<Option<usize>>,
    taker: Vec<Option<usize>>,
    trail: Vec<Frame>,
}

impl SolverState {
    pub fn new(len: usize) -> Self {
        Self {
            assigned: vec![None; len],
            taker: vec![None; len],
            trail: Vec::new(),
        }
    }

    pub fn assign(&mut self, giver: usize, recipient: usize) {
        debug_assert!(self.assigned[giver].is_none());
        debug_assert!(self.taker[recipient].is_none());
        self.assigned[giver] = Some(recipient);
        self.taker[recipient] = Some(giver);
    }

    pub fn unassign(&mut self, giver: usize, recipient: usize) {
        debug_assert_eq!(self.assigned[giver], Some(recipient));
        self.assigned[giver] = None;
        self.taker[recipient] = None;
    }

    pub fn recipient_of(&self, giver: usize) -> Option<usize> {
        self.assigned[giver]
    }

    pub fn taker_of(&self, recipient: usize) -> Option<usize> {
        self.taker[recipient]
    }

    pub fn is_free(&self, recipient: usize) -> bool {
        self.taker[recipient].is_none()
    }

    /// Free recipients still open to `giver`, in index order.
    ///
    /// Excludes the giver itself and everything its blocked row forbids.
    /// The caller shuffles; this stays deterministic so shuffling is the
    /// only source of candidate-order randomness.
    pub fn candidates_for(&self, giver: usize, blocked: &[Vec<bool>]) -> Vec<usize> {
        (0..self.taker.len())
            .filter(|&r| r != giver && self.is_free(r) && !blocked[giver][r])
            .collect()
    }

    /// Whether `giver` still has at least one open recipient.
    pub fn has_candidate(&self, giver: usize, blocked: &[Vec<bool>]) -> bool {
        (0..self.taker.len()).any(|r| r != giver && self.is_free(r) && !blocked[giver][r])
    }

    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.trail.push(frame);
    }

    pub fn pop_frame(&mut self) -> Option<Frame> {
        self.trail.pop()
    }

    pub fn top_frame_mut(&mut self) -> Option<&mut Frame> {
        self.trail.last_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_blocks(n: usize) -> Vec<Vec<bool>> {
        vec![vec![false; n]; n]
    }

    #[test]
    fn test_assign_unassign_roundtrip() {
        let mut state = SolverState::new(3);
        state.assign(0, 1);

        assert_eq!(state.recipient_of(0), Some(1));
        assert_eq!(state.taker_of(1), Some(0));
        assert!(!state.is_free(1));
        assert!(state.is_free(0));

        state.unassign(0, 1);
        assert_eq!(state.recipient_of(0), None);
        assert!(state.is_free(1));
    }

    #[test]
    fn test_candidates_exclude_self_taken_blocked() {
        let mut blocked = no_blocks(4);
        blocked[0][2] = true;

        let mut state = SolverState::new(4);
        state.assign(1, 3);

        // For giver 0: not itself (0), not blocked (2), not taken (3).
        assert_eq!(state.candidates_for(0, &blocked), vec![1]);
        assert!(state.has_candidate(0, &blocked));

        state.assign(2, 1);
        assert!(state.candidates_for(0, &blocked).is_empty());
        assert!(!state.has_candidate(0, &blocked));
    }

    #[test]
    fn test_frame_cursor_exhaustion() {
        let mut frame = Frame::new(0, vec![2, 1]);
        assert_eq!(frame.next_candidate(), Some(2));
        assert_eq!(frame.next_candidate(), Some(1));
        assert_eq!(frame.next_candidate(), None);
    }

    #[test]
    fn test_trail_push_pop() {
        let mut state = SolverState::new(2);
        assert_eq!(state.depth(), 0);

        state.push_frame(Frame::new(0, vec![1]));
        assert_eq!(state.depth(), 1);
        assert_eq!(state.top_frame_mut().unwrap().giver, 0);

        let frame = state.pop_frame().unwrap();
        assert_eq!(frame.giver, 0);
        assert_eq!(state.depth(), 0);
        assert!(state.pop_frame().is_none());
    }
}
