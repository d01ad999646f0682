use crate::{
    Board, CellIx, GameError, Result, GRID_CELLS, PAIR_COUNT, PAIR_SCORE, STARTING_SECONDS,
};
use serde::{Deserialize, Serialize};

/// Valid transitions:
/// - NotStarted -> InProgress (first valid tap, arms the countdown)
/// - InProgress -> Won (fourth pair confirmed)
/// - InProgress -> Lost (countdown reached zero)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Initial state, countdown not armed yet
    NotStarted,
    /// Countdown running, taps accepted
    InProgress,
    /// All four pairs found before the countdown expired
    Won,
    /// Countdown expired with pairs still hidden
    Lost,
}

impl GameState {
    /// Indicates the game has not started yet
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Outcome of tapping a cell
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TapOutcome {
    /// Trap cell, matched cell, duplicate pick, or an attempt still on screen
    Ignored,
    /// First cell of a pairing attempt is now highlighted
    Selected,
    /// Second cell completed a pair
    Matched,
    /// Second cell did not match the first
    Mismatched,
    /// The confirmed pair was the last one
    Won,
}

impl TapOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Whether a two-cell attempt just resolved and its delayed clear
    /// should be scheduled
    pub const fn resolves_attempt(self) -> bool {
        matches!(self, Self::Matched | Self::Mismatched | Self::Won)
    }
}

/// Outcome of advancing the countdown by one second
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Countdown not running, nothing changed
    Idle,
    /// One second elapsed
    Ticked,
    /// The countdown hit zero and the game is lost
    Expired,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Ordered pending selection of at most two cells within one attempt.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    picks: [Option<CellIx>; 2],
}

impl Selection {
    pub fn contains(&self, ix: CellIx) -> bool {
        self.picks.contains(&Some(ix))
    }

    pub fn len(&self) -> usize {
        self.picks.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.picks[0].is_none()
    }

    pub fn is_full(&self) -> bool {
        self.picks[1].is_some()
    }

    /// Both picks, once the attempt is complete.
    pub fn pair(&self) -> Option<(CellIx, CellIx)> {
        match self.picks {
            [Some(first), Some(second)] => Some((first, second)),
            _ => None,
        }
    }

    fn push(&mut self, ix: CellIx) {
        debug_assert!(!self.is_full());
        if self.picks[0].is_none() {
            self.picks[0] = Some(ix);
        } else {
            self.picks[1] = Some(ix);
        }
    }

    fn clear(&mut self) {
        self.picks = [None; 2];
    }
}

/// Represents one game from the fresh board to a terminal state.
///
/// The engine never schedules anything itself: the countdown advances
/// only through [`tick`](Self::tick) and a resolved attempt stays on
/// the board until [`clear_selection`](Self::clear_selection), so the
/// view layer decides what a "second" and a "delay" are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine {
    board: Board,
    matched: [bool; GRID_CELLS as usize],
    selection: Selection,
    score: u32,
    seconds_left: u32,
    state: GameState,
}

impl GameEngine {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            matched: [false; GRID_CELLS as usize],
            selection: Selection::default(),
            score: 0,
            seconds_left: STARTING_SECONDS,
            state: GameState::default(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn color_at(&self, ix: CellIx) -> crate::TileColor {
        self.board.color_at(ix)
    }

    pub fn is_matched(&self, ix: CellIx) -> bool {
        self.matched[ix as usize]
    }

    pub fn is_selected(&self, ix: CellIx) -> bool {
        self.selection.contains(ix)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn matched_count(&self) -> usize {
        self.matched.iter().filter(|&&m| m).count()
    }

    pub fn is_countdown_running(&self) -> bool {
        matches!(self.state, GameState::InProgress)
    }

    fn check_not_final(&self) -> Result<()> {
        if self.state.is_final() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    /// Handle a tap on a cell.
    ///
    /// The first valid tap of a game arms the countdown. Taps on the
    /// trap cell, on matched cells, on the already-picked cell, and
    /// while a resolved attempt awaits its delayed clear are all
    /// ignored.
    pub fn tap(&mut self, ix: CellIx) -> Result<TapOutcome> {
        use TapOutcome::*;

        let ix = self.board.validate_ix(ix)?;
        self.check_not_final()?;

        if self.board.color_at(ix).is_trap() || self.matched[ix as usize] {
            return Ok(Ignored);
        }
        if self.selection.is_full() {
            // a resolved attempt is still on screen awaiting its clear
            return Ok(Ignored);
        }
        if self.selection.contains(ix) {
            return Ok(Ignored);
        }

        self.mark_started();
        self.selection.push(ix);
        log::debug!("cell {} selected", ix);

        let Some((first, second)) = self.selection.pair() else {
            return Ok(Selected);
        };

        if self.board.color_at(first) == self.board.color_at(second) {
            self.matched[first as usize] = true;
            self.matched[second as usize] = true;
            self.score += PAIR_SCORE;
            log::debug!("pair ({}, {}) confirmed, score {}", first, second, self.score);

            if self.matched_count() == 2 * PAIR_COUNT as usize {
                self.state = GameState::Won;
                log::debug!("all pairs found, final score {}", self.score);
                Ok(Won)
            } else {
                Ok(Matched)
            }
        } else {
            log::debug!("pair ({}, {}) rejected", first, second);
            Ok(Mismatched)
        }
    }

    /// Empties the pending selection once the resolution delay fires.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !matches!(self.state, GameState::InProgress) {
            return TickOutcome::Idle;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left == 0 {
            self.state = GameState::Lost;
            log::debug!("countdown expired, game lost at score {}", self.score);
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked
        }
    }

    /// Checks if the state is initial and changes to in-progress,
    /// arming the countdown
    fn mark_started(&mut self) {
        if self.state.is_initial() {
            log::debug!("first tap, countdown armed at {}s", self.seconds_left);
            self.state = GameState::InProgress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TileColor::{self, *};

    const LAYOUT: [TileColor; 9] = [Red, Red, Blue, Blue, Green, Green, Yellow, Yellow, Trap];

    fn engine() -> GameEngine {
        GameEngine::new(Board::from_tiles(LAYOUT).unwrap())
    }

    fn match_pair(engine: &mut GameEngine, a: CellIx, b: CellIx) -> TapOutcome {
        assert_eq!(engine.tap(a).unwrap(), TapOutcome::Selected);
        let outcome = engine.tap(b).unwrap();
        engine.clear_selection();
        outcome
    }

    #[test]
    fn trap_and_matched_taps_are_ignored() {
        let mut engine = engine();

        assert_eq!(engine.tap(8).unwrap(), TapOutcome::Ignored);
        assert!(engine.state().is_initial());

        assert_eq!(match_pair(&mut engine, 0, 1), TapOutcome::Matched);
        assert_eq!(engine.tap(0).unwrap(), TapOutcome::Ignored);
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn duplicate_tap_does_not_grow_the_selection() {
        let mut engine = engine();

        assert_eq!(engine.tap(2).unwrap(), TapOutcome::Selected);
        assert_eq!(engine.tap(2).unwrap(), TapOutcome::Ignored);
        assert_eq!(engine.selection().len(), 1);
    }

    #[test]
    fn first_valid_tap_arms_the_countdown() {
        let mut engine = engine();

        assert_eq!(engine.state(), GameState::NotStarted);
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert_eq!(engine.seconds_left(), STARTING_SECONDS);

        engine.tap(0).unwrap();
        assert_eq!(engine.state(), GameState::InProgress);
        assert!(engine.is_countdown_running());
        assert_eq!(engine.tick(), TickOutcome::Ticked);
        assert_eq!(engine.seconds_left(), STARTING_SECONDS - 1);
    }

    #[test]
    fn matching_pair_scores_and_keeps_the_highlight() {
        let mut engine = engine();

        engine.tap(0).unwrap();
        assert_eq!(engine.tap(1).unwrap(), TapOutcome::Matched);

        assert_eq!(engine.score(), PAIR_SCORE);
        assert_eq!(engine.matched_count(), 2);
        // both cells stay highlighted until the delayed clear fires
        assert!(engine.is_selected(0));
        assert!(engine.is_selected(1));

        // further taps are ignored while the attempt is on screen
        assert_eq!(engine.tap(2).unwrap(), TapOutcome::Ignored);

        engine.clear_selection();
        assert!(engine.selection().is_empty());
        assert_eq!(engine.tap(2).unwrap(), TapOutcome::Selected);
    }

    #[test]
    fn mismatch_changes_nothing_but_the_selection() {
        let mut engine = engine();

        engine.tap(0).unwrap();
        assert_eq!(engine.tap(2).unwrap(), TapOutcome::Mismatched);

        assert_eq!(engine.score(), 0);
        assert_eq!(engine.matched_count(), 0);
        assert_eq!(engine.selection().len(), 2);

        engine.clear_selection();
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn completing_all_pairs_wins_with_score_40() {
        let mut engine = engine();

        assert_eq!(match_pair(&mut engine, 0, 1), TapOutcome::Matched);
        assert_eq!(match_pair(&mut engine, 2, 3), TapOutcome::Matched);
        assert_eq!(match_pair(&mut engine, 4, 5), TapOutcome::Matched);
        assert_eq!(match_pair(&mut engine, 6, 7), TapOutcome::Won);

        assert_eq!(engine.state(), GameState::Won);
        assert_eq!(engine.score(), 4 * PAIR_SCORE);
        assert_eq!(engine.matched_count(), 8);

        // the countdown is frozen in a terminal state
        let seconds = engine.seconds_left();
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert_eq!(engine.seconds_left(), seconds);

        assert!(matches!(engine.tap(8), Err(GameError::AlreadyEnded)));
    }

    #[test]
    fn countdown_expiry_loses_and_locks_the_board() {
        let mut engine = engine();

        engine.tap(0).unwrap();
        for _ in 0..STARTING_SECONDS - 1 {
            assert_eq!(engine.tick(), TickOutcome::Ticked);
        }
        assert_eq!(engine.tick(), TickOutcome::Expired);

        assert_eq!(engine.state(), GameState::Lost);
        assert_eq!(engine.seconds_left(), 0);
        assert!(matches!(engine.tap(1), Err(GameError::AlreadyEnded)));
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.tick(), TickOutcome::Idle);
    }

    #[test]
    fn fresh_engine_starts_clean() {
        use crate::{BoardGenerator, RandomBoardGenerator};

        let engine = GameEngine::new(RandomBoardGenerator::new(99).generate());
        assert_eq!(engine.state(), GameState::NotStarted);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.seconds_left(), STARTING_SECONDS);
        assert_eq!(engine.matched_count(), 0);
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn invalid_index_is_reported() {
        let mut engine = engine();
        assert!(matches!(engine.tap(9), Err(GameError::InvalidCell)));
    }
}
