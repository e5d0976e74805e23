use std::time::Duration;

use log::{debug, info};

use crate::board::Board;
use crate::input::InputAction;
use crate::piece::{ActivePiece, CATALOG_SIZE, SPAWN_ANCHOR, Vec2i};
use crate::random::{RandomSource, SeededRandom};

pub const DEFAULT_DROP_INTERVAL: Duration = Duration::from_millis(1000);

const DOWN: Vec2i = Vec2i::new(0, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Game over or no piece; nothing was evaluated.
    Inactive,
    /// The drop interval has not elapsed yet.
    Waiting,
    /// Gravity moved the piece down one row.
    Fell,
    /// The piece settled and a new one spawned.
    Locked { lines_cleared: usize },
    /// The piece settled but the next spawn overlapped the stack.
    GameOver { lines_cleared: usize },
}

/// One game: the board, the falling piece and the drop timer.
///
/// Every position change goes through `Board::is_valid`; rejected moves are plain `false`
/// returns. Once the phase is `GameOver` nothing mutates until `restart`.
#[derive(Debug, Clone)]
pub struct Session<R = SeededRandom> {
    board: Board,
    current: Option<ActivePiece>,
    anchor: Vec2i,
    phase: Phase,
    drop_interval: Duration,
    last_drop: Option<Duration>,
    rng: R,
}

impl<R: RandomSource> Session<R> {
    pub fn new(rng: R, drop_interval: Duration) -> Self {
        Self::start(rng, drop_interval, 0)
    }

    /// Starts a session and spawns its first piece.
    ///
    /// `image_count` is the current size of the image registry; pieces only get an image index
    /// when it is non-zero.
    pub fn start(rng: R, drop_interval: Duration, image_count: usize) -> Self {
        let mut session = Self {
            board: Board::new(),
            current: None,
            anchor: SPAWN_ANCHOR,
            phase: Phase::Active,
            drop_interval,
            last_drop: None,
            rng,
        };
        session.spawn(image_count);
        session
    }

    /// Throws away the board and timing state and spawns a fresh piece.
    pub fn restart(&mut self, image_count: usize) -> SpawnOutcome {
        self.board = Board::new();
        self.current = None;
        self.anchor = SPAWN_ANCHOR;
        self.phase = Phase::Active;
        self.last_drop = None;
        info!("session restarted");
        self.spawn(image_count)
    }

    /// Replaces the active piece with a random catalog piece at the spawn anchor.
    ///
    /// If it overlaps settled blocks the session ends; the overlapping piece stays current so
    /// it can still be drawn. A session that is already over is left untouched.
    pub fn spawn(&mut self, image_count: usize) -> SpawnOutcome {
        if !self.is_active() {
            return SpawnOutcome::GameOver;
        }
        let index = self.rng.next_index(CATALOG_SIZE);
        let image_index = (image_count > 0).then(|| self.rng.next_index(image_count));
        let piece = ActivePiece::from_catalog(index, image_index);

        self.current = Some(piece);
        self.anchor = SPAWN_ANCHOR;

        if !self.board.is_valid(&piece.shape, self.anchor, Vec2i::ZERO) {
            self.phase = Phase::GameOver;
            info!("game over: spawn of piece type {} blocked", piece.piece_type);
            return SpawnOutcome::GameOver;
        }

        debug!(
            "spawned piece type {} (image {:?})",
            piece.piece_type, image_index
        );
        SpawnOutcome::Spawned
    }

    /// Runs at most one gravity step.
    ///
    /// Gravity fires when more than `drop_interval` has passed since the last drop, or on the
    /// first tick after (re)start. A late tick still drops a single row.
    pub fn tick(&mut self, now: Duration, image_count: usize) -> TickOutcome {
        if !self.is_active() {
            return TickOutcome::Inactive;
        }
        let Some(piece) = self.current else {
            return TickOutcome::Inactive;
        };

        let due = match self.last_drop {
            None => true,
            Some(last) => now.saturating_sub(last) > self.drop_interval,
        };
        if !due {
            return TickOutcome::Waiting;
        }
        self.last_drop = Some(now);

        if self.board.is_valid(&piece.shape, self.anchor, DOWN) {
            self.anchor = self.anchor + DOWN;
            return TickOutcome::Fell;
        }

        self.board.place(&piece, self.anchor);
        let lines_cleared = self.board.clear_lines();
        if lines_cleared > 0 {
            debug!("cleared {lines_cleared} line(s)");
        }

        match self.spawn(image_count) {
            SpawnOutcome::Spawned => TickOutcome::Locked { lines_cleared },
            SpawnOutcome::GameOver => TickOutcome::GameOver { lines_cleared },
        }
    }

    /// Whether the current piece would fit at `offset` from its anchor.
    pub fn fits(&self, offset: Vec2i) -> bool {
        self.current
            .is_some_and(|p| self.board.is_valid(&p.shape, self.anchor, offset))
    }

    pub fn move_horizontal(&mut self, dx: i32) -> bool {
        self.try_shift(Vec2i::new(dx, 0))
    }

    /// Manual one-row drop. Leaves the gravity timer alone.
    pub fn soft_drop(&mut self) -> bool {
        self.try_shift(DOWN)
    }

    /// Rotates in place; there is no wall kick, so a blocked rotation is simply dropped.
    pub fn rotate(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };
        let rotated = piece.rotated();
        if !self
            .board
            .is_valid(&rotated.shape, self.anchor, Vec2i::ZERO)
        {
            return false;
        }
        self.current = Some(rotated);
        true
    }

    pub fn apply(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::MoveLeft => self.move_horizontal(-1),
            InputAction::MoveRight => self.move_horizontal(1),
            InputAction::SoftDrop => self.soft_drop(),
            InputAction::Rotate => self.rotate(),
        }
    }

    fn try_shift(&mut self, offset: Vec2i) -> bool {
        if !self.is_active() || !self.fits(offset) {
            return false;
        }
        self.anchor = self.anchor + offset;
        true
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<&ActivePiece> {
        self.current.as_ref()
    }

    pub fn anchor(&self) -> Vec2i {
        self.anchor
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    pub fn last_drop(&self) -> Option<Duration> {
        self.last_drop
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn set_current_for_test(&mut self, piece: ActivePiece, anchor: Vec2i) {
        self.current = Some(piece);
        self.anchor = anchor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ROWS;
    use crate::piece::{CATALOG, LINE_INDEX};
    use crate::random::ScriptedRandom;

    fn line_session() -> Session<ScriptedRandom> {
        Session::new(ScriptedRandom::constant(LINE_INDEX), DEFAULT_DROP_INTERVAL)
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn first_tick_drops_immediately() {
        let mut s = line_session();
        assert_eq!(s.last_drop(), None);
        assert_eq!(s.tick(ms(0), 0), TickOutcome::Fell);
        assert_eq!(s.anchor(), Vec2i::new(4, 1));
        assert_eq!(s.last_drop(), Some(ms(0)));
    }

    #[test]
    fn gravity_needs_strictly_more_than_the_interval() {
        let mut s = line_session();
        s.tick(ms(0), 0);
        assert_eq!(s.tick(ms(1000), 0), TickOutcome::Waiting);
        assert_eq!(s.anchor().y, 1);
        assert_eq!(s.tick(ms(1001), 0), TickOutcome::Fell);
        assert_eq!(s.anchor().y, 2);
    }

    #[test]
    fn late_tick_drops_only_one_row() {
        let mut s = line_session();
        s.tick(ms(0), 0);
        assert_eq!(s.tick(ms(10_000), 0), TickOutcome::Fell);
        assert_eq!(s.anchor().y, 2);
        assert_eq!(s.last_drop(), Some(ms(10_000)));
    }

    #[test]
    fn soft_drop_does_not_touch_the_timer() {
        let mut s = line_session();
        s.tick(ms(0), 0);
        assert!(s.soft_drop());
        assert_eq!(s.anchor().y, 2);
        assert_eq!(s.last_drop(), Some(ms(0)));
    }

    #[test]
    fn spawn_assigns_image_only_when_images_exist() {
        let s = Session::new(ScriptedRandom::new(vec![2, 5]), DEFAULT_DROP_INTERVAL);
        assert_eq!(s.current().unwrap().image_index, None);
        assert_eq!(s.current().unwrap().piece_type, 3);

        let s = Session::start(ScriptedRandom::new(vec![2, 5]), DEFAULT_DROP_INTERVAL, 3);
        assert_eq!(s.current().unwrap().image_index, Some(2));
    }

    #[test]
    fn blocked_rotation_keeps_orientation() {
        let mut s = line_session();
        // Vertical line against the floor cannot swing back over a filled cell.
        let vertical = ActivePiece::from_catalog(LINE_INDEX, None).rotated();
        s.set_current_for_test(vertical, Vec2i::new(5, ROWS as i32 - 4));
        s.board_mut().set_cell(ROWS - 4, 4, 1);

        let before = *s.current().unwrap();
        let rotated = before.rotated();
        assert!(!s.board().is_valid(&rotated.shape, s.anchor(), Vec2i::ZERO));
        assert!(!s.rotate());
        assert_eq!(s.current(), Some(&before));
    }

    #[test]
    fn rotation_near_the_top_may_poke_above_the_board() {
        let mut s = line_session();
        let vertical = ActivePiece::from_catalog(LINE_INDEX, None).rotated();
        s.set_current_for_test(vertical, Vec2i::new(4, 0));
        assert!(s.rotate());
        assert!(s.rotate());
        let cells: Vec<Vec2i> = s.current().unwrap().cells(s.anchor()).collect();
        assert!(cells.iter().any(|c| c.y < 0));
    }

    #[test]
    fn restart_clears_board_and_reactivates() {
        let mut s = line_session();
        for col in 4..8 {
            s.board_mut().set_cell(0, col, 2);
        }
        assert_eq!(s.spawn(0), SpawnOutcome::GameOver);
        assert!(s.is_game_over());

        assert_eq!(s.restart(0), SpawnOutcome::Spawned);
        assert!(s.is_active());
        assert_eq!(s.last_drop(), None);
        assert!(s.board().rows().iter().flatten().all(|&c| c == 0));
        assert_eq!(s.anchor(), SPAWN_ANCHOR);
    }

    #[test]
    fn locking_spawns_next_piece_at_anchor() {
        let mut s = line_session();
        s.set_current_for_test(
            ActivePiece::from_catalog(LINE_INDEX, None),
            Vec2i::new(0, ROWS as i32 - 1),
        );
        s.tick(ms(0), 0);
        assert_eq!(s.board().cell(ROWS - 1, 0), Some(8));
        assert_eq!(s.anchor(), SPAWN_ANCHOR);
        assert_eq!(s.current().unwrap().shape, CATALOG[LINE_INDEX].shape);
        assert_eq!(s.last_drop(), Some(ms(0)));
    }

    #[test]
    fn lock_restarts_the_drop_timer() {
        let mut s = line_session();
        s.set_current_for_test(
            ActivePiece::from_catalog(LINE_INDEX, None),
            Vec2i::new(0, ROWS as i32 - 1),
        );
        assert_eq!(
            s.tick(ms(5_000), 0),
            TickOutcome::Locked { lines_cleared: 0 }
        );
        assert_eq!(s.last_drop(), Some(ms(5_000)));

        assert_eq!(s.tick(ms(6_000), 0), TickOutcome::Waiting);
        assert_eq!(s.anchor(), SPAWN_ANCHOR);
        assert_eq!(s.tick(ms(6_001), 0), TickOutcome::Fell);
        assert_eq!(s.anchor().y, 1);
    }

    #[test]
    fn game_over_tick_still_records_the_drop() {
        let mut s = line_session();
        for row in 1..ROWS {
            s.board_mut().set_cell(row, 4, 1);
        }
        assert_eq!(
            s.tick(ms(250), 0),
            TickOutcome::GameOver { lines_cleared: 0 }
        );
        assert_eq!(s.last_drop(), Some(ms(250)));
    }

    #[test]
    fn spawn_after_game_over_changes_nothing() {
        let mut s = line_session();
        for col in 4..8 {
            s.board_mut().set_cell(0, col, 2);
        }
        assert_eq!(s.spawn(0), SpawnOutcome::GameOver);

        let piece = *s.current().unwrap();
        s.set_current_for_test(piece.rotated(), Vec2i::new(1, 3));
        assert_eq!(s.spawn(0), SpawnOutcome::GameOver);
        assert_eq!(s.current(), Some(&piece.rotated()));
        assert_eq!(s.anchor(), Vec2i::new(1, 3));
        assert!(s.is_game_over());
    }
}
