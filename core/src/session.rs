use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
/// - any -> InProgress, when a new game is started
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No board has been built yet
    NotStarted,
    /// Board built, accepting intents
    InProgress,
    /// A mine was revealed
    Lost,
    /// The win condition was reached
    Won,
}

impl GameStatus {
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Result of one intent: the status afterwards and the cells that need redrawing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub status: GameStatus,
    pub changed: ChangedCells,
}

impl Update {
    fn unchanged(status: GameStatus) -> Self {
        Self {
            status,
            changed: ChangedCells::new(),
        }
    }

    /// Whether the intent was accepted and changed the board
    pub fn has_update(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// One game from start to finish, restartable.
///
/// Not synchronized: a host that shares a session between threads has to hold a lock around each call.
#[derive(Clone, Debug)]
pub struct GameSession<G = RandomLayoutGenerator> {
    generator: G,
    config: GameConfig,
    board: Option<Board>,
    status: GameStatus,
    triggered_mine: Option<CellId>,
    move_count: u32,
}

impl GameSession<RandomLayoutGenerator> {
    pub fn with_seed(seed: u64) -> Self {
        Self::new(RandomLayoutGenerator::new(seed))
    }
}

impl<G: MineLayoutGenerator> GameSession<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            config: GameConfig::default(),
            board: None,
            status: Default::default(),
            triggered_mine: None,
            move_count: 0,
        }
    }

    /// Builds a fresh board and starts playing it, discarding any previous game.
    ///
    /// On error the previous game, if any, is left as it was.
    pub fn start(&mut self, config: GameConfig) -> Result<()> {
        let board = Board::build(&config, &mut self.generator).inspect_err(|err| {
            log::debug!("Rejected game config {:?}: {}", config, err);
        })?;
        log::debug!(
            "Started {}x{} game with {} mines",
            config.side,
            config.side,
            config.mines
        );

        self.config = config;
        self.board = Some(board);
        self.status = GameStatus::InProgress;
        self.triggered_mine = None;
        self.move_count = 0;
        Ok(())
    }

    /// Starts a new game with the last accepted config, or the default one.
    pub fn restart(&mut self) -> Result<()> {
        self.start(self.config)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// All cells in id order, empty before the first game.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.board.iter().flat_map(|board| board.cells())
    }

    pub fn cell_at(&self, id: CellId) -> Option<Cell> {
        self.board.as_ref()?.cell(id).copied()
    }

    /// How many mines have not been flagged yet, negative with too many flags
    pub fn mines_left(&self) -> isize {
        self.board.as_ref().map_or(0, |board| {
            (board.mine_count() as isize) - (board.flagged_count() as isize)
        })
    }

    /// The mine that ended the game, if it was lost
    pub fn triggered_mine(&self) -> Option<CellId> {
        self.triggered_mine
    }

    /// Intents accepted since the game started
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn on_reveal(&mut self, id: CellId) -> Update {
        let status = self.status;
        let Some(board) = self.board.as_mut() else {
            return Update::unchanged(status);
        };
        if !status.is_in_progress() {
            return Update::unchanged(status);
        }
        let Some(&cell) = board.cell(id) else {
            log::trace!("Ignoring reveal of unknown cell {}", id);
            return Update::unchanged(status);
        };
        if !cell.visibility.is_hidden() {
            return Update::unchanged(status);
        }

        let changed = if cell.is_mine {
            self.triggered_mine = Some(id);
            self.status = GameStatus::Lost;
            log::debug!("Mine hit at {}, game lost", id);
            board.reveal_mines(id)
        } else if cell.is_number() {
            board.reveal_cell(id);
            smallvec![id]
        } else {
            flood_reveal(board, id)
        };
        self.move_count += 1;

        if self.status.is_in_progress() && win_reached(board, self.config.win_policy) {
            log::debug!("All cells cleared after {} moves, game won", self.move_count);
            self.status = GameStatus::Won;
        }

        Update {
            status: self.status,
            changed,
        }
    }

    pub fn on_flag(&mut self, id: CellId) -> Update {
        let status = self.status;
        let Some(board) = self.board.as_mut() else {
            return Update::unchanged(status);
        };
        if !status.is_in_progress() {
            return Update::unchanged(status);
        }
        let Some(visibility) = board.toggle_flag(id) else {
            return Update::unchanged(status);
        };
        log::trace!("Cell {} is now {:?}", id, visibility);
        self.move_count += 1;

        if win_reached(board, self.config.win_policy) {
            log::debug!("All mines flagged after {} moves, game won", self.move_count);
            self.status = GameStatus::Won;
        }

        Update {
            status: self.status,
            changed: smallvec![id],
        }
    }
}

fn win_reached(board: &Board, policy: WinPolicy) -> bool {
    match policy {
        WinPolicy::RevealAllSafe => board.all_safe_revealed(),
        // with every safe cell revealed, flags can only sit on mines
        WinPolicy::RevealAllSafeAndFlagAllMines => {
            board.all_safe_revealed() && board.flagged_count() == board.mine_count()
        }
    }
}
