//! Game session - both players' state, gravity ticks and input routing
//!
//! A `GameSession` owns everything that changes during a match: one grid, falling
//! piece, look-ahead queue and score/line counters per player, plus the shared
//! difficulty and the pause/game-over flags. Both players run through the same code
//! path, selected by `PlayerIndex`.
//!
//! Gravity is driven by [`GameSession::tick`] with elapsed milliseconds. Each time the
//! accumulated time reaches the current tick interval, every player's piece attempts
//! one down-slide; a piece that cannot move lands, completed rows are cleared, and the
//! next piece spawns. A spawn that overlaps the stack ends the whole session.

use tracing::{debug, info, trace};

use crate::config::SessionConfig;
use crate::difficulty::Difficulty;
use crate::error::{MoveRejection, SpawnConflict};
use crate::events::{CoreEvent, MoveSource};
use crate::geometry::PieceCells;
use crate::grid::Grid;
use crate::line_clear;
use crate::motion;
use crate::piece::Piece;
use crate::queue::PieceQueue;
use crate::rng::{ShapeSource, SimpleRng};
use crate::snapshot::{ActiveSnapshot, FinalScores, GameSnapshot, ScoreSubmission};
use crate::types::{GameAction, MoveAction, PlayerIndex, PLAYER_COUNT};

/// One player's side of the field
#[derive(Debug, Clone)]
pub struct PlayerState {
    grid: Grid,
    active: Option<Piece>,
    queue: PieceQueue,
    score: u32,
    lines: u32,
}

impl PlayerState {
    fn new(config: &SessionConfig) -> Self {
        Self {
            grid: Grid::new(),
            active: None,
            queue: PieceQueue::new(config.preview_count, config.color_mode),
            score: 0,
            lines: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }
}

#[derive(Debug, Clone)]
pub struct GameSession<S: ShapeSource = SimpleRng> {
    config: SessionConfig,
    players: [PlayerState; PLAYER_COUNT],
    difficulty: Difficulty,
    source: S,

    started: bool,
    paused: bool,
    game_over: bool,
    conflict: Option<SpawnConflict>,

    tick_accum_ms: u32,
    events: Vec<CoreEvent>,
}

impl GameSession<SimpleRng> {
    /// Create a session drawing shapes from a seeded LCG
    pub fn new(config: SessionConfig) -> Self {
        let source = SimpleRng::new(config.seed);
        Self::with_source(config, source)
    }
}

impl<S: ShapeSource> GameSession<S> {
    /// Create a session with an explicit shape source
    pub fn with_source(config: SessionConfig, source: S) -> Self {
        let config = config.sanitized();
        Self {
            players: [PlayerState::new(&config), PlayerState::new(&config)],
            difficulty: Difficulty::from_config(&config),
            source,
            started: false,
            paused: false,
            game_over: false,
            conflict: None,
            tick_accum_ms: 0,
            events: Vec::with_capacity(64),
            config,
        }
    }

    /// Spawn the first piece for each player, player one first.
    ///
    /// Calling it again after a successful start does nothing.
    pub fn start(&mut self) -> Result<(), SpawnConflict> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        debug!(seed = self.config.seed, preview = self.config.preview_count, "session started");
        for player in PlayerIndex::ALL {
            self.spawn(player)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// The spawn conflict that ended the session, if any
    pub fn spawn_conflict(&self) -> Option<SpawnConflict> {
        self.conflict
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.difficulty.tick_interval_ms
    }

    pub fn score_increment(&self) -> u32 {
        self.difficulty.score_increment
    }

    pub fn player(&self, player: PlayerIndex) -> &PlayerState {
        &self.players[player.index()]
    }

    pub fn grid(&self, player: PlayerIndex) -> &Grid {
        &self.players[player.index()].grid
    }

    /// Direct grid access for setting up fixtures
    pub fn grid_mut(&mut self, player: PlayerIndex) -> &mut Grid {
        &mut self.players[player.index()].grid
    }

    pub fn active(&self, player: PlayerIndex) -> Option<&Piece> {
        self.players[player.index()].active.as_ref()
    }

    pub fn score(&self, player: PlayerIndex) -> u32 {
        self.players[player.index()].score
    }

    pub fn lines(&self, player: PlayerIndex) -> u32 {
        self.players[player.index()].lines
    }

    fn playable(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    /// Advance the gravity clock by `elapsed_ms`.
    ///
    /// Runs one gravity step each time the accumulated time reaches the current tick
    /// interval. Time does not accumulate while paused or after game over.
    /// Returns `true` if any step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.playable() {
            return false;
        }

        self.tick_accum_ms = self.tick_accum_ms.saturating_add(elapsed_ms);
        let mut stepped = false;
        while self.playable() && self.tick_accum_ms >= self.difficulty.tick_interval_ms {
            self.tick_accum_ms -= self.difficulty.tick_interval_ms;
            stepped = true;
            if self.gravity_step().is_err() {
                break;
            }
        }
        stepped
    }

    /// One gravity step for both players, in index order.
    ///
    /// Each falling piece slides down if it can; otherwise it lands, completed rows are
    /// cleared and the next piece spawns. A spawn conflict stops the step immediately.
    /// Returns `Ok(false)` when the session is not running.
    pub fn gravity_step(&mut self) -> Result<bool, SpawnConflict> {
        if !self.playable() {
            return Ok(false);
        }
        for player in PlayerIndex::ALL {
            if self.players[player.index()].active.is_none() {
                continue;
            }
            if self.move_piece(player, MoveAction::Down, MoveSource::Gravity).is_err() {
                self.land(player);
                self.spawn(player)?;
            }
        }
        Ok(true)
    }

    /// Route an input intent. Returns `true` if state changed.
    pub fn apply_action(&mut self, player: PlayerIndex, action: GameAction) -> bool {
        match action.move_action() {
            Some(motion) => self.try_move(player, motion).is_ok(),
            None => self.toggle_pause(),
        }
    }

    /// Validate and commit an input move for `player`.
    pub fn try_move(&mut self, player: PlayerIndex, action: MoveAction) -> Result<(), MoveRejection> {
        self.move_piece(player, action, MoveSource::Input)
    }

    /// Would `action` be accepted right now? Never changes state.
    pub fn can_move(&self, player: PlayerIndex, action: MoveAction) -> bool {
        self.validate(player, action).is_ok()
    }

    fn gate(&self, player: PlayerIndex) -> Result<&Piece, MoveRejection> {
        if !self.started {
            return Err(MoveRejection::NotStarted);
        }
        if self.game_over {
            return Err(MoveRejection::GameOver);
        }
        if self.paused {
            return Err(MoveRejection::Paused);
        }
        self.players[player.index()]
            .active
            .as_ref()
            .ok_or(MoveRejection::NoActivePiece)
    }

    fn validate(&self, player: PlayerIndex, action: MoveAction) -> Result<(), MoveRejection> {
        let piece = self.gate(player)?;
        let next = motion::candidate(piece, action);
        motion::check(&self.players[player.index()].grid, &next)
    }

    fn move_piece(&mut self, player: PlayerIndex, action: MoveAction, source: MoveSource) -> Result<(), MoveRejection> {
        if let Err(rejection) = self.gate(player) {
            trace!(player = player.index(), ?action, %rejection, "move rejected");
            return Err(rejection);
        }

        let state = &mut self.players[player.index()];
        let Some(piece) = state.active.as_mut() else {
            return Err(MoveRejection::NoActivePiece);
        };
        let from = *piece.cells();
        match motion::try_apply(&mut state.grid, piece, action) {
            Ok(next) => {
                self.events.push(CoreEvent::PieceMoved {
                    player,
                    action,
                    from,
                    to: next.cells,
                    source,
                });
                Ok(())
            }
            Err(rejection) => {
                trace!(player = player.index(), ?action, %rejection, "move rejected");
                Err(rejection)
            }
        }
    }

    /// Flip the pause flag. Ignored before start and after game over.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
        self.events.push(CoreEvent::PauseToggled { paused: self.paused });
        true
    }

    /// Land the falling piece, clear completed rows and score them.
    fn land(&mut self, player: PlayerIndex) {
        let state = &mut self.players[player.index()];
        let Some(piece) = state.active.take() else {
            return;
        };
        self.events.push(CoreEvent::PieceLanded {
            player,
            cells: *piece.cells(),
        });

        let cleared = line_clear::land_and_clear(&mut state.grid, &piece);
        debug!(player = player.index(), kind = piece.kind.as_str(), cleared = cleared.len(), "piece landed");
        if cleared.is_empty() {
            return;
        }

        for &row in &cleared {
            self.events.push(CoreEvent::RowCleared { player, row });
        }
        self.events.push(CoreEvent::RowsCollapsed {
            player,
            rows: cleared.clone(),
        });

        for _ in &cleared {
            state.score = state.score.saturating_add(self.difficulty.score_increment);
            state.lines += 1;
            self.events.push(CoreEvent::LineCompleted {
                player,
                score: state.score,
                lines: state.lines,
            });
            if self.difficulty.on_line(state.lines) {
                debug!(
                    level = self.difficulty.level,
                    score_increment = self.difficulty.score_increment,
                    tick_interval_ms = self.difficulty.tick_interval_ms,
                    "difficulty raised"
                );
                self.events.push(CoreEvent::DifficultyRaised {
                    score_increment: self.difficulty.score_increment,
                    tick_interval_ms: self.difficulty.tick_interval_ms,
                });
            }
        }
    }

    /// Pop the next queued piece into `player`'s grid.
    fn spawn(&mut self, player: PlayerIndex) -> Result<(), SpawnConflict> {
        let state = &mut self.players[player.index()];
        let Some(spawned) = state.queue.spawn_into(&mut state.grid, &mut self.source) else {
            return Ok(());
        };
        let piece = spawned.piece;
        state.active = Some(piece);

        self.events.push(CoreEvent::PieceSpawned {
            player,
            kind: piece.kind,
            color: piece.color,
            cells: *piece.cells(),
        });
        self.events.push(CoreEvent::PreviewUpdated {
            player,
            kinds: state.queue.kinds().take(crate::types::MAX_PREVIEW_COUNT).collect(),
        });

        if spawned.conflict {
            let conflict = SpawnConflict { player };
            self.game_over = true;
            self.conflict = Some(conflict);
            info!(
                player = player.index(),
                scores = ?[self.players[0].score, self.players[1].score],
                "game over"
            );
            self.events.push(CoreEvent::GameOver { player });
            return Err(conflict);
        }
        debug!(player = player.index(), kind = piece.kind.as_str(), "piece spawned");
        Ok(())
    }

    /// Take every buffered event, oldest first
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, CoreEvent> {
        self.events.drain(..)
    }

    /// Buffered events not yet drained
    pub fn pending_events(&self) -> &[CoreEvent] {
        &self.events
    }

    /// Current scores and line counts
    pub fn scores(&self) -> FinalScores {
        FinalScores {
            scores: [self.players[0].score, self.players[1].score],
            lines: [self.players[0].lines, self.players[1].lines],
        }
    }

    /// Final results; only available once the session is over
    pub fn final_scores(&self) -> Option<FinalScores> {
        self.game_over.then(|| self.scores())
    }

    /// Submission payload for the combined score of both players
    pub fn submission(&self, name: impl Into<String>) -> Option<ScoreSubmission> {
        self.final_scores().map(|scores| ScoreSubmission {
            name: name.into(),
            score: scores.total(),
        })
    }

    /// Landing cells of `player`'s falling piece
    pub fn landing_cells(&self, player: PlayerIndex) -> Option<PieceCells> {
        let state = &self.players[player.index()];
        state
            .active
            .as_ref()
            .map(|piece| motion::landing_cells(&state.grid, piece))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (state, view) in self.players.iter().zip(out.players.iter_mut()) {
            view.clear();
            state.grid.write_code_grid(&mut view.grid);
            view.active = state.active.map(ActiveSnapshot::from);
            view.landing = state
                .active
                .as_ref()
                .map(|piece| motion::landing_cells(&state.grid, piece));
            for (slot, piece) in state.queue.iter().take(view.next_queue.len()).enumerate() {
                view.next_queue[slot] = Some(piece.kind);
                view.next_colors[slot] = piece.color;
            }
            view.score = state.score;
            view.lines = state.lines;
        }
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.score_increment = self.difficulty.score_increment;
        out.tick_interval_ms = self.difficulty.tick_interval_ms;
        out.level = self.difficulty.level;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }
}

impl Default for GameSession<SimpleRng> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
