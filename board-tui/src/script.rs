//! JSON scene scripts: a starting layout and the steps to play on it.
//!
//! ```json
//! {
//!   "layout": "8/8/8/8/8/8/P7/8 w - - 0 1",
//!   "steps": [
//!     { "op": "highlight", "cell": [6, 0], "color": "#ffff00" },
//!     { "op": "arrow", "from": [6, 0], "delta": [-6, 0] },
//!     { "op": "move", "from": [6, 0], "to": [0, 0] },
//!     { "op": "pause", "ms": 500 }
//!   ]
//! }
//! ```

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use board_scene::{Cell, ChessBoard, Rgb, SceneError};
use serde::{Deserialize, Serialize};

use crate::player::{animate_move, Player};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Failed to read script {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub layout: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Move {
        from: [usize; 2],
        to: [usize; 2],
    },
    Arrow {
        from: [usize; 2],
        delta: [isize; 2],
    },
    Highlight {
        cell: [usize; 2],
        color: String,
    },
    Opacities {
        values: Vec<Vec<f32>>,
    },
    Pause {
        ms: u64,
    },
}

/// What applying a step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Queued this many directives on the player.
    Animated(usize),
    /// Drew or changed something without animating.
    Drawn,
    /// Wait before the next step.
    Pause(Duration),
}

fn cell([row, col]: [usize; 2]) -> Cell {
    Cell::new(row, col)
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

impl Step {
    pub fn apply(
        &self,
        board: &mut ChessBoard,
        player: &mut Player,
    ) -> Result<StepOutcome, ScriptError> {
        match self {
            Self::Move { from, to } => {
                let queued = animate_move(board, player, cell(*from), cell(*to))?;
                Ok(StepOutcome::Animated(queued))
            }
            Self::Arrow { from, delta } => {
                board.add_arrow(cell(*from), (delta[0], delta[1]));
                Ok(StepOutcome::Drawn)
            }
            Self::Highlight { cell: at, color } => {
                let color: Rgb = color.parse()?;
                board.add_highlight(cell(*at), color)?;
                Ok(StepOutcome::Drawn)
            }
            Self::Opacities { values } => {
                board.set_piece_opacities(values)?;
                Ok(StepOutcome::Drawn)
            }
            Self::Pause { ms } => Ok(StepOutcome::Pause(Duration::from_millis(*ms))),
        }
    }
}

/// Feeds steps to a board one at a time, waiting for the player to go idle
/// and for pauses to run out before taking the next one.
#[derive(Debug, Default)]
pub struct ScriptRunner {
    steps: VecDeque<Step>,
    total: usize,
    wait: Duration,
}

impl ScriptRunner {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            total: steps.len(),
            steps: steps.into(),
            wait: Duration::ZERO,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of steps already taken.
    pub fn position(&self) -> usize {
        self.total - self.steps.len()
    }

    pub fn is_done(&self) -> bool {
        self.steps.is_empty() && self.wait.is_zero()
    }

    /// Advance by `dt`. Takes steps until one animates or pauses. A failing
    /// step is consumed and its error returned.
    pub fn tick(
        &mut self,
        board: &mut ChessBoard,
        player: &mut Player,
        dt: Duration,
    ) -> Result<(), ScriptError> {
        if !self.wait.is_zero() {
            self.wait = self.wait.saturating_sub(dt);
            return Ok(());
        }
        while player.is_idle() {
            let Some(step) = self.steps.pop_front() else {
                break;
            };
            tracing::debug!(step = ?step, "Applying script step");
            match step.apply(board, player)? {
                StepOutcome::Animated(_) | StepOutcome::Drawn => {}
                StepOutcome::Pause(wait) => {
                    self.wait = wait;
                    break;
                }
            }
        }
        Ok(())
    }
}
