//! Plays animation directives over time.
//!
//! Each batch returned by a board operation runs for the same duration, all of
//! its directives together. Batches run one after another.

use std::collections::VecDeque;
use std::time::Duration;

use board_scene::{Animation, Animations, Cell, ChessBoard, Scene, SceneResult};

struct Playing {
    batch: Animations,
    elapsed: Duration,
}

pub struct Player {
    queue: VecDeque<Animations>,
    current: Option<Playing>,
    run_time: Duration,
}

impl Player {
    pub fn new(run_time: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            current: None,
            run_time,
        }
    }

    /// Queue a batch. Empty batches are dropped.
    pub fn enqueue(&mut self, batch: Animations) {
        if !batch.is_empty() {
            self.queue.push_back(batch);
        }
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.queue.is_empty()
    }

    /// Batches waiting behind the one playing.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Linear progress of the batch playing now.
    pub fn progress(&self) -> Option<f32> {
        self.current.as_ref().map(|p| self.fraction(p.elapsed))
    }

    fn fraction(&self, elapsed: Duration) -> f32 {
        if self.run_time.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.run_time.as_secs_f32()).min(1.0)
    }

    /// Start the next batch. Moves start from wherever their visual is now,
    /// which matters when batches were queued back to back.
    fn start_next(&mut self, scene: &mut Scene) {
        let Some(mut batch) = self.queue.pop_front() else {
            return;
        };
        for anim in batch.iter_mut() {
            if let Animation::MoveToTarget { id, from, .. } = anim {
                if let Some(visual) = scene.get(*id) {
                    *from = visual.center;
                }
            }
        }
        for anim in &batch {
            anim.apply(scene, 0.0);
        }
        tracing::trace!(directives = batch.len(), "Starting animation batch");
        self.current = Some(Playing {
            batch,
            elapsed: Duration::ZERO,
        });
    }

    /// Advance by `dt` and update the scene.
    pub fn tick(&mut self, scene: &mut Scene, dt: Duration) {
        if self.current.is_none() {
            self.start_next(scene);
        }
        let Some(playing) = self.current.as_mut() else {
            return;
        };
        playing.elapsed += dt;
        let elapsed = playing.elapsed;
        let t = self.fraction(elapsed);
        if t >= 1.0 {
            self.skip(scene);
        } else if let Some(playing) = &self.current {
            for anim in &playing.batch {
                anim.apply(scene, t);
            }
        }
    }

    /// Jump the playing batch to its end state.
    pub fn skip(&mut self, scene: &mut Scene) {
        if let Some(playing) = self.current.take() {
            for anim in &playing.batch {
                anim.finish(scene);
            }
        }
    }

    /// Finish everything, queued batches included.
    pub fn finish_all(&mut self, scene: &mut Scene) {
        self.skip(scene);
        while !self.queue.is_empty() {
            self.start_next(scene);
            self.skip(scene);
        }
    }
}

/// Move a piece on `board` and queue its animations. Returns how many
/// directives were queued.
pub fn animate_move(
    board: &mut ChessBoard,
    player: &mut Player,
    from: Cell,
    to: Cell,
) -> SceneResult<usize> {
    let batch = board.move_piece(from, to)?;
    let count = batch.len();
    player.enqueue(batch);
    Ok(count)
}
