//! Animation directives returned by board operations.
//!
//! A directive only names what should happen to a visual. The engine decides
//! timing and calls [`Animation::apply`] with the progress of each frame, then
//! [`Animation::finish`] once.

use smallvec::SmallVec;

use crate::geometry::Point;
use crate::scene::Scene;
use crate::visual::VisualId;

/// Directives produced by a single board operation, played together.
pub type Animations = SmallVec<[Animation; 4]>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animation {
    /// Slide a visual from `from` to `to`.
    MoveToTarget {
        id: VisualId,
        from: Point,
        to: Point,
    },
    /// Fade a visual out and drop it from the scene when done.
    FadeOut { id: VisualId },
    /// Fade a visual in from fully transparent.
    FadeIn { id: VisualId },
}

impl Animation {
    pub fn id(&self) -> VisualId {
        match *self {
            Self::MoveToTarget { id, .. } | Self::FadeOut { id } | Self::FadeIn { id } => id,
        }
    }

    pub fn is_removal(&self) -> bool {
        matches!(self, Self::FadeOut { .. })
    }

    /// Put the visual in its state at linear progress `t`. Visuals no longer
    /// in the scene are skipped.
    pub fn apply(&self, scene: &mut Scene, t: f32) {
        let eased = smooth(t);
        let Some(visual) = scene.get_mut(self.id()) else {
            return;
        };
        match *self {
            Self::MoveToTarget { from, to, .. } => visual.move_to(from.lerp(to, eased)),
            Self::FadeOut { .. } => visual.opacity = 1.0 - eased,
            Self::FadeIn { .. } => visual.opacity = eased,
        }
    }

    /// Apply the end state. Faded-out visuals leave the scene.
    pub fn finish(&self, scene: &mut Scene) {
        self.apply(scene, 1.0);
        if let Self::FadeOut { id } = *self {
            scene.remove(id);
        }
    }
}

/// Smoothstep easing on `[0, 1]`.
pub fn smooth(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
