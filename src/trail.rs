//! Fixed-length motion trail.

use bevy::math::Vec2;

/// The last `N` positions of an entity, newest first.
///
/// The buffer is always full: it starts with `N` copies of the spawn point and
/// every [`Trail::push`] drops the oldest entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trail<const N: usize> {
    points: [Vec2; N],
}

impl<const N: usize> Trail<N> {
    /// A trail with every slot set to `origin`.
    pub fn filled(origin: Vec2) -> Self {
        Self { points: [origin; N] }
    }

    /// Record `position` as the newest point, discarding the oldest.
    pub fn push(&mut self, position: Vec2) {
        if N == 0 {
            return;
        }
        self.points.rotate_right(1);
        self.points[0] = position;
    }

    /// Oldest recorded point, where the drawn streak starts.
    pub fn oldest(&self) -> Vec2 {
        self.points.last().copied().unwrap_or(Vec2::ZERO)
    }

    /// Most recently recorded point.
    pub fn newest(&self) -> Vec2 {
        self.points.first().copied().unwrap_or(Vec2::ZERO)
    }

    #[inline]
    pub fn len(&self) -> usize {
        N
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// Points from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }
}
