//! Catch and miss detection
//!
//! Bombs and the paddle are axis-aligned boxes. A bomb is tested against the
//! paddle with the box it swept through this tick, so a fast bomb cannot
//! tunnel through the paddle between frames.

use glam::Vec2;

use super::state::Projectile;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing both
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Touching edges count as overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// How a bomb leaves (or doesn't leave) play this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Caught,
    Missed,
    Falling,
}

/// Classify one bomb. The paddle is checked first, so a bomb caught right at
/// the floor still counts as caught.
pub fn classify(projectile: &Projectile, paddle: &Aabb, floor_y: f32) -> Fate {
    let now = Aabb::from_center(projectile.pos, projectile.size);
    let before = Aabb::from_center(projectile.prev_pos, projectile.size);

    if now.union(&before).overlaps(paddle) {
        Fate::Caught
    } else if projectile.pos.y < floor_y {
        Fate::Missed
    } else {
        Fate::Falling
    }
}

/// Indices of bombs leaving play this tick, in projectile order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub caught: Vec<usize>,
    pub missed: Vec<usize>,
}

impl Partition {
    pub fn is_empty(&self) -> bool {
        self.caught.is_empty() && self.missed.is_empty()
    }
}

/// Split the projectile set into caught / missed from one snapshot.
/// Everything not listed is still falling.
pub fn partition(projectiles: &[Projectile], paddle: &Aabb, floor_y: f32) -> Partition {
    let mut out = Partition::default();
    for (idx, projectile) in projectiles.iter().enumerate() {
        match classify(projectile, paddle, floor_y) {
            Fate::Caught => out.caught.push(idx),
            Fate::Missed => out.missed.push(idx),
            Fate::Falling => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bomb_at(id: u32, x: f32, y: f32) -> Projectile {
        Projectile::new(id, Vec2::new(x, y), Vec2::splat(70.0))
    }

    fn paddle_at(x: f32) -> Aabb {
        Aabb::from_center(Vec2::new(x, 50.0), Vec2::new(100.0, 20.0))
    }

    #[test]
    fn test_overlap_and_separation() {
        let a = Aabb::from_center(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_center(Vec2::new(9.0, 0.0), Vec2::splat(10.0));
        let c = Aabb::from_center(Vec2::new(11.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_overlap() {
        let a = Aabb::from_center(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_center(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_bomb_over_paddle_is_caught() {
        // Paddle centred at 200 (half-width 50), bomb at 205 in the paddle band
        let bomb = bomb_at(1, 205.0, 60.0);
        assert_eq!(classify(&bomb, &paddle_at(200.0), 0.0), Fate::Caught);
    }

    #[test]
    fn test_bomb_below_floor_is_missed() {
        let bomb = bomb_at(1, 20.0, -1.0);
        assert_eq!(classify(&bomb, &paddle_at(300.0), 0.0), Fate::Missed);
    }

    #[test]
    fn test_catch_wins_over_miss() {
        // Below the floor but still overlapping a paddle
        let bomb = bomb_at(1, 200.0, -0.5);
        let low_paddle = Aabb::from_center(Vec2::new(200.0, 0.0), Vec2::new(100.0, 20.0));
        assert_eq!(classify(&bomb, &low_paddle, 0.0), Fate::Caught);
    }

    #[test]
    fn test_swept_bomb_cannot_tunnel() {
        let mut bomb = bomb_at(1, 200.0, -10.0);
        bomb.prev_pos = Vec2::new(200.0, 400.0);
        assert_eq!(classify(&bomb, &paddle_at(200.0), 0.0), Fate::Caught);
    }

    #[test]
    fn test_partition_splits_by_fate() {
        let bombs = vec![
            bomb_at(1, 200.0, 60.0),
            bomb_at(2, 20.0, 500.0),
            bomb_at(3, 20.0, -5.0),
        ];
        let parts = partition(&bombs, &paddle_at(200.0), 0.0);
        assert_eq!(parts.caught, vec![0]);
        assert_eq!(parts.missed, vec![2]);
        assert!(!parts.is_empty());
    }
}
