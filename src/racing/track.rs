//! Ring track geometry: walls, waypoints, boost pads and lap zones

use glam::Vec2;

use crate::sim::Rect;
use crate::sim::collision::within_radius;

/// Canvas size the track is laid out on
pub const TRACK_WIDTH: f32 = 1000.0;
pub const TRACK_HEIGHT: f32 = 700.0;

/// Radius within which a car triggers a boost pad
pub const PAD_RADIUS: f32 = 40.0;
/// Distance at which an AI car moves on to its next waypoint
pub const WAYPOINT_REACHED: f32 = 80.0;

/// Driveable area; leaving it is a wall hit
const OUTER: Rect = Rect::new(40.0, 40.0, 960.0, 660.0);
/// Infield hole in the middle of the ring
const INFIELD: Rect = Rect::new(220.0, 180.0, 780.0, 520.0);
/// Mid-track checkpoint on the top straight
const CHECKPOINT: Rect = Rect::new(450.0, 60.0, 550.0, 120.0);
/// Finish zone on the left straight
const FINISH: Rect = Rect::new(50.0, 300.0, 150.0, 450.0);

const WAYPOINTS: [Vec2; 8] = [
    Vec2::new(100.0, 100.0),
    Vec2::new(500.0, 80.0),
    Vec2::new(900.0, 100.0),
    Vec2::new(920.0, 350.0),
    Vec2::new(900.0, 600.0),
    Vec2::new(500.0, 620.0),
    Vec2::new(100.0, 600.0),
    Vec2::new(80.0, 350.0),
];

const BOOST_PADS: [Vec2; 4] = [
    Vec2::new(500.0, 70.0),
    Vec2::new(920.0, 350.0),
    Vec2::new(80.0, 350.0),
    Vec2::new(500.0, 630.0),
];

/// Grid slots: player, then AI cars
pub const GRID: [Vec2; 3] = [
    Vec2::new(100.0, 420.0),
    Vec2::new(130.0, 420.0),
    Vec2::new(70.0, 420.0),
];

/// Static track description
#[derive(Debug, Clone)]
pub struct Track {
    pub outer: Rect,
    pub infield: Rect,
    pub checkpoint: Rect,
    pub finish: Rect,
    pub waypoints: Vec<Vec2>,
    pub boost_pads: Vec<Vec2>,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            outer: OUTER,
            infield: INFIELD,
            checkpoint: CHECKPOINT,
            finish: FINISH,
            waypoints: WAYPOINTS.to_vec(),
            boost_pads: BOOST_PADS.to_vec(),
        }
    }
}

impl Track {
    /// True if `p` is off the tarmac (outside the ring or in the infield)
    pub fn hits_wall(&self, p: Vec2) -> bool {
        !self.inside_outer(p) || self.infield.contains(p)
    }

    /// Inside the outer wall, edges included
    fn inside_outer(&self, p: Vec2) -> bool {
        p.x >= self.outer.min.x
            && p.x <= self.outer.max.x
            && p.y >= self.outer.min.y
            && p.y <= self.outer.max.y
    }

    /// Waypoint by index, wrapping around the lap
    pub fn waypoint(&self, index: usize) -> Option<Vec2> {
        if self.waypoints.is_empty() {
            return None;
        }
        Some(self.waypoints[index % self.waypoints.len()])
    }

    pub fn next_waypoint_index(&self, index: usize) -> usize {
        if self.waypoints.is_empty() {
            0
        } else {
            (index + 1) % self.waypoints.len()
        }
    }

    /// Index of the boost pad under `p`, if any
    pub fn pad_at(&self, p: Vec2) -> Option<usize> {
        self.boost_pads
            .iter()
            .position(|&pad| within_radius(p, pad, PAD_RADIUS))
    }

    pub fn in_checkpoint(&self, p: Vec2) -> bool {
        self.checkpoint.contains(p)
    }

    pub fn in_finish(&self, p: Vec2) -> bool {
        self.finish.contains(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walls() {
        let t = Track::default();
        assert!(t.hits_wall(Vec2::new(39.0, 300.0)));
        assert!(t.hits_wall(Vec2::new(500.0, 661.0)));
        assert!(t.hits_wall(Vec2::new(500.0, 350.0)), "infield is a wall");
        assert!(!t.hits_wall(Vec2::new(100.0, 420.0)));
        assert!(!t.hits_wall(Vec2::new(40.0, 300.0)), "edge is still tarmac");
        assert!(
            !t.hits_wall(Vec2::new(220.0, 350.0)),
            "infield edge is tarmac"
        );
    }

    #[test]
    fn test_grid_is_on_track() {
        let t = Track::default();
        for slot in GRID {
            assert!(!t.hits_wall(slot));
        }
    }

    #[test]
    fn test_waypoints_wrap() {
        let t = Track::default();
        assert_eq!(t.waypoint(8), t.waypoint(0));
        assert_eq!(t.waypoint(17), Some(Vec2::new(500.0, 80.0)));
        assert_eq!(t.next_waypoint_index(7), 0);
    }

    #[test]
    fn test_empty_waypoints_never_panic() {
        let t = Track {
            waypoints: Vec::new(),
            ..Default::default()
        };
        assert_eq!(t.waypoint(3), None);
        assert_eq!(t.next_waypoint_index(3), 0);
    }

    #[test]
    fn test_pads_and_zones() {
        let t = Track::default();
        assert_eq!(t.pad_at(Vec2::new(510.0, 80.0)), Some(0));
        assert_eq!(t.pad_at(Vec2::new(300.0, 100.0)), None);
        assert!(t.in_checkpoint(Vec2::new(500.0, 100.0)));
        assert!(t.in_finish(Vec2::new(100.0, 400.0)));
        assert!(!t.in_finish(Vec2::new(100.0, 460.0)));
    }
}
