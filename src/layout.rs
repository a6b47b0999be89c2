//! Maze-to-world mapping
//!
//! The only place that knows about world units. Everything here produces
//! centre-anchored rectangles, which is what the physics engine's rectangle
//! constructor takes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BALL_RADIUS_FRACTION, GOAL_SIZE_FRACTION, WALL_THICKNESS};
use crate::error::{Error, Result};
use crate::maze::{Cell, Maze};

/// Which internal wall of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Wall along the bottom edge of the cell
    Horizontal,
    /// Wall along the right edge of the cell
    Vertical,
}

/// Axis-aligned rectangle, `center` in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    pub center: Vec2,
    pub size: Vec2,
}

impl WorldRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }
}

/// What a body is, as far as game logic cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyLabel {
    /// Arena frame, stays put on win
    Boundary,
    /// Internal maze wall, released on win
    Wall,
    Goal,
    Ball,
}

impl BodyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyLabel::Boundary => "boundary",
            BodyLabel::Wall => "wall",
            BodyLabel::Goal => "goal",
            BodyLabel::Ball => "ball",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "boundary" => Some(BodyLabel::Boundary),
            "wall" => Some(BodyLabel::Wall),
            "goal" => Some(BodyLabel::Goal),
            "ball" => Some(BodyLabel::Ball),
            _ => None,
        }
    }
}

/// Arena size and grid resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub rows: usize,
    pub columns: usize,
    pub wall_thickness: f32,
}

impl Layout {
    pub fn new(width: f32, height: f32, rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(Error::InvalidDimensions { rows, columns });
        }
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidArena { width, height });
        }
        Ok(Self {
            width,
            height,
            rows,
            columns,
            wall_thickness: WALL_THICKNESS,
        })
    }

    /// Layout covering a maze's grid
    pub fn for_maze(maze: &Maze, width: f32, height: f32) -> Result<Self> {
        Self::new(width, height, maze.rows(), maze.columns())
    }

    /// Cell width
    #[inline]
    pub fn unit_x(&self) -> f32 {
        self.width / self.columns as f32
    }

    /// Cell height
    #[inline]
    pub fn unit_y(&self) -> f32 {
        self.height / self.rows as f32
    }

    /// Centre of a cell
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        let (ux, uy) = (self.unit_x(), self.unit_y());
        Vec2::new(cell.col as f32 * ux + ux / 2.0, cell.row as f32 * uy + uy / 2.0)
    }

    /// Wall rectangle on the bottom (horizontal) or right (vertical) edge of a cell
    pub fn cell_to_world_rect(&self, row: usize, col: usize, orientation: Orientation) -> WorldRect {
        let (ux, uy) = (self.unit_x(), self.unit_y());
        let (x0, y0) = (col as f32 * ux, row as f32 * uy);
        match orientation {
            Orientation::Horizontal => WorldRect::new(x0 + ux / 2.0, y0 + uy, ux, self.wall_thickness),
            Orientation::Vertical => WorldRect::new(x0 + ux, y0 + uy / 2.0, self.wall_thickness, uy),
        }
    }

    /// Top, bottom, left, right frame
    pub fn border(&self) -> [WorldRect; 4] {
        let (w, h, t) = (self.width, self.height, self.wall_thickness);
        [
            WorldRect::new(w / 2.0, 0.0, w, t),
            WorldRect::new(w / 2.0, h, w, t),
            WorldRect::new(0.0, h / 2.0, t, h),
            WorldRect::new(w, h / 2.0, t, h),
        ]
    }

    /// Half-cell square centred in `cell`
    pub fn goal_rect(&self, cell: Cell) -> WorldRect {
        let c = self.cell_center(cell);
        WorldRect::new(
            c.x,
            c.y,
            self.unit_x() * GOAL_SIZE_FRACTION,
            self.unit_y() * GOAL_SIZE_FRACTION,
        )
    }

    /// Ball radius relative to the smaller cell side
    pub fn ball_radius(&self) -> f32 {
        self.unit_x().min(self.unit_y()) * BALL_RADIUS_FRACTION
    }
}

/// A body to create in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodySpec {
    Rect {
        rect: WorldRect,
        label: BodyLabel,
        is_static: bool,
    },
    Circle {
        center: Vec2,
        radius: f32,
        label: BodyLabel,
    },
}

impl BodySpec {
    pub fn label(&self) -> BodyLabel {
        match self {
            BodySpec::Rect { label, .. } | BodySpec::Circle { label, .. } => *label,
        }
    }
}

/// Everything the physics layer needs to build one maze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub boundary: Vec<WorldRect>,
    /// One rect per closed internal edge
    pub walls: Vec<WorldRect>,
    pub goal: WorldRect,
    pub ball_center: Vec2,
    pub ball_radius: f32,
}

impl Scene {
    pub fn build(maze: &Maze, layout: &Layout) -> Self {
        let mut walls = Vec::new();

        for (row, col, open) in maze.horizontal_open().iter() {
            if !open {
                walls.push(layout.cell_to_world_rect(row, col, Orientation::Horizontal));
            }
        }
        for (row, col, open) in maze.vertical_open().iter() {
            if !open {
                walls.push(layout.cell_to_world_rect(row, col, Orientation::Vertical));
            }
        }

        log::debug!("Scene: {} walls for {}x{} grid", walls.len(), maze.rows(), maze.columns());

        Self {
            boundary: layout.border().to_vec(),
            walls,
            goal: layout.goal_rect(maze.goal()),
            ball_center: layout.cell_center(maze.entry()),
            ball_radius: layout.ball_radius(),
        }
    }

    /// Bodies in creation order: boundary, walls, goal, ball
    pub fn bodies(&self) -> impl Iterator<Item = BodySpec> + '_ {
        static_rects(&self.boundary, BodyLabel::Boundary)
            .chain(static_rects(&self.walls, BodyLabel::Wall))
            .chain(std::iter::once(BodySpec::Rect {
                rect: self.goal,
                label: BodyLabel::Goal,
                is_static: true,
            }))
            .chain(std::iter::once(BodySpec::Circle {
                center: self.ball_center,
                radius: self.ball_radius,
                label: BodyLabel::Ball,
            }))
    }
}

fn static_rects(rects: &[WorldRect], label: BodyLabel) -> impl Iterator<Item = BodySpec> + '_ {
    rects.iter().map(move |&rect| BodySpec::Rect {
        rect,
        label,
        is_static: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Direction, generate};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_layout_rejects_bad_sizes() {
        assert!(matches!(
            Layout::new(600.0, 600.0, 0, 6),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Layout::new(0.0, 600.0, 6, 6),
            Err(Error::InvalidArena { .. })
        ));
        assert!(Layout::new(f32::NAN, 600.0, 6, 6).is_err());
    }

    #[test]
    fn test_cell_to_world_rect() {
        let layout = Layout::new(600.0, 300.0, 3, 6).unwrap();
        assert_eq!(layout.unit_x(), 100.0);
        assert_eq!(layout.unit_y(), 100.0);

        let h = layout.cell_to_world_rect(1, 2, Orientation::Horizontal);
        assert!(approx(h.center, Vec2::new(250.0, 200.0)));
        assert!(approx(h.size, Vec2::new(100.0, WALL_THICKNESS)));

        let v = layout.cell_to_world_rect(1, 2, Orientation::Vertical);
        assert!(approx(v.center, Vec2::new(300.0, 150.0)));
        assert!(approx(v.size, Vec2::new(WALL_THICKNESS, 100.0)));
    }

    #[test]
    fn test_non_square_cells_use_height() {
        let layout = Layout::new(600.0, 800.0, 4, 6).unwrap();
        assert_eq!(layout.unit_x(), 100.0);
        assert_eq!(layout.unit_y(), 200.0);
        let v = layout.cell_to_world_rect(3, 0, Orientation::Vertical);
        assert!(approx(v.center, Vec2::new(100.0, 700.0)));
        assert!(approx(v.size, Vec2::new(WALL_THICKNESS, 200.0)));
        assert_eq!(layout.ball_radius(), 25.0);
    }

    #[test]
    fn test_scene_matches_maze() {
        let maze = generate(6, 6, &mut Pcg32::seed_from_u64(42)).unwrap();
        let layout = Layout::for_maze(&maze, 600.0, 600.0).unwrap();
        let scene = Scene::build(&maze, &layout);

        // 6x5 + 5x6 internal edges, 35 of them open
        assert_eq!(scene.walls.len(), 60 - 35);
        assert_eq!(scene.boundary.len(), 4);
        assert!(approx(scene.goal.center, Vec2::new(550.0, 550.0)));
        assert!(approx(scene.goal.size, Vec2::new(50.0, 50.0)));
        assert!(approx(scene.ball_center, Vec2::new(50.0, 50.0)));
        assert_eq!(scene.ball_radius, 25.0);

        let bodies: Vec<_> = scene.bodies().collect();
        assert_eq!(bodies.len(), 4 + 25 + 2);
        assert_eq!(bodies.iter().filter(|b| b.label() == BodyLabel::Wall).count(), 25);
        assert_eq!(bodies.last().map(BodySpec::label), Some(BodyLabel::Ball));
    }

    #[test]
    fn test_walls_never_cover_open_passages() {
        let maze = generate(5, 7, &mut Pcg32::seed_from_u64(8)).unwrap();
        let layout = Layout::for_maze(&maze, 700.0, 500.0).unwrap();
        let scene = Scene::build(&maze, &layout);

        for row in 0..5 {
            for col in 0..7 {
                let cell = Cell::new(row, col);
                if col + 1 < 7 && maze.is_open(cell, Direction::Right) {
                    let gap = layout.cell_to_world_rect(row, col, Orientation::Vertical);
                    assert!(!scene.walls.contains(&gap));
                }
                if row + 1 < 5 && !maze.is_open(cell, Direction::Down) {
                    let wall = layout.cell_to_world_rect(row, col, Orientation::Horizontal);
                    assert!(scene.walls.contains(&wall));
                }
            }
        }
    }

    #[test]
    fn test_label_names() {
        for label in [BodyLabel::Boundary, BodyLabel::Wall, BodyLabel::Goal, BodyLabel::Ball] {
            assert_eq!(BodyLabel::from_str(label.as_str()), Some(label));
        }
        assert_eq!(BodyLabel::from_str("spike"), None);
    }
}
