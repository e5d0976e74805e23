use std::ops::Add;

use engine::graphics::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub const ZERO: Vec2i = Vec2i { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2i {
    type Output = Vec2i;

    fn add(self, rhs: Vec2i) -> Self::Output {
        Vec2i::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Four cell offsets relative to the piece anchor; `y` grows downward.
pub type Shape = [Vec2i; 4];

pub const SPAWN_ANCHOR: Vec2i = Vec2i::new(4, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub shape: Shape,
    pub color: Color,
}

const fn shape(cells: [(i32, i32); 4]) -> Shape {
    [
        Vec2i::new(cells[0].0, cells[0].1),
        Vec2i::new(cells[1].0, cells[1].1),
        Vec2i::new(cells[2].0, cells[2].1),
        Vec2i::new(cells[3].0, cells[3].1),
    ]
}

pub const CATALOG_SIZE: usize = 8;

/// Spawn orientations. The cell order matters for nothing but is kept stable so rotations are
/// reproducible cell-for-cell.
pub const CATALOG: [CatalogEntry; CATALOG_SIZE] = [
    CatalogEntry {
        name: "square",
        shape: shape([(1, 0), (0, 0), (0, 1), (1, 1)]),
        color: [255, 255, 0, 255],
    },
    CatalogEntry {
        name: "t",
        shape: shape([(0, 1), (1, 1), (2, 1), (1, 0)]),
        color: [128, 0, 128, 255],
    },
    CatalogEntry {
        name: "l",
        shape: shape([(0, 0), (1, 0), (2, 0), (2, 1)]),
        color: [0, 0, 255, 255],
    },
    CatalogEntry {
        name: "j",
        shape: shape([(0, 1), (1, 1), (2, 1), (2, 0)]),
        color: [255, 165, 0, 255],
    },
    CatalogEntry {
        name: "z",
        shape: shape([(0, 0), (1, 0), (1, 1), (2, 1)]),
        color: [0, 128, 0, 255],
    },
    CatalogEntry {
        name: "s",
        shape: shape([(0, 1), (1, 1), (1, 0), (2, 0)]),
        color: [255, 0, 0, 255],
    },
    CatalogEntry {
        name: "t-down",
        shape: shape([(0, 1), (1, 1), (2, 1), (1, 2)]),
        color: [0, 255, 255, 255],
    },
    CatalogEntry {
        name: "line",
        shape: shape([(0, 0), (1, 0), (2, 0), (3, 0)]),
        color: [255, 0, 255, 255],
    },
];

pub const LINE_INDEX: usize = 7;

/// Board identifier for the catalog entry at `index`. Zero stays reserved for empty cells.
pub const fn piece_type_for_index(index: usize) -> u8 {
    index as u8 + 1
}

pub fn catalog_entry(piece_type: u8) -> Option<&'static CatalogEntry> {
    (piece_type as usize)
        .checked_sub(1)
        .and_then(|i| CATALOG.get(i))
}

pub fn color_for_piece_type(piece_type: u8) -> Option<Color> {
    catalog_entry(piece_type).map(|entry| entry.color)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub shape: Shape,
    pub image_index: Option<usize>,
    pub piece_type: u8,
}

impl ActivePiece {
    /// # Panics
    /// If `index` is not a catalog index.
    pub fn from_catalog(index: usize, image_index: Option<usize>) -> Self {
        Self {
            shape: CATALOG[index].shape,
            image_index,
            piece_type: piece_type_for_index(index),
        }
    }

    /// Quarter turn about the shape's local origin: `(x, y) -> (-y, x)`.
    pub fn rotated(&self) -> ActivePiece {
        ActivePiece {
            shape: self.shape.map(|c| Vec2i::new(-c.y, c.x)),
            ..*self
        }
    }

    pub fn color(&self) -> Option<Color> {
        color_for_piece_type(self.piece_type)
    }

    /// Absolute grid cells when anchored at `anchor`.
    pub fn cells(&self, anchor: Vec2i) -> impl Iterator<Item = Vec2i> + '_ {
        self.shape.iter().map(move |&c| anchor + c)
    }
}
