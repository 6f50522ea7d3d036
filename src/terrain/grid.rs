use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Integer grid coordinate, `0 <= x, y < N`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[display("({x}, {y})")]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Step by a signed offset, returning `None` when the result leaves a grid of `size`
    pub fn offset(self, dx: i32, dy: i32, size: u32) -> Option<Point> {
        let x = self.x as i64 + dx as i64;
        let y = self.y as i64 + dy as i64;
        let size = size as i64;
        if x >= 0 && y >= 0 && x < size && y < size {
            Some(Point::new(x as u32, y as u32))
        } else {
            None
        }
    }

    pub fn manhattan_distance(&self, other: &Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn euclidean_distance(&self, other: &Point) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Square grid of cells stored row-major (`index = y * size + x`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    size: u32,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a `size`×`size` grid filled with `value`
    pub fn filled(size: u32, value: T) -> Self {
        Self {
            size,
            cells: vec![value; (size as usize) * (size as usize)],
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f` at every cell, row by row
    pub fn from_fn(size: u32, mut f: impl FnMut(Point) -> T) -> Self {
        let mut cells = Vec::with_capacity((size as usize) * (size as usize));
        for y in 0..size {
            for x in 0..size {
                cells.push(f(Point::new(x, y)));
            }
        }
        Self { size, cells }
    }

    /// Build a grid from rows, `rows[y][x]`. Returns `None` if the rows are not square.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            size: size as u32,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x < self.size && point.y < self.size
    }

    fn linear_index(&self, point: Point) -> usize {
        point.y as usize * self.size as usize + point.x as usize
    }

    pub fn get(&self, point: Point) -> Option<&T> {
        if self.contains(point) {
            self.cells.get(self.linear_index(point))
        } else {
            None
        }
    }

    /// Overwrite a cell; out-of-bounds writes are ignored and reported as `false`
    pub fn set(&mut self, point: Point, value: T) -> bool {
        if !self.contains(point) {
            return false;
        }
        let index = self.linear_index(point);
        self.cells[index] = value;
        true
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterate every cell with its coordinate, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        let size = self.size;
        self.cells.iter().enumerate().map(move |(i, value)| {
            let i = i as u32;
            (Point::new(i % size, i / size), value)
        })
    }

    /// In-bounds 4-connected neighbours (N, S, W, E)
    pub fn neighbors4(&self, point: Point) -> impl Iterator<Item = Point> + use<T> {
        let size = self.size;
        [(0, -1), (0, 1), (-1, 0), (1, 0)]
            .into_iter()
            .filter_map(move |(dx, dy)| point.offset(dx, dy, size))
    }

    /// In-bounds 8-connected neighbours
    pub fn neighbors8(&self, point: Point) -> impl Iterator<Item = Point> + use<T> {
        let size = self.size;
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |(dx, dy)| point.offset(dx, dy, size))
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Grid<U> {
        Grid {
            size: self.size,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl<T> std::ops::Index<Point> for Grid<T> {
    type Output = T;

    fn index(&self, point: Point) -> &T {
        assert!(
            self.contains(point),
            "point {point} outside {size}x{size} grid",
            size = self.size
        );
        &self.cells[self.linear_index(point)]
    }
}

impl<T> std::ops::IndexMut<Point> for Grid<T> {
    fn index_mut(&mut self, point: Point) -> &mut T {
        assert!(
            self.contains(point),
            "point {point} outside {size}x{size} grid",
            size = self.size
        );
        let index = self.linear_index(point);
        &mut self.cells[index]
    }
}

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
];

/// Elevation per cell, 0 is sea level
pub type HeightMap = Grid<f32>;

/// `true` where a cell is connected to the open sea
pub type OceanMask = Grid<bool>;
