use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::ops::Index;

pub use engine::*;
pub use error::*;
pub use tile::*;
pub use types::*;
pub use web_time::Instant;

mod engine;
mod error;
pub mod suggest;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub target: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, target: CellCount) -> Self {
        Self { size, target }
    }

    pub fn new((size_x, size_y): Coord2, target: CellCount) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let clamped = target.clamp(1, mult(size_x, size_y));
        if clamped != target {
            log::warn!("target {} out of range, clamped to {}", target, clamped);
        }
        Self::new_unchecked((size_x, size_y), clamped)
    }

    /// The only configuration the shipped game uses: a 10x10 grid where 16
    /// suggestion-driven correct answers finish the puzzle.
    pub const fn classic() -> Self {
        Self::new_unchecked((10, 10), 16)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Immutable solution table: the product at `(x, y)` is `(x + 1) * (y + 1)`,
/// matching the 1-based multiplicands shown in the header strips.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductTable {
    products: Array2<CellCount>,
}

impl ProductTable {
    pub fn new(size: Coord2) -> Self {
        let products = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            mult((x + 1) as Coord, (y + 1) as Coord)
        });
        Self { products }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.products.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.products.len().try_into().unwrap()
    }

    pub fn product_at(&self, coords: Coord2) -> Result<CellCount> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }
}

impl Index<Coord2> for ProductTable {
    type Output = CellCount;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.products[(x as usize, y as usize)]
    }
}
