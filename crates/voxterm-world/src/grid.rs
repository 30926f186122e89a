//! Dense voxel grid storage.

use glam::IVec3;
use voxterm_core::{BlockId, Error, Result};

/// Dense 3D grid of block ids.
///
/// Cells are stored in one flat buffer in (z, y, x) row-major order, so the
/// cell `(x, y, z)` lives at `z * H * W + y * W + x`. Reads outside the grid
/// return [`BlockId::AIR`] and writes outside the grid are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    width: i32,
    height: i32,
    depth: i32,
    cells: Vec<BlockId>,
}

impl VoxelGrid {
    /// Create an all-air grid.
    ///
    /// Fails if any dimension is not positive or the cell count does not fit
    /// in memory.
    pub fn new(width: i32, height: i32, depth: i32) -> Result<Self> {
        let len = Self::cell_count(width, height, depth)?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|e| Error::Allocation(format!("{width}x{height}x{depth} grid: {e}")))?;
        cells.resize(len, BlockId::AIR);

        Ok(Self {
            width,
            height,
            depth,
            cells,
        })
    }

    /// Wrap an existing cell buffer in (z, y, x) order.
    pub fn from_cells(width: i32, height: i32, depth: i32, cells: Vec<BlockId>) -> Result<Self> {
        let len = Self::cell_count(width, height, depth)?;
        if cells.len() != len {
            return Err(Error::InvalidData(format!(
                "expected {len} cells for {width}x{height}x{depth}, got {}",
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            depth,
            cells,
        })
    }

    /// Number of cells for the given dimensions, validating them.
    pub fn cell_count(width: i32, height: i32, depth: i32) -> Result<usize> {
        if width <= 0 || height <= 0 || depth <= 0 {
            return Err(Error::InvalidData(format!(
                "grid dimensions must be positive, got {width}x{height}x{depth}"
            )));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(depth as usize))
            .ok_or_else(|| Error::Allocation(format!("{width}x{height}x{depth} overflows")))
    }

    #[inline]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub const fn depth(&self) -> i32 {
        self.depth
    }

    /// Grid extents as a vector.
    #[inline]
    pub const fn size(&self) -> IVec3 {
        IVec3::new(self.width, self.height, self.depth)
    }

    /// Returns true if the coordinate lies inside the grid.
    #[inline]
    pub const fn is_valid_position(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height && z >= 0 && z < self.depth
    }

    #[inline]
    const fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if self.is_valid_position(x, y, z) {
            let (w, h) = (self.width as usize, self.height as usize);
            Some((z as usize * h + y as usize) * w + x as usize)
        } else {
            None
        }
    }

    /// Block at a cell, air outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.index(x, y, z).map_or(BlockId::AIR, |i| self.cells[i])
    }

    /// Block at a cell vector, air outside the grid.
    #[inline]
    pub fn get_at(&self, cell: IVec3) -> BlockId {
        self.get(cell.x, cell.y, cell.z)
    }

    /// Set the block at a cell. Returns false (and does nothing) outside the grid.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, block: BlockId) -> bool {
        match self.index(x, y, z) {
            Some(i) => {
                self.cells[i] = block;
                true
            }
            None => false,
        }
    }

    /// Set the block at a cell vector.
    #[inline]
    pub fn set_at(&mut self, cell: IVec3, block: BlockId) -> bool {
        self.set(cell.x, cell.y, cell.z, block)
    }

    /// Fill an inclusive box of cells, clipped to the grid.
    pub fn fill(&mut self, min: IVec3, max: IVec3, block: BlockId) {
        let lo = min.max(IVec3::ZERO);
        let hi = max.min(self.size() - IVec3::ONE);
        for z in lo.z..=hi.z {
            for y in lo.y..=hi.y {
                for x in lo.x..=hi.x {
                    self.set(x, y, z, block);
                }
            }
        }
    }

    /// All cells in (z, y, x) order.
    #[inline]
    pub fn cells(&self) -> &[BlockId] {
        &self.cells
    }

    /// Cells viewed as raw id bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.cells.as_slice())
    }

    /// Number of non-air cells.
    pub fn count_non_air(&self) -> usize {
        self.cells.iter().filter(|b| !b.is_air()).count()
    }

    /// Highest id stored in the grid.
    pub fn max_id(&self) -> BlockId {
        self.cells.iter().copied().max().unwrap_or(BlockId::AIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_air() {
        let grid = VoxelGrid::new(4, 3, 2).unwrap();
        assert_eq!(grid.cells().len(), 24);
        assert_eq!(grid.count_non_air(), 0);
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(matches!(VoxelGrid::new(0, 1, 1), Err(Error::InvalidData(_))));
        assert!(matches!(VoxelGrid::new(1, -2, 1), Err(Error::InvalidData(_))));
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        assert!(matches!(
            VoxelGrid::cell_count(i32::MAX, i32::MAX, i32::MAX),
            Err(Error::Allocation(_))
        ));
        assert!(matches!(
            VoxelGrid::new(i32::MAX, i32::MAX, 4),
            Err(Error::Allocation(_))
        ));
    }

    #[test]
    fn flat_layout_is_z_major() {
        let mut grid = VoxelGrid::new(3, 2, 2).unwrap();
        grid.set(1, 1, 1, BlockId::STONE);
        assert_eq!(grid.cells()[2 * 3 + 3 + 1], BlockId::STONE);
        assert_eq!(grid.as_bytes()[10], 3);
    }

    #[test]
    fn out_of_bounds_reads_air_and_ignores_writes() {
        let mut grid = VoxelGrid::new(2, 2, 2).unwrap();
        grid.fill(IVec3::ZERO, IVec3::ONE, BlockId::STONE);

        for (x, y, z) in [(-1, 0, 0), (0, -1, 0), (0, 0, -1), (2, 0, 0), (0, 2, 0), (0, 0, 2)] {
            assert_eq!(grid.get(x, y, z), BlockId::AIR);
            assert!(!grid.set(x, y, z, BlockId::DIRT));
        }
        assert_eq!(grid.count_non_air(), 8);
    }

    #[test]
    fn fill_clips_to_grid() {
        let mut grid = VoxelGrid::new(4, 4, 4).unwrap();
        grid.fill(IVec3::splat(-5), IVec3::new(10, 10, 0), BlockId::DIRT);
        assert_eq!(grid.count_non_air(), 16);
        assert_eq!(grid.max_id(), BlockId::DIRT);
    }

    #[test]
    fn from_cells_checks_length() {
        assert!(VoxelGrid::from_cells(2, 2, 2, vec![BlockId::AIR; 7]).is_err());
        let grid = VoxelGrid::from_cells(2, 2, 2, vec![BlockId::SAND; 8]).unwrap();
        assert_eq!(grid.get(1, 1, 1), BlockId::SAND);
    }
}
