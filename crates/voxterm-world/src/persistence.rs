//! World save files.
//!
//! The format is headerless little-endian:
//!
//! | field | type |
//! |---|---|
//! | width, height, depth | `i32` each |
//! | cells | `depth * height * width` bytes in (z, y, x) order |
//! | time of day, sky brightness | `f32` each |

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use voxterm_core::{BlockId, Error, Result};

use crate::grid::VoxelGrid;
use crate::registry::BlockRegistry;
use crate::world::World;

impl World {
    /// Serialize the world into `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for dim in [self.width(), self.height(), self.depth()] {
            writer.write_all(&dim.to_le_bytes())?;
        }
        writer.write_all(self.grid().as_bytes())?;
        writer.write_all(&self.time_of_day().to_le_bytes())?;
        writer.write_all(&self.sky_brightness().to_le_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Deserialize a world written by [`World::write_to`].
    ///
    /// The world gets the default registry. Short input, invalid dimensions,
    /// ids the registry does not know, a time of day outside `[0, 1)` and a
    /// sky brightness outside `[0, 1]` are all rejected; nothing partially
    /// read is returned.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let width = read_i32(&mut reader)?;
        let height = read_i32(&mut reader)?;
        let depth = read_i32(&mut reader)?;
        let len = VoxelGrid::cell_count(width, height, depth)?;

        // Grow with the data actually present so a lying header cannot force
        // a huge allocation up front.
        let mut bytes = Vec::new();
        reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
        if bytes.len() != len {
            return Err(Error::InvalidData(format!(
                "truncated cell data: expected {len} bytes, got {}",
                bytes.len()
            )));
        }

        let registry = BlockRegistry::default();
        if let Some(bad) = bytes.iter().find(|&&b| !registry.contains(BlockId(b))) {
            return Err(Error::InvalidData(format!("unknown block id {bad}")));
        }
        let cells: Vec<BlockId> = bytemuck::cast_slice(bytes.as_slice()).to_vec();

        let time_of_day = read_f32(&mut reader)?;
        let sky_brightness = read_f32(&mut reader)?;
        if !(0.0..1.0).contains(&time_of_day) {
            return Err(Error::InvalidData(format!("time of day {time_of_day} out of range")));
        }
        if !(0.0..=1.0).contains(&sky_brightness) {
            return Err(Error::InvalidData(format!(
                "sky brightness {sky_brightness} out of range"
            )));
        }

        let grid = VoxelGrid::from_cells(width, height, depth, cells)?;
        let mut world = Self::with_registry(grid, registry);
        world.restore_sky(time_of_day, sky_brightness);
        Ok(world)
    }

    /// Save to `path`.
    ///
    /// Data goes to `<path>.tmp` first and is renamed over `path` once fully
    /// written, so an existing save is never left half overwritten.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let tmp = tmp_path(path);

        let written = File::create(&tmp)
            .map_err(Error::from)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                self.write_to(&mut writer)?;
                writer.into_inner().map_err(|e| Error::Io(e.into_error()))?.sync_all()?;
                Ok(())
            })
            .and_then(|()| fs::rename(&tmp, path).map_err(Error::from));

        if let Err(e) = written {
            warn!(path = %path.display(), error = %e, "world save failed");
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        info!(
            path = %path.display(),
            size = ?self.grid().size(),
            "world saved"
        );
        Ok(())
    }

    /// Load a world saved with [`World::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let world = Self::read_from(BufReader::new(File::open(path)?))?;
        info!(
            path = %path.display(),
            size = ?world.grid().size(),
            blocks = world.grid().count_non_air(),
            "world loaded"
        );
        Ok(world)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn read_array<R: Read>(reader: &mut R) -> Result<[u8; 4]> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::InvalidData("unexpected end of save data".into()),
        _ => Error::Io(e),
    })?;
    Ok(buf)
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    read_array(reader).map(i32::from_le_bytes)
}

fn read_f32<R: Read>(reader: &mut R) -> Result<f32> {
    read_array(reader).map(f32::from_le_bytes)
}
