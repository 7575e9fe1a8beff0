//! Top-down PNG previews of a generated world

use anyhow::Result;
use blockvale_core::{VoxelGrid, WorldGenerator};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

/// What each map pixel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    /// Color of the highest non-air block, water included
    Surface { shade_height: bool },
    /// Color of the biome the generator assigned to the column
    Biomes,
}

/// Render one pixel block per column, `scale` pixels on a side
pub fn render_map(
    grid: &VoxelGrid,
    generator: &WorldGenerator,
    mode: MapMode,
    scale: u32,
) -> Result<RgbaImage> {
    let scale = scale.max(1);
    let width = grid.width().max(0) as u32 * scale;
    let height = grid.depth().max(0) as u32 * scale;
    let mut buffer = vec![0u8; width as usize * height as usize * 4];

    for z in 0..grid.depth() {
        for x in 0..grid.width() {
            let color = match mode {
                MapMode::Surface { shade_height } => surface_color(grid, x, z, shade_height),
                MapMode::Biomes => generator.biome_at(x, z).definition().map_color,
            };

            for py in 0..scale {
                let row = (z as u32 * scale + py) as usize;
                for px in 0..scale {
                    let col = (x as u32 * scale + px) as usize;
                    let i = (row * width as usize + col) * 4;
                    buffer[i..i + 4].copy_from_slice(&color);
                }
            }
        }
    }

    ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, buffer)
        .ok_or_else(|| anyhow::anyhow!("Failed to create image buffer"))
}

fn surface_color(grid: &VoxelGrid, x: i32, z: i32, shade_height: bool) -> [u8; 4] {
    let Some((y, block)) = grid.top_block(x, z) else {
        return [0, 0, 0, 255];
    };
    let [r, g, b, a] = block.color();
    if !shade_height || grid.height() <= 1 {
        return [r, g, b, a];
    }

    // 0.6 at the floor up to 1.2 at the ceiling
    let t = y as f32 / (grid.height() - 1) as f32;
    let factor = 0.6 + 0.6 * t;
    let shade = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
    [shade(r), shade(g), shade(b), a]
}

/// Write the map as a PNG
pub fn save_map(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    image.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockvale_core::world::WorldParams;
    use blockvale_core::{BlockType, WorldGenConfig};

    fn small_generator() -> WorldGenerator {
        WorldGenerator::from_config(
            12345,
            WorldGenConfig {
                world: WorldParams {
                    width: 24,
                    depth: 16,
                    ..WorldParams::default()
                },
                ..WorldGenConfig::default()
            },
        )
    }

    #[test]
    fn test_map_dimensions_follow_scale() {
        let generator = small_generator();
        let grid = generator.generate();
        let image = render_map(&grid, &generator, MapMode::Biomes, 3).expect("render");
        assert_eq!(image.dimensions(), (72, 48));
    }

    #[test]
    fn test_biome_pixels_use_map_colors() {
        let generator = small_generator();
        let grid = generator.generate();
        let image = render_map(&grid, &generator, MapMode::Biomes, 2).expect("render");
        let expected = generator.biome_at(5, 7).definition().map_color;
        assert_eq!(image.get_pixel(10, 14).0, expected);
        assert_eq!(image.get_pixel(11, 15).0, expected);
    }

    #[test]
    fn test_unshaded_surface_matches_block_color() {
        let generator = small_generator();
        let mut grid = generator.generate();
        let ceiling = grid.height() - 1;
        assert!(grid.set_block(3, ceiling, 3, BlockType::Pumpkin));

        let image = render_map(
            &grid,
            &generator,
            MapMode::Surface {
                shade_height: false,
            },
            1,
        )
        .expect("render");
        assert_eq!(image.get_pixel(3, 3).0, BlockType::Pumpkin.color());
    }

    #[test]
    fn test_save_map_writes_png() {
        let generator = small_generator();
        let grid = generator.generate();
        let image = render_map(
            &grid,
            &generator,
            MapMode::Surface { shade_height: true },
            1,
        )
        .expect("render");

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("map.png");
        save_map(&image, &path).expect("save");
        let loaded = image::open(&path).expect("reopen").to_rgba8();
        assert_eq!(loaded.dimensions(), (24, 16));
        assert_eq!(loaded, image);
    }
}
