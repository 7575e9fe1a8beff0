//! Integration tests for chunk meshing against hand-built and generated grids

use blockvale_core::mesh::{ChunkBuildQueue, build_chunk, mesh_world};
use blockvale_core::world::{WorldGenConfig, WorldParams};
use blockvale_core::{
    BlockType, CHUNK_SIZE, ChunkCoord, ChunkMesher, GridAtlas, UvLookup, UvRect, VoxelGrid,
    World, WorldDims, WorldGenerator,
};
use std::collections::BTreeSet;

fn empty_grid() -> VoxelGrid {
    VoxelGrid::new(WorldDims::new(48, 32, 24))
}

/// Triangles with corners rounded to integer grid points, as a set
fn triangle_set(geometry: &blockvale_core::Geometry) -> BTreeSet<[[i64; 3]; 3]> {
    geometry
        .triangles()
        .into_iter()
        .map(|tri| tri.map(|corner| corner.map(|c| (c * 1000.0).round() as i64)))
        .collect()
}

/// Atlas that hands out a distinct rectangle per texture, for checking lookups
struct StripAtlas;

impl UvLookup for StripAtlas {
    fn uv_for(&self, texture_index: u16) -> UvRect {
        let u0 = texture_index as f32 / 64.0;
        UvRect {
            u0,
            v0: 0.0,
            u1: u0 + 1.0 / 64.0,
            v1: 1.0,
        }
    }
}

// ============================================================================
// Face culling
// ============================================================================

#[test]
fn test_isolated_voxel() {
    let mut grid = empty_grid();
    grid.set_block(20, 10, 20, BlockType::Stone);

    let mesh = build_chunk(&grid, 1, 1, &GridAtlas::default());
    let solid = mesh.solid.expect("solid stream");
    assert_eq!(solid.vertex_count(), 24);
    assert_eq!(solid.triangle_count(), 12);
    assert_eq!(solid.positions.len(), 72);
    assert_eq!(solid.normals.len(), 72);
    assert_eq!(solid.uvs.len(), 48);
    assert_eq!(solid.indices.len(), 36);
    assert!(mesh.liquid.is_none());
}

#[test]
fn test_water_culls_shared_face_only() {
    let mut grid = empty_grid();
    grid.set_block(4, 5, 4, BlockType::Water);
    grid.set_block(5, 5, 4, BlockType::Water);

    let mesh = build_chunk(&grid, 0, 0, &GridAtlas::default());
    assert!(mesh.solid.is_none());
    let liquid = mesh.liquid.expect("liquid stream");
    // Two cubes, minus the pair of faces between them
    assert_eq!(liquid.face_count(), 10);

    // Nothing is emitted on the shared plane x = 5
    for (i, vertex) in liquid.positions.chunks_exact(3).enumerate() {
        let normal = &liquid.normals[i * 3..i * 3 + 3];
        if vertex[0] == 5.0 {
            assert_ne!(normal[0].abs(), 1.0);
        }
    }
}

#[test]
fn test_water_against_glass_and_stone() {
    let mut grid = empty_grid();
    grid.set_block(4, 5, 4, BlockType::Water);
    grid.set_block(5, 5, 4, BlockType::Glass);
    grid.set_block(3, 5, 4, BlockType::Stone);

    let mesh = build_chunk(&grid, 0, 0, &GridAtlas::default());
    // Water caps against glass but not against stone
    assert_eq!(mesh.liquid.as_ref().expect("liquid stream").face_count(), 5);
    // Glass shows its face toward the water, stone shows its face toward the water
    let solid = mesh.solid.expect("solid stream");
    assert_eq!(solid.face_count(), 12);
}

#[test]
fn test_buried_voxel_emits_nothing() {
    let mut grid = empty_grid();
    for y in 4..7 {
        for z in 4..7 {
            for x in 4..7 {
                grid.set_block(x, y, z, BlockType::Dirt);
            }
        }
    }
    let mesh = build_chunk(&grid, 0, 0, &GridAtlas::default());
    // A 3x3x3 block only exposes its outer 54 faces
    assert_eq!(mesh.face_count(), 54);
}

#[test]
fn test_world_boundary_faces_are_emitted() {
    let dims = WorldDims::new(4, 4, 4);
    let mut grid = VoxelGrid::new(dims);
    for y in 0..4 {
        for z in 0..4 {
            for x in 0..4 {
                grid.set_block(x, y, z, BlockType::Stone);
            }
        }
    }
    let mesh = build_chunk(&grid, 0, 0, &GridAtlas::default());
    // Completely full world: only the six boundary sides render
    assert_eq!(mesh.face_count(), 6 * 16);
    assert!(mesh.liquid.is_none());
}

// ============================================================================
// Chunk addressing
// ============================================================================

#[test]
fn test_chunk_outside_world_is_empty() {
    let grid = WorldGenerator::from_config(
        3,
        WorldGenConfig {
            world: WorldParams {
                width: 32,
                depth: 32,
                ..WorldParams::default()
            },
            ..WorldGenConfig::default()
        },
    )
    .generate();
    let mesher = ChunkMesher::new(GridAtlas::default());
    for (cx, cz) in [(2, 0), (0, 2), (-1, 0), (0, -1), (100, 100)] {
        let mesh = mesher.build(&grid, cx, cz);
        assert!(mesh.solid.is_none(), "chunk ({cx}, {cz})");
        assert!(mesh.liquid.is_none(), "chunk ({cx}, {cz})");
    }
    assert!(mesher.build(&grid, 1, 1).solid.is_some());
}

#[test]
fn test_partial_chunk_is_clipped() {
    let mut grid = VoxelGrid::new(WorldDims::new(20, 20, 4));
    for z in 0..20 {
        for x in 0..20 {
            grid.set_block(x, 0, z, BlockType::Stone);
        }
    }
    let mesh = build_chunk(&grid, 1, 1, &GridAtlas::default());
    let solid = mesh.solid.expect("solid stream");
    for vertex in solid.positions.chunks_exact(3) {
        assert!(vertex[0] >= CHUNK_SIZE as f32 && vertex[0] <= 20.0);
        assert!(vertex[2] >= CHUNK_SIZE as f32 && vertex[2] <= 20.0);
    }
    // 4x4 slab: top and bottom per column plus the two outer world sides.
    // The inner chunk-border sides are culled by the neighbouring stone.
    assert_eq!(solid.face_count(), 16 * 2 + 4 * 2);
}

// ============================================================================
// Texture lookup
// ============================================================================

#[test]
fn test_face_uvs_come_from_block_textures() {
    use blockvale_core::blocks::FaceSlot;

    let mut grid = empty_grid();
    grid.set_block(2, 2, 2, BlockType::Grass);
    let mesh = build_chunk(&grid, 0, 0, &StripAtlas);
    let solid = mesh.solid.expect("solid stream");

    for (i, normal) in solid.normals.chunks_exact(3).enumerate() {
        let slot = match normal[1] {
            n if n > 0.5 => FaceSlot::Top,
            n if n < -0.5 => FaceSlot::Bottom,
            _ => FaceSlot::Side,
        };
        let expected = StripAtlas.uv_for(BlockType::Grass.texture(slot));
        let u = solid.uvs[i * 2];
        assert!(u == expected.u0 || u == expected.u1, "vertex {i}");
    }
}

#[test]
fn test_grid_atlas_padding_stays_inside_tile() {
    let atlas = GridAtlas::default();
    for block in BlockType::ALL {
        let uv = atlas.uv_for(block.texture(blockvale_core::blocks::FaceSlot::Side));
        assert!(uv.u0 < uv.u1 && uv.v0 < uv.v1, "{block}");
        assert!(uv.u0 > 0.0 && uv.u1 < 1.0);
        assert!(uv.v0 > 0.0 && uv.v1 < 1.0);
    }
}

// ============================================================================
// Generated worlds
// ============================================================================

#[test]
fn test_remesh_without_edits_is_identical() {
    let grid = WorldGenerator::from_config(
        12345,
        WorldGenConfig {
            world: WorldParams {
                width: 32,
                depth: 32,
                ..WorldParams::default()
            },
            ..WorldGenConfig::default()
        },
    )
    .generate();
    let mesher = ChunkMesher::new(GridAtlas::default());

    let first = mesher.build(&grid, 1, 0);
    let second = mesher.build(&grid, 1, 0);
    let solid_a = first.solid.as_ref().expect("terrain has solids");
    let solid_b = second.solid.as_ref().expect("terrain has solids");
    assert_eq!(triangle_set(solid_a), triangle_set(solid_b));
    assert_eq!(first, second);
}

#[test]
fn test_edit_then_remesh_affected_chunks() {
    let config = WorldGenConfig {
        world: WorldParams {
            width: 48,
            depth: 48,
            ..WorldParams::default()
        },
        ..WorldGenConfig::default()
    };
    let mut world = World::from_config(12345, config);
    let atlas = GridAtlas::default();

    let mut queue = ChunkBuildQueue::new();
    queue.extend(world.take_dirty_chunks());
    let initial = queue.build_slice(world.grid(), &atlas, usize::MAX);
    assert_eq!(initial.len(), 9);

    // Dig out the surface block at a chunk corner
    let (x, z) = (16, 16);
    let top = world.grid().surface_height(x, z).expect("ground");
    let affected = world.set_block(x, top, z, BlockType::Air);
    assert_eq!(
        affected.as_slice(),
        &[
            ChunkCoord::new(1, 1),
            ChunkCoord::new(0, 1),
            ChunkCoord::new(1, 0)
        ]
    );

    queue.extend(world.take_dirty_chunks());
    assert_eq!(queue.len(), 3);
    let rebuilt = queue.build_slice(world.grid(), &atlas, 2);
    assert_eq!(rebuilt.len(), 2);
    let rest = queue.build_slice(world.grid(), &atlas, 2);
    assert_eq!(rest.len(), 1);

    // Rebuilt meshes match a fresh mesh of the edited grid
    let fresh = mesh_world(world.grid(), &atlas);
    for (coord, mesh) in rebuilt.iter().chain(rest.iter()) {
        let (_, expected) = fresh
            .iter()
            .find(|(c, _)| c == coord)
            .expect("chunk in world");
        assert_eq!(mesh, expected);
    }
}

#[test]
fn test_mesh_world_covers_every_chunk() {
    let grid = WorldGenerator::from_config(
        77,
        WorldGenConfig {
            world: WorldParams {
                width: 40,
                depth: 24,
                ..WorldParams::default()
            },
            ..WorldGenConfig::default()
        },
    )
    .generate();
    let meshes = mesh_world(&grid, &GridAtlas::default());
    let coords: Vec<ChunkCoord> = meshes.iter().map(|(c, _)| *c).collect();
    assert_eq!(
        coords,
        vec![
            ChunkCoord::new(0, 0),
            ChunkCoord::new(1, 0),
            ChunkCoord::new(2, 0),
            ChunkCoord::new(0, 1),
            ChunkCoord::new(1, 1),
            ChunkCoord::new(2, 1),
        ]
    );
    assert!(meshes.iter().all(|(_, mesh)| mesh.solid.is_some()));
}
