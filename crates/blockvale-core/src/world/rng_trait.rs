//! RNG trait abstraction for generation stages
//!
//! Each stage that needs random draws gets its own generator from
//! [`stage_rng`], seeded from the world seed plus a fixed per-stage offset.
//! Stages that only draw for voxels an earlier stage left in place use
//! [`voxel_rng`] instead, so the draws at one voxel never depend on how many
//! voxels before it were skipped.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Generator type used by every stage
pub type StageRng = Xoshiro256StarStar;

/// Build the generator for a stage
pub fn stage_rng(seed: i32, offset: i64) -> StageRng {
    StageRng::seed_from_u64((seed as i64).wrapping_add(offset) as u64)
}

/// Build the generator for one voxel of a stage
///
/// Keyed by the voxel's flat grid index rather than by draw order.
pub fn voxel_rng(seed: i32, offset: i64, index: u64) -> StageRng {
    let base = (seed as i64).wrapping_add(offset) as u64;
    StageRng::seed_from_u64(base.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ index)
}

/// Random number generator trait for generation stages
pub trait WorldRng {
    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Generate random integer in the inclusive range [min, max]
    fn gen_range_i32(&mut self, min: i32, max: i32) -> i32;

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }
}

// Blanket implementation so stages accept any seeded rand::Rng
impl<T: ?Sized + rand::Rng> WorldRng for T {
    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }

    fn gen_range_i32(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        rand::Rng::gen_range(self, min..=max)
    }
}
