//! Seeded gradient noise
//!
//! A [`NoiseField`] is an immutable permutation table built once from a seed.
//! Every sample is a pure function of that table and the input coordinates,
//! so two fields built from the same seed agree everywhere.

const LCG_MODULUS: i64 = 2_147_483_647;
const LCG_MULTIPLIER: i64 = 16_807;

/// Perlin-style coherent noise in two and three dimensions
#[derive(Clone, Debug)]
pub struct NoiseField {
    /// 256-entry permutation repeated twice so `perm[i + 1]` never wraps
    perm: [u8; 512],
}

impl NoiseField {
    pub fn new(seed: i32) -> Self {
        let mut table: [u8; 256] = std::array::from_fn(|i| i as u8);

        // Park-Miller stream; zero is a fixed point of the generator
        let mut state = (seed as i64).rem_euclid(LCG_MODULUS);
        if state == 0 {
            state = 1;
        }

        for i in (1..256usize).rev() {
            state = state * LCG_MULTIPLIER % LCG_MODULUS;
            let j = (state % (i as i64 + 1)) as usize;
            table.swap(i, j);
        }

        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&table);
        perm[256..].copy_from_slice(&table);

        Self { perm }
    }

    #[inline]
    fn p(&self, i: usize) -> usize {
        self.perm[i] as usize
    }

    /// 2D gradient noise in `[-1, 1]`
    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        let x_floor = x.floor();
        let y_floor = y.floor();
        let xi = (x_floor as i64 & 255) as usize;
        let yi = (y_floor as i64 & 255) as usize;
        let xf = x - x_floor;
        let yf = y - y_floor;

        let u = fade(xf);
        let v = fade(yf);

        let aa = self.p(self.p(xi) + yi);
        let ab = self.p(self.p(xi) + yi + 1);
        let ba = self.p(self.p(xi + 1) + yi);
        let bb = self.p(self.p(xi + 1) + yi + 1);

        let x1 = lerp(grad2(aa, xf, yf), grad2(ba, xf - 1.0, yf), u);
        let x2 = lerp(grad2(ab, xf, yf - 1.0), grad2(bb, xf - 1.0, yf - 1.0), u);

        lerp(x1, x2, v).clamp(-1.0, 1.0)
    }

    /// 3D gradient noise in `[-1, 1]`
    pub fn noise3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let x_floor = x.floor();
        let y_floor = y.floor();
        let z_floor = z.floor();
        let xi = (x_floor as i64 & 255) as usize;
        let yi = (y_floor as i64 & 255) as usize;
        let zi = (z_floor as i64 & 255) as usize;
        let xf = x - x_floor;
        let yf = y - y_floor;
        let zf = z - z_floor;

        let u = fade(xf);
        let v = fade(yf);
        let w = fade(zf);

        let a = self.p(xi) + yi;
        let aa = self.p(a) + zi;
        let ab = self.p(a + 1) + zi;
        let b = self.p(xi + 1) + yi;
        let ba = self.p(b) + zi;
        let bb = self.p(b + 1) + zi;

        let near = lerp(
            lerp(
                grad3(self.p(aa), xf, yf, zf),
                grad3(self.p(ba), xf - 1.0, yf, zf),
                u,
            ),
            lerp(
                grad3(self.p(ab), xf, yf - 1.0, zf),
                grad3(self.p(bb), xf - 1.0, yf - 1.0, zf),
                u,
            ),
            v,
        );
        let far = lerp(
            lerp(
                grad3(self.p(aa + 1), xf, yf, zf - 1.0),
                grad3(self.p(ba + 1), xf - 1.0, yf, zf - 1.0),
                u,
            ),
            lerp(
                grad3(self.p(ab + 1), xf, yf - 1.0, zf - 1.0),
                grad3(self.p(bb + 1), xf - 1.0, yf - 1.0, zf - 1.0),
                u,
            ),
            v,
        );

        lerp(near, far, w).clamp(-1.0, 1.0)
    }

    /// Fractal sum of `octaves` layers of [`noise2d`](Self::noise2d)
    ///
    /// Each octave multiplies frequency by `lacunarity` and amplitude by
    /// `gain`. The sum is divided by the total amplitude, so the result stays
    /// in `[-1, 1]` for any octave count. Zero octaves yields `0.0`.
    pub fn fbm2d(&self, x: f64, y: f64, octaves: u32, lacunarity: f64, gain: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves {
            total += self.noise2d(x * frequency, y * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= gain;
            frequency *= lacunarity;
        }

        if max_amplitude == 0.0 {
            0.0
        } else {
            total / max_amplitude
        }
    }

    /// [`fbm2d`](Self::fbm2d) with the usual lacunarity 2 and gain 0.5
    pub fn fbm2d_default(&self, x: f64, y: f64, octaves: u32) -> f64 {
        self.fbm2d(x, y, octaves, 2.0, 0.5)
    }
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Four diagonal gradients selected by the low two bits
#[inline]
fn grad2(hash: usize, x: f64, y: f64) -> f64 {
    match hash & 3 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        _ => -x - y,
    }
}

/// Twelve cube-edge gradients; hashes 12..=15 repeat four of them
#[inline]
fn grad3(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}
