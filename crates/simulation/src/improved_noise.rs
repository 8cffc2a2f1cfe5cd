//! Improved Perlin noise (Perlin 2002) over a fixed reference permutation.
//!
//! The permutation is the published reference table, not a shuffled one, so a
//! given `(x, y, z)` yields the same value on every platform and every run.
//! Terrain variety comes from the `z` slice the heightmap builder samples, not
//! from the table.

/// Ken Perlin's reference permutation of 0..=255.
#[rustfmt::skip]
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// Gradient noise generator. Immutable after construction; cheap to copy into
/// async tasks.
#[derive(Debug, Clone)]
pub struct ImprovedNoise {
    /// `PERMUTATION` twice over, so corner hashing never needs to wrap.
    perm: [u8; 512],
}

impl Default for ImprovedNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl ImprovedNoise {
    pub fn new() -> Self {
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = PERMUTATION[i & 255];
        }
        Self { perm }
    }

    /// The 256-entry permutation this generator hashes with.
    pub fn permutation(&self) -> &[u8] {
        &self.perm[..256]
    }

    /// Sample the noise field at `(x, y, z)`.
    ///
    /// Output sits roughly in `[-1, 1]` but is not clamped. Every integer
    /// lattice point samples to exactly zero.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());

        // `as i64` then mask keeps negative cells in range (-1 & 255 == 255).
        let xi = (fx as i64 & 255) as usize;
        let yi = (fy as i64 & 255) as usize;
        let zi = (fz as i64 & 255) as usize;

        let (x, y, z) = (x - fx, y - fy, z - fz);
        let (x1, y1, z1) = (x - 1.0, y - 1.0, z - 1.0);

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p[aa], x, y, z), grad(p[ba], x1, y, z)),
                lerp(u, grad(p[ab], x, y1, z), grad(p[bb], x1, y1, z)),
            ),
            lerp(
                v,
                lerp(u, grad(p[aa + 1], x, y, z1), grad(p[ba + 1], x1, y, z1)),
                lerp(u, grad(p[ab + 1], x, y1, z1), grad(p[bb + 1], x1, y1, z1)),
            ),
        )
    }
}

/// `6t^5 - 15t^4 + 10t^3`: zero first and second derivatives at 0 and 1.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product of `(x, y, z)` with one of the 12 cube-edge gradients picked by
/// the low four hash bits (four of the sixteen cases repeat).
#[inline]
fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutation_contains_each_value_once() {
        let noise = ImprovedNoise::new();
        let mut seen = [false; 256];
        for &v in noise.permutation() {
            assert!(!seen[v as usize], "value {v} appears twice");
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "permutation is missing values");
    }

    #[test]
    fn test_permutation_is_duplicated_to_512() {
        let noise = ImprovedNoise::new();
        assert_eq!(noise.perm.len(), 512);
        assert_eq!(&noise.perm[..256], &noise.perm[256..]);
        assert_eq!(noise.permutation(), &PERMUTATION[..]);
    }

    #[test]
    fn test_sample_is_deterministic() {
        let a = ImprovedNoise::new();
        let b = ImprovedNoise::new();
        for &(x, y, z) in &[(3.7, 1.2, 0.5), (-12.3, 40.01, 99.9), (0.1, 0.2, 0.3)] {
            let first = a.sample(x, y, z);
            assert_eq!(first.to_bits(), a.sample(x, y, z).to_bits());
            assert_eq!(first.to_bits(), b.sample(x, y, z).to_bits());
        }
    }

    #[test]
    fn test_sample_matches_reference_values() {
        let noise = ImprovedNoise::new();
        let cases = [
            ((3.7, 1.2, 0.5), 0.15058103423999997),
            ((0.5, 0.5, 0.5), -0.25),
            ((-2.25, 7.5, 13.125), 0.2862403988838196),
        ];
        for ((x, y, z), expected) in cases {
            let got = noise.sample(x, y, z);
            assert!(
                (got - expected).abs() < 1e-12,
                "sample({x}, {y}, {z}) = {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_lattice_points_are_zero() {
        let noise = ImprovedNoise::new();
        for x in -3..4 {
            for y in -3..4 {
                for z in [0, 7, 255, 256] {
                    let v = noise.sample(x as f64, y as f64, z as f64);
                    assert_eq!(v, 0.0, "lattice point ({x}, {y}, {z}) sampled {v}");
                }
            }
        }
    }

    #[test]
    fn test_sample_stays_in_expected_band() {
        let noise = ImprovedNoise::new();
        for i in 0..100 {
            for j in 0..100 {
                let v = noise.sample(i as f64 * 0.137, j as f64 * 0.291, 0.77);
                assert!(v.abs() <= 1.1, "sample out of band: {v}");
            }
        }
    }

    #[test]
    fn test_sample_is_continuous() {
        let noise = ImprovedNoise::new();
        let eps = 1e-6;
        for i in 0..50 {
            let x = i as f64 * 0.173 - 4.0;
            let a = noise.sample(x, 2.5, 9.1);
            let b = noise.sample(x + eps, 2.5, 9.1);
            assert!((a - b).abs() < 1e-4, "jump at x={x}: {a} -> {b}");
        }
    }

    #[test]
    fn test_lattice_wraps_every_256_cells() {
        let noise = ImprovedNoise::new();
        let a = noise.sample(1.3, 2.6, 3.9);
        let b = noise.sample(1.3 + 256.0, 2.6, 3.9 - 256.0);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_fade_endpoints_and_midpoint() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert_eq!(fade(0.5), 0.5);
    }
}
