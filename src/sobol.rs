// src/sobol.rs
//! Scrambled Sobol Low-Discrepancy Sequence
//!
//! # Construction
//!
//! Dimension 0 is the van der Corput sequence in base 2. Dimension `d ≥ 1`
//! uses the d-th primitive polynomial over GF(2) (ordered by degree, then
//! value) with the Bratley-Fox recurrence on direction numbers:
//! ```text
//! V_k = a_1 V_{k-1} ⊕ … ⊕ a_{s-1} V_{k-s+1} ⊕ V_{k-s} ⊕ (V_{k-s} >> s)
//! ```
//! Initial direction numbers are odd integers m_k < 2^k drawn from a fixed
//! hash, so the unscrambled sequence is the same in every process.
//!
//! # Scrambling
//!
//! Each instance applies a random linear matrix scramble (lower-triangular,
//! unit diagonal) to every dimension's direction numbers followed by a random
//! digital shift. Both preserve the net structure, so the first 2^m points
//! of every coordinate still fall one per dyadic interval of width 2^-m.
//!
//! Points are generated in Gray-code order starting at index 0.

use crate::error::{HestonError, HestonResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SOBOL_MAX_DIMENSIONS: usize = 21_201;

const BITS: usize = 64;
const DIRECTION_SEED: u64 = 0x243F_6A88_85A3_08D3;
const INV_2_POW_52: f64 = 1.0 / 4503599627370496.0;

#[derive(Debug, Clone)]
pub struct SobolSequence {
    dimensions: usize,
    index: u64,
    x: Vec<u64>,
    directions: Vec<[u64; BITS]>,
    shifts: Vec<u64>,
}

impl SobolSequence {
    /// Build a scrambled sequence; `seed` fully determines the scrambling.
    pub fn new(dimensions: usize, seed: u64) -> HestonResult<Self> {
        if !(1..=SOBOL_MAX_DIMENSIONS).contains(&dimensions) {
            return Err(HestonError::InvalidConfiguration {
                field: "sobol_dimensions".to_string(),
                reason: format!(
                    "{} is outside the supported range [1, {}]",
                    dimensions, SOBOL_MAX_DIMENSIONS
                ),
            });
        }

        let polynomials = primitive_polynomials(dimensions - 1);
        let mut scramble_rng = StdRng::seed_from_u64(seed);

        let mut directions = Vec::with_capacity(dimensions);
        let mut shifts = Vec::with_capacity(dimensions);
        for dim in 0..dimensions {
            let raw = if dim == 0 {
                van_der_corput_directions()
            } else {
                direction_numbers(polynomials[dim - 1], dim as u64)
            };
            directions.push(linear_scramble(&raw, &mut scramble_rng));
            shifts.push(scramble_rng.gen::<u64>());
        }

        Ok(Self {
            dimensions,
            index: 0,
            x: vec![0_u64; dimensions],
            directions,
            shifts,
        })
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Write the current point into `out[..dimensions]` and advance.
    ///
    /// Every coordinate lies strictly inside (0, 1).
    #[inline]
    pub fn next_into(&mut self, out: &mut [f64]) {
        for (dim, slot) in out.iter_mut().take(self.dimensions).enumerate() {
            *slot = to_unit_interval(self.x[dim] ^ self.shifts[dim]);
        }

        let c = self.index.trailing_ones() as usize;
        if c < BITS {
            for (x, directions) in self.x.iter_mut().zip(&self.directions) {
                *x ^= directions[c];
            }
        }
        self.index = self.index.wrapping_add(1);
    }
}

impl Iterator for SobolSequence {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut point = vec![0.0_f64; self.dimensions];
        self.next_into(&mut point);
        Some(point)
    }
}

/// Top 52 bits, centred in their cell so 0 and 1 are never produced
#[inline]
fn to_unit_interval(bits: u64) -> f64 {
    ((bits >> 12) as f64 + 0.5) * INV_2_POW_52
}

fn van_der_corput_directions() -> [u64; BITS] {
    let mut v = [0_u64; BITS];
    for (j, item) in v.iter_mut().enumerate() {
        *item = 1_u64 << (63 - j);
    }
    v
}

fn direction_numbers(poly: u64, dim: u64) -> [u64; BITS] {
    let degree = (63 - poly.leading_zeros()) as usize;
    let mut v = [0_u64; BITS];

    for (k, item) in v.iter_mut().enumerate().take(degree) {
        let hash = splitmix64(DIRECTION_SEED ^ (dim << 32) ^ k as u64);
        let m = (hash & ((1_u64 << (k + 1)) - 1)) | 1;
        *item = m << (63 - k);
    }

    for k in degree..BITS {
        let mut value = v[k - degree] ^ (v[k - degree] >> degree);
        for j in 1..degree {
            if (poly >> (degree - j)) & 1 == 1 {
                value ^= v[k - j];
            }
        }
        v[k] = value;
    }
    v
}

/// Multiply every direction number by a random lower-triangular binary
/// matrix with unit diagonal. Digit `i` counts from the most significant bit.
fn linear_scramble(v: &[u64; BITS], rng: &mut StdRng) -> [u64; BITS] {
    let rows: [u64; BITS] = std::array::from_fn(|i| {
        let diagonal = 1_u64 << (63 - i);
        let above = if i == 0 {
            0
        } else {
            rng.gen::<u64>() & !((1_u64 << (64 - i)) - 1)
        };
        diagonal | above
    });

    let mut out = [0_u64; BITS];
    for (slot, &direction) in out.iter_mut().zip(v.iter()) {
        let mut scrambled = 0_u64;
        for (i, &row) in rows.iter().enumerate() {
            if (row & direction).count_ones() & 1 == 1 {
                scrambled |= 1_u64 << (63 - i);
            }
        }
        *slot = scrambled;
    }
    out
}

/// The first `count` primitive polynomials over GF(2), by degree then value.
/// Bit `i` holds the coefficient of x^i.
fn primitive_polynomials(count: usize) -> Vec<u64> {
    let mut found = Vec::with_capacity(count);
    let mut degree = 1_u32;

    while found.len() < count {
        let order = (1_u64 << degree) - 1;
        let factors = prime_factors(order);
        let leading = 1_u64 << degree;

        // Constant term must be 1
        for poly in (leading + 1..leading << 1).step_by(2) {
            if found.len() == count {
                break;
            }
            if is_primitive(poly, degree, order, &factors) {
                found.push(poly);
            }
        }
        degree += 1;
    }
    found
}

/// `poly` is primitive iff x has multiplicative order exactly 2^degree - 1
/// modulo `poly`.
fn is_primitive(poly: u64, degree: u32, order: u64, factors: &[u64]) -> bool {
    let top = 1_u64 << degree;
    let x = if 2 & top != 0 { 2 ^ poly } else { 2 };

    pow_mod(x, order, poly, degree) == 1
        && factors
            .iter()
            .all(|&q| pow_mod(x, order / q, poly, degree) != 1)
}

fn mul_mod(mut a: u64, mut b: u64, poly: u64, degree: u32) -> u64 {
    let top = 1_u64 << degree;
    let mut result = 0_u64;
    while b != 0 {
        if b & 1 == 1 {
            result ^= a;
        }
        b >>= 1;
        a <<= 1;
        if a & top != 0 {
            a ^= poly;
        }
    }
    result
}

fn pow_mod(base: u64, mut exp: u64, poly: u64, degree: u32) -> u64 {
    let mut result = 1_u64;
    let mut base = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, poly, degree);
        }
        base = mul_mod(base, base, poly, degree);
        exp >>= 1;
    }
    result
}

fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut p = 2_u64;
    while p * p <= n {
        if n % p == 0 {
            factors.push(p);
            while n % p == 0 {
                n /= p;
            }
        }
        p += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}
