//! Random star-shaped polygons (radial jitter + replay tokens).
//!
//! Purpose
//! - Reproducible simple (non-self-intersecting) polygons, concave in general,
//!   for property tests and benchmarks of the grid.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular jitter
//!   (< half the spacing, so angles stay strictly increasing), draw each radius
//!   uniformly from `[r_min, r_max]`. The ring is star-shaped around the origin,
//!   hence simple and counter-clockwise.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::polygon::{Point, Polygon};

/// How many vertices a drawn star gets (never fewer than 3).
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    /// Uniform over `lo..=hi`.
    Between { lo: usize, hi: usize },
}

impl VertexCount {
    fn draw(self, rng: &mut StdRng) -> usize {
        match self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Between { lo, hi } => {
                let lo = lo.max(3);
                rng.gen_range(lo..=hi.max(lo))
            }
        }
    }
}

/// Star sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct StarCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    pub r_min: f64,
    pub r_max: f64,
    pub random_phase: bool,
}

impl Default for StarCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Between { lo: 5, hi: 24 },
            angle_jitter_frac: 0.3,
            r_min: 0.3,
            r_max: 1.0,
            random_phase: true,
        }
    }
}

/// `(seed, index)` pair naming one draw; equal tokens give equal polygons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    fn rng(self) -> StdRng {
        // Neighboring indices must not give correlated streams, so both halves
        // go through an avalanche step before seeding.
        let key = avalanche(self.seed.rotate_left(32) ^ avalanche(self.index));
        StdRng::seed_from_u64(key)
    }
}

fn avalanche(x: u64) -> u64 {
    let x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    let x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// Draw a star-shaped polygon around the origin.
///
/// Returns `None` for unusable radius bounds (`r_min <= 0` or `r_min > r_max`).
pub fn draw_star_polygon(cfg: StarCfg, tok: ReplayToken) -> Option<Polygon> {
    if !(cfg.r_min > 0.0 && cfg.r_min <= cfg.r_max && cfg.r_max.is_finite()) {
        return None;
    }
    let mut rng = tok.rng();
    let n = cfg.vertex_count.draw(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let delta = std::f64::consts::TAU / n as f64;
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    let pts: Vec<Point> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let theta = phase + k as f64 * delta + jitter;
            let r = rng.gen_range(cfg.r_min..=cfg.r_max);
            Point::new(r * theta.cos(), r * theta.sin())
        })
        .collect();
    Polygon::from_open(pts).ok()
}
