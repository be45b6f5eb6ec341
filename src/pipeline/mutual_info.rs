//! Mutual information between a feature and a continuous target
//!
//! Implements the Kraskov-Stögbauer-Grassberger (KSG) k-nearest-neighbour
//! estimator, algorithm 1:
//!
//! ```text
//! I(X;Y) = ψ(N) + ψ(k) - ⟨ψ(nₓ + 1)⟩ - ⟨ψ(nᵧ + 1)⟩
//! ```
//!
//! where ε is the max-norm distance to the k-th neighbour in joint space and
//! nₓ, nᵧ count the other points strictly closer than ε in each marginal.
//! Both variables are scaled to unit standard deviation and a tiny jitter is
//! added to break ties between repeated values, which are common in one-hot
//! and integer-coded census columns. Estimates are in nats and clipped at 0.

use statrs::function::gamma::digamma;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use super::table::FeatureTable;

/// Default number of neighbours, matching common practice for small samples
pub const DEFAULT_MI_NEIGHBORS: usize = 3;

/// Relative magnitude of the tie-breaking jitter
const JITTER_SCALE: f64 = 1e-10;

const FEATURE_SALT: u64 = 0x51_7c_c1_b7_27_22_0a_95;
const TARGET_SALT: u64 = 0x2b_d1_e9_95_a4_f3_c1_07;

/// k-NN mutual information estimator
#[derive(Debug, Clone, Copy)]
pub struct MutualInfoEstimator {
    k: usize,
}

impl Default for MutualInfoEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_MI_NEIGHBORS)
    }
}

impl MutualInfoEstimator {
    pub fn new(k: usize) -> Self {
        Self { k: k.max(1) }
    }

    pub fn neighbors(&self) -> usize {
        self.k
    }

    /// Estimate I(X;Y) in nats. Returns 0.0 for mismatched or too-short input.
    pub fn estimate(&self, x: &[f64], y: &[f64]) -> f64 {
        if x.len() != y.len() || x.len() < 2 {
            return 0.0;
        }

        let (xs, ys) = prepare(x, y);
        self.ksg(&xs, &ys)
    }

    fn ksg(&self, x: &[f64], y: &[f64]) -> f64 {
        let n = x.len();
        let k = self.k.min(n - 1);

        // Points sorted by x so the neighbour search can expand outwards and
        // stop once the x-gap alone exceeds the current k-th distance.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| x[a].total_cmp(&x[b]));
        let xs: Vec<f64> = order.iter().map(|&i| x[i]).collect();
        let ys: Vec<f64> = order.iter().map(|&i| y[i]).collect();

        let mut y_sorted = y.to_vec();
        y_sorted.sort_by(f64::total_cmp);

        let mut heap: BinaryHeap<Distance> = BinaryHeap::with_capacity(k + 1);
        let mut psi_sum = 0.0;

        for p in 0..n {
            heap.clear();
            let (xp, yp) = (xs[p], ys[p]);
            let mut left = p;
            let mut right = p + 1;

            loop {
                let gap_left = if left > 0 { xp - xs[left - 1] } else { f64::INFINITY };
                let gap_right = if right < n { xs[right] - xp } else { f64::INFINITY };
                let gap = gap_left.min(gap_right);

                if gap.is_infinite() {
                    break;
                }
                if heap.len() == k && heap.peek().is_some_and(|d| gap >= d.0) {
                    break;
                }

                let q = if gap_left <= gap_right {
                    left -= 1;
                    left
                } else {
                    right += 1;
                    right - 1
                };

                let dist = (xs[q] - xp).abs().max((ys[q] - yp).abs());
                if heap.len() < k {
                    heap.push(Distance(dist));
                } else if heap.peek().is_some_and(|d| dist < d.0) {
                    heap.pop();
                    heap.push(Distance(dist));
                }
            }

            let eps = heap.peek().map_or(0.0, |d| d.0);
            let nx = count_within(&xs, xp, eps);
            let ny = count_within(&y_sorted, yp, eps);

            psi_sum += digamma(nx as f64 + 1.0) + digamma(ny as f64 + 1.0);
        }

        let mi = digamma(n as f64) + digamma(k as f64) - psi_sum / n as f64;
        mi.max(0.0)
    }
}

/// Mutual information of every column in the table against the target,
/// in table order.
pub fn mutual_info_regression(table: &FeatureTable, target: &[f64], k: usize) -> Vec<f64> {
    let estimator = MutualInfoEstimator::new(k);
    table
        .iter()
        .map(|(_, values)| estimator.estimate(values, target))
        .collect()
}

/// Max-heap entry for neighbour distances
#[derive(Debug, Clone, Copy, PartialEq)]
struct Distance(f64);

impl Eq for Distance {}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Number of values strictly within `eps` of `center`, excluding the point itself.
fn count_within(sorted: &[f64], center: f64, eps: f64) -> usize {
    let lo = sorted.partition_point(|&v| v <= center - eps);
    let hi = sorted.partition_point(|&v| v < center + eps);
    hi.saturating_sub(lo).saturating_sub(1)
}

/// Scale both variables and add tie-breaking jitter.
///
/// The jitter for a row is derived from its (x, y) pair and how many times
/// that pair has been seen, so the resulting point set depends only on the
/// multiset of rows, up to floating-point summation order in the scaling.
fn prepare(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut xs = scale(x);
    let mut ys = scale(y);

    let x_amp = JITTER_SCALE * mean_abs(&xs).max(1.0);
    let y_amp = JITTER_SCALE * mean_abs(&ys).max(1.0);

    let mut seen: HashMap<(u64, u64), u64> = HashMap::new();
    for i in 0..x.len() {
        let key = (canonical_bits(x[i]), canonical_bits(y[i]));
        let occurrence = seen.entry(key).or_insert(0);
        xs[i] += x_amp * jitter(key, *occurrence, FEATURE_SALT);
        ys[i] += y_amp * jitter(key, *occurrence, TARGET_SALT);
        *occurrence += 1;
    }

    (xs, ys)
}

/// Divide by the population standard deviation; constant input is left as is.
fn scale(values: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = var.sqrt();

    if std > 0.0 {
        values.iter().map(|v| v / std).collect()
    } else {
        values.to_vec()
    }
}

fn mean_abs(values: &[f64]) -> f64 {
    values.iter().map(|v| v.abs()).sum::<f64>() / values.len() as f64
}

fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

/// Deterministic value in [-1, 1) for a row key
fn jitter(key: (u64, u64), occurrence: u64, salt: u64) -> f64 {
    let mut h = splitmix64(key.0 ^ salt);
    h = splitmix64(h ^ key.1);
    h = splitmix64(h ^ occurrence);
    let unit = (h >> 11) as f64 / (1u64 << 53) as f64;
    unit * 2.0 - 1.0
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
