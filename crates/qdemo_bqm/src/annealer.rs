//! Simulated annealing sampler
//!
//! Single-flip Metropolis sweeps over a geometric inverse-temperature
//! schedule. Every read starts from a uniformly random assignment.

use crate::model::BinaryQuadraticModel;
use crate::sampler::Sampler;
use crate::sampleset::{SampleRecord, SampleSet};
use qdemo_core::{QdemoError, QdemoResult};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Default sweeps per read
pub const DEFAULT_NUM_SWEEPS: usize = 1000;

/// Simulated annealing sampler
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingSampler {
    /// Sweeps per read
    num_sweeps: usize,

    /// (hot, cold) inverse temperatures; derived from the model when unset
    beta_range: Option<(f64, f64)>,

    /// Random seed
    seed: Option<u64>,
}

impl SimulatedAnnealingSampler {
    /// Create with default schedule
    pub fn new() -> Self {
        Self {
            num_sweeps: DEFAULT_NUM_SWEEPS,
            beta_range: None,
            seed: None,
        }
    }

    /// Set sweeps per read
    pub fn with_num_sweeps(mut self, num_sweeps: usize) -> Self {
        self.num_sweeps = num_sweeps;
        self
    }

    /// Set the inverse temperature range explicitly
    pub fn with_beta_range(mut self, hot: f64, cold: f64) -> Self {
        self.beta_range = Some((hot, cold));
        self
    }

    /// Set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set an optional seed
    pub fn with_seed_opt(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Schedule of inverse temperatures, one per sweep
    pub fn beta_schedule(&self, bqm: &BinaryQuadraticModel) -> Vec<f64> {
        let (hot, cold) = self.beta_range.unwrap_or_else(|| default_beta_range(bqm));
        match self.num_sweeps {
            0 => Vec::new(),
            1 => vec![cold],
            n => {
                let ratio = cold / hot;
                (0..n)
                    .map(|k| hot * ratio.powf(k as f64 / (n - 1) as f64))
                    .collect()
            }
        }
    }

    fn anneal_once(
        &self,
        bqm: &BinaryQuadraticModel,
        adjacency: &[Vec<(usize, f64)>],
        schedule: &[f64],
        rng: &mut StdRng,
    ) -> Vec<u8> {
        let linear = bqm.linear_biases();
        let n = linear.len();
        let mut state: Vec<u8> = (0..n).map(|_| rng.gen_range(0..=1u8)).collect();

        // field[i] = energy change of turning x_i on, given the rest
        let mut field: Vec<f64> = (0..n)
            .map(|i| {
                linear[i]
                    + adjacency[i]
                        .iter()
                        .filter(|(j, _)| state[*j] == 1)
                        .map(|(_, b)| b)
                        .sum::<f64>()
            })
            .collect();

        for &beta in schedule {
            for i in 0..n {
                let delta = if state[i] == 0 { field[i] } else { -field[i] };
                let accept = delta <= 0.0 || rng.gen::<f64>() < (-beta * delta).exp();
                if !accept {
                    continue;
                }

                let step = if state[i] == 0 { 1.0 } else { -1.0 };
                state[i] ^= 1;
                for &(j, bias) in &adjacency[i] {
                    field[j] += bias * step;
                }
            }
        }

        state
    }
}

impl Default for SimulatedAnnealingSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for SimulatedAnnealingSampler {
    fn name(&self) -> &str {
        "simulated_annealing"
    }

    fn sample(&self, bqm: &BinaryQuadraticModel, num_reads: usize) -> QdemoResult<SampleSet> {
        if num_reads == 0 {
            return Err(QdemoError::ZeroShots);
        }

        let schedule = self.beta_schedule(bqm);
        let adjacency = bqm.adjacency();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        log::info!(
            "annealing {} variables: {} reads x {} sweeps, beta {:.3e} -> {:.3e}",
            bqm.num_variables(),
            num_reads,
            schedule.len(),
            schedule.first().copied().unwrap_or(0.0),
            schedule.last().copied().unwrap_or(0.0)
        );

        let records: Vec<SampleRecord> = (0..num_reads)
            .map(|_| {
                let values = self.anneal_once(bqm, &adjacency, &schedule, &mut rng);
                let energy = bqm.energy_unchecked(&values);
                SampleRecord {
                    values,
                    energy,
                    num_occurrences: 1,
                }
            })
            .collect();

        let sampleset = SampleSet::from_records(bqm.variables().to_vec(), records);
        if let Some(best) = sampleset.first() {
            log::debug!("lowest energy found: {}", best.energy());
        }
        Ok(sampleset)
    }
}

/// Inverse temperature range from the model's biases.
///
/// Hot: a flip costing the largest possible energy change is accepted
/// with probability 1/2. Cold: a flip costing the smallest nonzero bias is
/// accepted with probability 1/100.
pub fn default_beta_range(bqm: &BinaryQuadraticModel) -> (f64, f64) {
    let linear = bqm.linear_biases();
    let mut max_delta = vec![0.0f64; linear.len()];
    for (i, h) in linear.iter().enumerate() {
        max_delta[i] += h.abs();
    }
    let mut min_bias = f64::INFINITY;
    for (i, j, b) in bqm.interactions() {
        max_delta[i] += b.abs();
        max_delta[j] += b.abs();
        if b != 0.0 {
            min_bias = min_bias.min(b.abs());
        }
    }
    for h in linear {
        if *h != 0.0 {
            min_bias = min_bias.min(h.abs());
        }
    }

    let max_delta = max_delta.into_iter().fold(0.0f64, f64::max);
    if max_delta == 0.0 || !min_bias.is_finite() {
        return (0.1, 1.0);
    }

    let hot = std::f64::consts::LN_2 / max_delta;
    let cold = 100f64.ln() / min_bias;
    (hot, cold.max(hot))
}

// ============================================================================
// Tests
// ============================================================================
