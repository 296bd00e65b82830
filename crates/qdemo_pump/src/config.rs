//! Pump scheduling problem data
//!
//! Costs per pump and shift, flow per pump, daily demand and the Lagrange
//! multipliers that weigh each constraint against the running cost.

use qdemo_core::{QdemoError, QdemoResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Pump scheduling problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PumpProblem {
    // ========================================================================
    // Problem Data
    // ========================================================================
    /// Running cost, `costs[pump][shift]`
    pub costs: Vec<Vec<i64>>,

    /// Flow delivered by each pump per shift it runs
    pub flows: Vec<i64>,

    /// Total flow required for the day
    pub demand: i64,

    /// Shift names, in column order
    pub shifts: Vec<String>,

    /// Most pumps allowed to run in the same shift
    pub max_concurrent: i64,

    // ========================================================================
    // Penalty Weights
    // ========================================================================
    /// Weight of "every pump runs at least once"
    pub run_once_multiplier: f64,

    /// Weight of "at most `max_concurrent` pumps per shift"
    pub concurrency_multiplier: f64,

    /// Weight of "total flow meets demand"
    pub demand_multiplier: f64,

    // ========================================================================
    // Sampling
    // ========================================================================
    /// Reads requested from the sampler
    pub num_reads: usize,
}

impl PumpProblem {
    /// Default four-pump, two-shift problem
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> QdemoResult<Self> {
        let problem: Self = serde_json::from_str(json)?;
        problem.validate()?;
        Ok(problem)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> QdemoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set the cost table
    pub fn with_costs(mut self, costs: Vec<Vec<i64>>) -> Self {
        self.costs = costs;
        self
    }

    /// Set pump flows
    pub fn with_flows(mut self, flows: Vec<i64>) -> Self {
        self.flows = flows;
        self
    }

    /// Set daily demand
    pub fn with_demand(mut self, demand: i64) -> Self {
        self.demand = demand;
        self
    }

    /// Set shift names
    pub fn with_shifts<S: Into<String>>(mut self, shifts: impl IntoIterator<Item = S>) -> Self {
        self.shifts = shifts.into_iter().map(Into::into).collect();
        self
    }

    /// Set the concurrency limit
    pub fn with_max_concurrent(mut self, max_concurrent: i64) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    /// Set all three Lagrange multipliers
    pub fn with_multipliers(mut self, run_once: f64, concurrency: f64, demand: f64) -> Self {
        self.run_once_multiplier = run_once;
        self.concurrency_multiplier = concurrency;
        self.demand_multiplier = demand;
        self
    }

    /// Set sampler reads
    pub fn with_num_reads(mut self, num_reads: usize) -> Self {
        self.num_reads = num_reads;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of pumps
    pub fn num_pumps(&self) -> usize {
        self.costs.len()
    }

    /// Number of shifts
    pub fn num_shifts(&self) -> usize {
        self.shifts.len()
    }

    /// Variable label for a pump running in a shift, e.g. `P0_AM`
    pub fn variable_label(&self, pump: usize, shift: usize) -> String {
        format!("P{}_{}", pump, self.shifts[shift])
    }

    /// Validate problem dimensions and weights
    pub fn validate(&self) -> QdemoResult<()> {
        let invalid = |msg: String| Err(QdemoError::InvalidProblem(msg));

        if self.costs.is_empty() {
            return invalid("at least one pump is required".to_string());
        }
        if self.shifts.is_empty() {
            return invalid("at least one shift is required".to_string());
        }
        if self.flows.len() != self.costs.len() {
            return invalid(format!(
                "{} flows given for {} pumps",
                self.flows.len(),
                self.costs.len()
            ));
        }
        if let Some((p, row)) = self
            .costs
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.shifts.len())
        {
            return invalid(format!(
                "pump {} has {} costs for {} shifts",
                p,
                row.len(),
                self.shifts.len()
            ));
        }

        let mut seen = HashSet::new();
        for shift in &self.shifts {
            if shift.is_empty() {
                return Err(QdemoError::InvalidLabel(shift.clone()));
            }
            if !seen.insert(shift) {
                return invalid(format!("duplicate shift '{}'", shift));
            }
        }

        if self.demand < 0 {
            return invalid(format!("demand must be >= 0, got {}", self.demand));
        }
        if self.max_concurrent < 0 {
            return invalid(format!(
                "max_concurrent must be >= 0, got {}",
                self.max_concurrent
            ));
        }
        for (name, value) in [
            ("run_once_multiplier", self.run_once_multiplier),
            ("concurrency_multiplier", self.concurrency_multiplier),
            ("demand_multiplier", self.demand_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{} must be finite and >= 0, got {}", name, value));
            }
        }
        if self.num_reads == 0 {
            return Err(QdemoError::ZeroShots);
        }

        Ok(())
    }
}

impl Default for PumpProblem {
    fn default() -> Self {
        Self {
            costs: vec![vec![36, 27], vec![56, 65], vec![48, 36], vec![52, 16]],
            flows: vec![2, 7, 3, 8],
            demand: 20,
            shifts: vec!["AM".to_string(), "PM".to_string()],
            max_concurrent: 3,
            run_once_multiplier: 13.0,
            concurrency_multiplier: 1.0,
            demand_multiplier: 28.0,
            num_reads: 1000,
        }
    }
}

impl fmt::Display for PumpProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PumpProblem({} pumps x {} shifts, demand={}, max_concurrent={})",
            self.num_pumps(),
            self.num_shifts(),
            self.demand,
            self.max_concurrent
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_problem() {
        let problem = PumpProblem::default();
        assert!(problem.validate().is_ok());
        assert_eq!(problem.num_pumps(), 4);
        assert_eq!(problem.num_shifts(), 2);
        assert_eq!(problem.variable_label(0, 0), "P0_AM");
        assert_eq!(problem.variable_label(3, 1), "P3_PM");
    }

    #[test]
    fn test_builder() {
        let problem = PumpProblem::new()
            .with_costs(vec![vec![1, 2, 3]])
            .with_flows(vec![5])
            .with_shifts(["night", "day", "evening"])
            .with_demand(10)
            .with_max_concurrent(1)
            .with_multipliers(2.0, 3.0, 4.0)
            .with_num_reads(10);

        assert!(problem.validate().is_ok());
        assert_eq!(problem.variable_label(0, 2), "P0_evening");
        assert_eq!(problem.demand_multiplier, 4.0);
    }

    #[test]
    fn test_validation_errors() {
        let short_flows = PumpProblem::new().with_flows(vec![1, 2]);
        assert!(matches!(
            short_flows.validate(),
            Err(QdemoError::InvalidProblem(_))
        ));

        let ragged = PumpProblem::new().with_costs(vec![vec![1, 2], vec![3], vec![4, 5], vec![6, 7]]);
        assert!(ragged.validate().is_err());

        let duplicate = PumpProblem::new().with_shifts(["AM", "AM"]);
        assert!(duplicate.validate().is_err());

        let negative = PumpProblem::new().with_multipliers(-1.0, 1.0, 1.0);
        assert!(negative.validate().is_err());

        let no_reads = PumpProblem::new().with_num_reads(0);
        assert!(matches!(no_reads.validate(), Err(QdemoError::ZeroShots)));
    }

    #[test]
    fn test_json_partial_override() {
        let problem = PumpProblem::from_json(r#"{ "demand": 15, "num_reads": 50 }"#).unwrap();
        assert_eq!(problem.demand, 15);
        assert_eq!(problem.num_reads, 50);
        assert_eq!(problem.flows, vec![2, 7, 3, 8]);

        let json = problem.to_json().unwrap();
        assert_eq!(PumpProblem::from_json(&json).unwrap(), problem);

        assert!(matches!(
            PumpProblem::from_json("not json"),
            Err(QdemoError::JsonError(_))
        ));
    }
}
