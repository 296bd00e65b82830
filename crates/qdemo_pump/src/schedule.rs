//! Pump schedules extracted from samples

use crate::config::PumpProblem;
use qdemo_bqm::Sample;
use qdemo_core::{QdemoError, QdemoResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which pumps run in which shifts, with aggregate flow and cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Shift names (column headers)
    shifts: Vec<String>,

    /// `grid[pump][shift]` is 1 when the pump runs
    grid: Vec<Vec<u8>>,

    /// Σ x · flow
    total_flow: i64,

    /// Σ x · cost
    total_cost: i64,

    /// Model energy of the sample the schedule came from
    energy: f64,
}

impl Schedule {
    /// Build from an explicit 0/1 grid
    pub fn from_grid(problem: &PumpProblem, grid: Vec<Vec<u8>>, energy: f64) -> QdemoResult<Self> {
        if grid.len() != problem.num_pumps()
            || grid.iter().any(|row| row.len() != problem.num_shifts())
        {
            return Err(QdemoError::InvalidProblem(format!(
                "schedule grid must be {} x {}",
                problem.num_pumps(),
                problem.num_shifts()
            )));
        }
        if grid.iter().flatten().any(|&x| x > 1) {
            return Err(QdemoError::InvalidProblem(
                "schedule values must be 0 or 1".to_string(),
            ));
        }

        let mut total_flow = 0;
        let mut total_cost = 0;
        for (p, row) in grid.iter().enumerate() {
            for (t, &x) in row.iter().enumerate() {
                total_flow += i64::from(x) * problem.flows[p];
                total_cost += i64::from(x) * problem.costs[p][t];
            }
        }

        Ok(Self {
            shifts: problem.shifts.clone(),
            grid,
            total_flow,
            total_cost,
            energy,
        })
    }

    /// Read the pump variables out of a sample
    pub fn from_sample(problem: &PumpProblem, sample: &Sample<'_>) -> QdemoResult<Self> {
        let grid = (0..problem.num_pumps())
            .map(|p| {
                (0..problem.num_shifts())
                    .map(|t| sample.get(&problem.variable_label(p, t)))
                    .collect::<QdemoResult<Vec<u8>>>()
            })
            .collect::<QdemoResult<Vec<_>>>()?;
        Self::from_grid(problem, grid, sample.energy())
    }

    /// 0/1 grid, `[pump][shift]`
    pub fn grid(&self) -> &[Vec<u8>] {
        &self.grid
    }

    /// Whether a pump runs in a shift
    pub fn is_running(&self, pump: usize, shift: usize) -> bool {
        self.grid
            .get(pump)
            .and_then(|row| row.get(shift))
            .map_or(false, |&x| x == 1)
    }

    /// Total flow delivered
    pub fn total_flow(&self) -> i64 {
        self.total_flow
    }

    /// Total running cost
    pub fn total_cost(&self) -> i64 {
        self.total_cost
    }

    /// Sample energy
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Pumps running in a shift
    pub fn pumps_in_shift(&self, shift: usize) -> usize {
        self.grid
            .iter()
            .filter(|row| row.get(shift) == Some(&1))
            .count()
    }

    // ========================================================================
    // Feasibility
    // ========================================================================

    /// Every pump runs in at least one shift
    pub fn runs_every_pump(&self) -> bool {
        self.grid.iter().all(|row| row.contains(&1))
    }

    /// No shift runs more than `max_concurrent` pumps
    pub fn respects_concurrency(&self, max_concurrent: i64) -> bool {
        (0..self.shifts.len()).all(|t| self.pumps_in_shift(t) as i64 <= max_concurrent)
    }

    /// Total flow equals demand
    pub fn meets_demand(&self, demand: i64) -> bool {
        self.total_flow == demand
    }

    /// All three constraints hold
    pub fn is_feasible(&self, problem: &PumpProblem) -> bool {
        self.runs_every_pump()
            && self.respects_concurrency(problem.max_concurrent)
            && self.meets_demand(problem.demand)
    }

    /// Tab-separated report
    pub fn render(&self) -> String {
        let mut out = String::from("\n");
        for shift in &self.shifts {
            out.push('\t');
            out.push_str(shift);
        }
        out.push('\n');

        for (p, row) in self.grid.iter().enumerate() {
            out.push_str(&format!("P{}", p));
            for x in row {
                out.push_str(&format!("\t{}", x));
            }
            out.push('\n');
        }

        out.push_str(&format!("\nTotal flow:\t {}\n", self.total_flow));
        out.push_str(&format!("\nTotal cost:\t {}\n", self.total_cost));
        out
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn optimal() -> Schedule {
        Schedule::from_grid(
            &PumpProblem::default(),
            vec![vec![0, 1], vec![1, 0], vec![0, 1], vec![0, 1]],
            135.0,
        )
        .unwrap()
    }

    #[test]
    fn test_totals() {
        let schedule = optimal();
        assert_eq!(schedule.total_flow(), 20);
        assert_eq!(schedule.total_cost(), 135);
        assert!(schedule.is_running(1, 0));
        assert!(!schedule.is_running(1, 1));
        assert!(!schedule.is_running(9, 0));
        assert_eq!(schedule.pumps_in_shift(1), 3);
    }

    #[test]
    fn test_feasibility() {
        let problem = PumpProblem::default();
        assert!(optimal().is_feasible(&problem));

        let idle_pump = Schedule::from_grid(
            &problem,
            vec![vec![0, 0], vec![1, 1], vec![0, 1], vec![0, 1]],
            0.0,
        )
        .unwrap();
        assert!(!idle_pump.runs_every_pump());

        let crowded = Schedule::from_grid(
            &problem,
            vec![vec![0, 1], vec![0, 1], vec![0, 1], vec![0, 1]],
            0.0,
        )
        .unwrap();
        assert!(crowded.runs_every_pump());
        assert!(!crowded.respects_concurrency(3));
        assert!(crowded.meets_demand(20));
        assert!(!crowded.is_feasible(&problem));
    }

    #[test]
    fn test_render_exact() {
        let expected = "\n\tAM\tPM\n\
                        P0\t0\t1\n\
                        P1\t1\t0\n\
                        P2\t0\t1\n\
                        P3\t0\t1\n\
                        \nTotal flow:\t 20\n\
                        \nTotal cost:\t 135\n";
        assert_eq!(optimal().render(), expected);
        assert_eq!(optimal().to_string(), expected);
    }

    #[test]
    fn test_bad_grid() {
        let problem = PumpProblem::default();
        assert!(Schedule::from_grid(&problem, vec![vec![0, 1]], 0.0).is_err());
        assert!(Schedule::from_grid(
            &problem,
            vec![vec![0, 2], vec![1, 0], vec![0, 1], vec![0, 1]],
            0.0
        )
        .is_err());
    }
}
