//! Pump problem → binary quadratic model
//!
//! One binary variable per (pump, shift). The objective is the running cost;
//! three constraint families are added as penalties:
//!
//! 1. every pump runs in at least one shift (`c1_pump_{p}`)
//! 2. at most `max_concurrent` pumps run in any shift (`c2_time_{t}`)
//! 3. total flow equals demand

use crate::config::PumpProblem;
use crate::schedule::Schedule;
use qdemo_bqm::{BinaryQuadraticModel, InequalityConstraint, Sampler, Term};
use qdemo_core::{QdemoError, QdemoResult};

/// Build the penalty model for a pump problem
pub fn build_bqm(problem: &PumpProblem) -> QdemoResult<BinaryQuadraticModel> {
    problem.validate()?;

    let pumps = 0..problem.num_pumps();
    let shifts = 0..problem.num_shifts();
    let mut bqm = BinaryQuadraticModel::new();

    // Objective
    for p in pumps.clone() {
        for t in shifts.clone() {
            bqm.add_variable(&problem.variable_label(p, t), problem.costs[p][t] as f64)?;
        }
    }

    // Every pump runs at least once per day
    for p in pumps.clone() {
        let terms: Vec<Term> = shifts
            .clone()
            .map(|t| (problem.variable_label(p, t), 1))
            .collect();
        let constraint = InequalityConstraint::new(format!("c1_pump_{}", p))
            .with_bounds(1, problem.num_shifts() as i64);
        bqm.add_linear_inequality_constraint(&terms, problem.run_once_multiplier, &constraint)?;
    }

    // At most `max_concurrent` pumps per shift
    for t in shifts.clone() {
        let terms: Vec<Term> = pumps
            .clone()
            .map(|p| (problem.variable_label(p, t), 1))
            .collect();
        let constraint = InequalityConstraint::new(format!("c2_time_{}", t))
            .with_constant(-problem.max_concurrent);
        bqm.add_linear_inequality_constraint(
            &terms,
            problem.concurrency_multiplier,
            &constraint,
        )?;
    }

    // Demand
    let terms: Vec<Term> = shifts
        .flat_map(|t| {
            pumps
                .clone()
                .map(move |p| (problem.variable_label(p, t), problem.flows[p]))
        })
        .collect();
    bqm.add_linear_equality_constraint(&terms, problem.demand_multiplier, -problem.demand)?;

    log::debug!("pump model: {}", bqm);
    Ok(bqm)
}

/// Encode, sample, and extract the lowest-energy schedule
pub fn solve(problem: &PumpProblem, sampler: &dyn Sampler) -> QdemoResult<Schedule> {
    let bqm = build_bqm(problem)?;

    log::info!(
        "sampling {} variables with {} ({} reads)",
        bqm.num_variables(),
        sampler.name(),
        problem.num_reads
    );
    let sampleset = sampler.sample(&bqm, problem.num_reads)?;

    let best = sampleset
        .first()
        .ok_or_else(|| QdemoError::BackendError("sampler returned no samples".to_string()))?;
    let schedule = Schedule::from_sample(problem, &best)?;

    if !schedule.is_feasible(problem) {
        log::warn!(
            "best sample violates constraints (energy {}, cost {})",
            schedule.energy(),
            schedule.total_cost()
        );
    }
    Ok(schedule)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn assignment(bqm: &BinaryQuadraticModel, on: &[&str]) -> HashMap<String, u8> {
        bqm.variables()
            .iter()
            .map(|v| (v.clone(), u8::from(on.contains(&v.as_str()))))
            .collect()
    }

    #[test]
    fn test_variables_and_slack() {
        let bqm = build_bqm(&PumpProblem::default()).unwrap();

        // 8 decisions, one slack per pump, two per shift
        assert_eq!(bqm.num_variables(), 16);
        for label in ["P0_AM", "P3_PM", "slack_c1_pump_2_0", "slack_c2_time_1_1"] {
            assert!(bqm.index_of(label).is_some(), "missing {}", label);
        }
        assert!(bqm.index_of("slack_c2_time_0_2").is_none());
    }

    #[test]
    fn test_optimal_schedule_energy() {
        let bqm = build_bqm(&PumpProblem::default()).unwrap();

        // P0 PM, P1 AM, P2 PM, P3 PM; c1 slacks absorb the spare shift,
        // AM runs one pump (slack 2), PM runs three (slack 0)
        let on = [
            "P0_PM",
            "P1_AM",
            "P2_PM",
            "P3_PM",
            "slack_c1_pump_0_0",
            "slack_c1_pump_1_0",
            "slack_c1_pump_2_0",
            "slack_c1_pump_3_0",
            "slack_c2_time_0_1",
        ];
        assert_relative_eq!(bqm.energy_of(&assignment(&bqm, &on)).unwrap(), 135.0);
    }

    #[test]
    fn test_demand_penalty() {
        let problem = PumpProblem::default();
        let bqm = build_bqm(&problem).unwrap();

        // All pumps off: each c1 penalty is 13 * (0 + s - 2)^2 >= 13,
        // demand penalty 28 * 20^2
        let off = assignment(&bqm, &[]);
        let energy = bqm.energy_of(&off).unwrap();
        assert!(energy >= 28.0 * 400.0);
    }

    #[test]
    fn test_invalid_problem_rejected() {
        let problem = PumpProblem::new().with_flows(vec![1]);
        assert!(build_bqm(&problem).is_err());
    }
}
