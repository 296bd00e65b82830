//! Linear constraint encoding
//!
//! Constraints become quadratic penalties scaled by a Lagrange multiplier.
//! Equalities add `λ (Σ a_i x_i + c)²`; inequalities add slack variables
//! first and then encode the resulting equality.

use crate::model::{BinaryQuadraticModel, Term};
use qdemo_core::{QdemoError, QdemoResult};
use serde::{Deserialize, Serialize};

/// Slack variable encoding for inequality constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlackMethod {
    /// Powers of two plus a remainder coefficient
    #[default]
    Log2,
    /// Nine copies of each lower power of ten, topped up with the leading power
    Log10,
    /// One unit slack variable per value of the range
    Linear,
}

/// Bounds and labelling of `lb ≤ Σ a_i x_i + constant ≤ ub`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InequalityConstraint {
    /// Label used to name slack variables
    pub label: String,

    /// Constant added to the left-hand side
    pub constant: i64,

    /// Lower bound (unbounded by default)
    pub lb: i64,

    /// Upper bound (0 by default)
    pub ub: i64,

    /// Slack encoding
    pub slack_method: SlackMethod,
}

impl InequalityConstraint {
    /// `Σ a_i x_i ≤ 0` with the given label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            constant: 0,
            lb: i64::MIN,
            ub: 0,
            slack_method: SlackMethod::Log2,
        }
    }

    /// Set both bounds
    pub fn with_bounds(mut self, lb: i64, ub: i64) -> Self {
        self.lb = lb;
        self.ub = ub;
        self
    }

    /// Set the left-hand side constant
    pub fn with_constant(mut self, constant: i64) -> Self {
        self.constant = constant;
        self
    }

    /// Set the slack encoding
    pub fn with_slack_method(mut self, method: SlackMethod) -> Self {
        self.slack_method = method;
        self
    }
}

/// Coefficients whose subset sums cover exactly `0..=range`
pub fn slack_coefficients(range: i64, method: SlackMethod) -> Vec<i64> {
    if range <= 0 {
        return Vec::new();
    }
    match method {
        SlackMethod::Log2 => {
            let k = 63 - range.leading_zeros() as i64;
            let mut coefficients: Vec<i64> = (0..k).map(|j| 1i64 << j).collect();
            coefficients.push(range - (1i64 << k) + 1);
            coefficients
        }
        SlackMethod::Log10 => {
            let mut k = 0u32;
            while 10i64.pow(k + 1) <= range {
                k += 1;
            }
            let mut coefficients: Vec<i64> = (0..k)
                .flat_map(|j| std::iter::repeat(10i64.pow(j)).take(9))
                .collect();
            let lead = 10i64.pow(k);
            let mut remainder = range - (lead - 1);
            while remainder > 0 {
                let c = remainder.min(lead);
                coefficients.push(c);
                remainder -= c;
            }
            coefficients
        }
        SlackMethod::Linear => vec![1; range as usize],
    }
}

impl BinaryQuadraticModel {
    /// Add `λ (Σ a_i x_i + constant)²` to the model
    pub fn add_linear_equality_constraint(
        &mut self,
        terms: &[Term],
        lagrange_multiplier: f64,
        constant: i64,
    ) -> QdemoResult<()> {
        let lm = lagrange_multiplier;
        let c = constant as f64;

        for (v, bias) in terms {
            let a = *bias as f64;
            self.add_variable(v, lm * (a * a + 2.0 * c * a))?;
        }
        for (i, (u, ubias)) in terms.iter().enumerate() {
            for (v, vbias) in &terms[i + 1..] {
                // Same-variable pairs fold into the linear bias
                self.add_quadratic(u, v, 2.0 * lm * (*ubias as f64) * (*vbias as f64))?;
            }
        }
        self.add_offset(lm * c * c);
        Ok(())
    }

    /// Add `lb ≤ Σ a_i x_i + constant ≤ ub` as a penalty with slack variables.
    ///
    /// Returns the slack terms that were added. A constraint that every
    /// assignment already satisfies adds nothing and returns no terms.
    pub fn add_linear_inequality_constraint(
        &mut self,
        terms: &[Term],
        lagrange_multiplier: f64,
        constraint: &InequalityConstraint,
    ) -> QdemoResult<Vec<Term>> {
        let terms_upper: i64 = terms.iter().map(|(_, a)| *a).filter(|a| *a > 0).sum();
        let terms_lower: i64 = terms.iter().map(|(_, a)| *a).filter(|a| *a < 0).sum();

        let ub_c = terms_upper.min(constraint.ub.saturating_sub(constraint.constant));
        let lb_c = terms_lower.max(constraint.lb.saturating_sub(constraint.constant));

        if terms_upper <= ub_c && terms_lower >= lb_c {
            log::warn!(
                "constraint '{}' is always satisfied and was not added",
                constraint.label
            );
            return Ok(Vec::new());
        }
        if ub_c < lb_c {
            return Err(QdemoError::InfeasibleConstraint {
                label: constraint.label.clone(),
                lb: lb_c,
                ub: ub_c,
            });
        }

        let slack_terms: Vec<Term> = slack_coefficients(ub_c - lb_c, constraint.slack_method)
            .into_iter()
            .enumerate()
            .map(|(j, a)| (format!("slack_{}_{}", constraint.label, j), a))
            .collect();

        log::debug!(
            "constraint '{}': {} terms, bounds [{}, {}], {} slack variables",
            constraint.label,
            terms.len(),
            lb_c,
            ub_c,
            slack_terms.len()
        );

        let mut all_terms = terms.to_vec();
        all_terms.extend(slack_terms.iter().cloned());
        self.add_linear_equality_constraint(&all_terms, lagrange_multiplier, -ub_c)?;

        Ok(slack_terms)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn terms(labels: &[&str], coefficient: i64) -> Vec<Term> {
        labels.iter().map(|l| (l.to_string(), coefficient)).collect()
    }

    /// Enumerate every assignment of the model
    fn all_assignments(n: usize) -> impl Iterator<Item = Vec<u8>> {
        (0..1u32 << n).map(move |bits| (0..n).map(|i| ((bits >> i) & 1) as u8).collect())
    }

    #[test]
    fn test_slack_coefficients_log2() {
        assert_eq!(slack_coefficients(0, SlackMethod::Log2), Vec::<i64>::new());
        assert_eq!(slack_coefficients(1, SlackMethod::Log2), vec![1]);
        assert_eq!(slack_coefficients(3, SlackMethod::Log2), vec![1, 2]);
        assert_eq!(slack_coefficients(4, SlackMethod::Log2), vec![1, 2, 1]);
        assert_eq!(slack_coefficients(10, SlackMethod::Log2), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_slack_coefficients_log10_and_linear() {
        assert_eq!(slack_coefficients(5, SlackMethod::Log10), vec![1; 5]);
        let c = slack_coefficients(25, SlackMethod::Log10);
        assert_eq!(c.len(), 11);
        assert_eq!(c.iter().sum::<i64>(), 25);
        assert_eq!(slack_coefficients(3, SlackMethod::Linear), vec![1, 1, 1]);
    }

    #[test]
    fn test_slack_sums_cover_range() {
        for method in [SlackMethod::Log2, SlackMethod::Log10, SlackMethod::Linear] {
            for range in 1..=30i64 {
                let coefficients = slack_coefficients(range, method);
                if coefficients.len() > 16 {
                    continue;
                }
                let mut reachable = vec![false; range as usize + 1];
                for mask in 0..1u32 << coefficients.len() {
                    let sum: i64 = coefficients
                        .iter()
                        .enumerate()
                        .filter(|(j, _)| mask & (1 << j) != 0)
                        .map(|(_, c)| c)
                        .sum();
                    assert!(sum <= range, "{:?} overshoots {}", method, range);
                    reachable[sum as usize] = true;
                }
                assert!(reachable.iter().all(|&r| r), "{:?} range {}", method, range);
            }
        }
    }

    #[test]
    fn test_equality_energy_matches_square() {
        let mut bqm = BinaryQuadraticModel::new();
        let t = vec![
            ("a".to_string(), 2),
            ("b".to_string(), 7),
            ("c".to_string(), 3),
        ];
        bqm.add_linear_equality_constraint(&t, 4.0, -9).unwrap();

        for x in all_assignments(3) {
            let lhs: i64 = t.iter().zip(&x).map(|((_, a), &v)| a * i64::from(v)).sum();
            let expected = 4.0 * ((lhs - 9) as f64).powi(2);
            assert_relative_eq!(bqm.energy(&x).unwrap(), expected);
        }
    }

    #[test]
    fn test_equality_repeated_variable() {
        let mut bqm = BinaryQuadraticModel::new();
        let t = vec![("a".to_string(), 1), ("a".to_string(), 1)];
        bqm.add_linear_equality_constraint(&t, 1.0, -2).unwrap();

        // (2a - 2)^2: zero at a = 1, four at a = 0
        assert_eq!(bqm.num_variables(), 1);
        assert_relative_eq!(bqm.energy(&[1]).unwrap(), 0.0);
        assert_relative_eq!(bqm.energy(&[0]).unwrap(), 4.0);
    }

    #[test]
    fn test_at_least_one_of_two() {
        let mut bqm = BinaryQuadraticModel::new();
        let slack = bqm
            .add_linear_inequality_constraint(
                &terms(&["x0", "x1"], 1),
                13.0,
                &InequalityConstraint::new("c1_pump_0").with_bounds(1, 2),
            )
            .unwrap();

        assert_eq!(slack, vec![("slack_c1_pump_0_0".to_string(), 1)]);
        assert_eq!(bqm.num_variables(), 3);

        // Minimum over slack is zero exactly when 1 <= x0 + x1 <= 2
        for x in all_assignments(2) {
            let best = [0u8, 1]
                .iter()
                .map(|&s| bqm.energy(&[x[0], x[1], s]).unwrap())
                .fold(f64::INFINITY, f64::min);
            let feasible = x[0] + x[1] >= 1;
            if feasible {
                assert_relative_eq!(best, 0.0);
            } else {
                assert_relative_eq!(best, 13.0);
            }
        }
    }

    #[test]
    fn test_at_most_three_of_four() {
        let mut bqm = BinaryQuadraticModel::new();
        let slack = bqm
            .add_linear_inequality_constraint(
                &terms(&["p0", "p1", "p2", "p3"], 1),
                1.0,
                &InequalityConstraint::new("c2_time_0").with_constant(-3),
            )
            .unwrap();

        let coefficients: Vec<i64> = slack.iter().map(|(_, a)| *a).collect();
        assert_eq!(coefficients, vec![1, 2]);

        // All four running: best penalty is (4 + 0 - 3)^2 = 1
        let best_all_on = all_assignments(2)
            .map(|s| bqm.energy(&[1, 1, 1, 1, s[0], s[1]]).unwrap())
            .fold(f64::INFINITY, f64::min);
        assert_relative_eq!(best_all_on, 1.0);

        // Three running: feasible with zero slack
        assert_relative_eq!(bqm.energy(&[1, 1, 1, 0, 0, 0]).unwrap(), 0.0);
    }

    #[test]
    fn test_always_satisfied_adds_nothing() {
        let mut bqm = BinaryQuadraticModel::new();
        let slack = bqm
            .add_linear_inequality_constraint(
                &terms(&["a", "b"], 1),
                5.0,
                &InequalityConstraint::new("loose").with_bounds(0, 2),
            )
            .unwrap();

        assert!(slack.is_empty());
        assert_eq!(bqm.num_variables(), 0);
    }

    #[test]
    fn test_infeasible_constraint() {
        let mut bqm = BinaryQuadraticModel::new();
        let result = bqm.add_linear_inequality_constraint(
            &terms(&["a", "b"], 1),
            1.0,
            &InequalityConstraint::new("impossible").with_bounds(3, 5),
        );

        assert!(matches!(
            result,
            Err(QdemoError::InfeasibleConstraint { .. })
        ));
    }
}
