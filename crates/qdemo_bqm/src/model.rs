//! Binary quadratic model
//!
//! Energy over binary variables `x ∈ {0, 1}`:
//!
//! ```text
//! E(x) = offset + Σ h_i x_i + Σ_{i<j} J_ij x_i x_j
//! ```
//!
//! Variables are addressed by label and keep their insertion order.

use qdemo_core::{QdemoError, QdemoResult};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Linear term of a constraint: variable label and integer coefficient
pub type Term = (String, i64);

/// Binary quadratic model over labelled binary variables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinaryQuadraticModel {
    /// Variable labels in insertion order
    variables: Vec<String>,

    /// Label -> index
    index: HashMap<String, usize>,

    /// Linear biases, indexed like `variables`
    linear: Vec<f64>,

    /// Quadratic biases keyed by (lower index, higher index)
    quadratic: BTreeMap<(usize, usize), f64>,

    /// Constant energy offset
    offset: f64,
}

impl BinaryQuadraticModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Add a variable (if new) and add `bias` to its linear bias
    pub fn add_variable(&mut self, label: &str, bias: f64) -> QdemoResult<usize> {
        let idx = self.ensure_variable(label)?;
        self.linear[idx] += bias;
        Ok(idx)
    }

    /// Alias for [`add_variable`](Self::add_variable)
    pub fn add_linear(&mut self, label: &str, bias: f64) -> QdemoResult<usize> {
        self.add_variable(label, bias)
    }

    /// Add `bias` to the interaction between `u` and `v`.
    ///
    /// For binary variables `x·x = x`, so `u == v` adds to the linear bias.
    pub fn add_quadratic(&mut self, u: &str, v: &str, bias: f64) -> QdemoResult<()> {
        let ui = self.ensure_variable(u)?;
        let vi = self.ensure_variable(v)?;
        if ui == vi {
            self.linear[ui] += bias;
        } else {
            *self.quadratic.entry(ordered(ui, vi)).or_insert(0.0) += bias;
        }
        Ok(())
    }

    /// Add to the constant offset
    pub fn add_offset(&mut self, value: f64) {
        self.offset += value;
    }

    fn ensure_variable(&mut self, label: &str) -> QdemoResult<usize> {
        if label.is_empty() {
            return Err(QdemoError::InvalidLabel(label.to_string()));
        }
        if let Some(&idx) = self.index.get(label) {
            return Ok(idx);
        }
        let idx = self.variables.len();
        self.variables.push(label.to_string());
        self.index.insert(label.to_string(), idx);
        self.linear.push(0.0);
        Ok(idx)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of variables
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of stored interactions
    pub fn num_interactions(&self) -> usize {
        self.quadratic.len()
    }

    /// Variable labels in insertion order
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Index of a variable
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Linear bias of a variable
    pub fn linear(&self, label: &str) -> QdemoResult<f64> {
        self.index_of(label)
            .map(|idx| self.linear[idx])
            .ok_or_else(|| QdemoError::UnknownVariable(label.to_string()))
    }

    /// Quadratic bias between two variables (0 when they do not interact)
    pub fn quadratic(&self, u: &str, v: &str) -> QdemoResult<f64> {
        let ui = self
            .index_of(u)
            .ok_or_else(|| QdemoError::UnknownVariable(u.to_string()))?;
        let vi = self
            .index_of(v)
            .ok_or_else(|| QdemoError::UnknownVariable(v.to_string()))?;
        Ok(self.quadratic.get(&ordered(ui, vi)).copied().unwrap_or(0.0))
    }

    /// Constant offset
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Linear biases by index
    pub fn linear_biases(&self) -> &[f64] {
        &self.linear
    }

    /// Iterate interactions as `(i, j, bias)` with `i < j`
    pub fn interactions(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.quadratic.iter().map(|(&(i, j), &b)| (i, j, b))
    }

    /// Neighbour lists: for each variable, `(neighbour, bias)` pairs
    pub fn adjacency(&self) -> Vec<Vec<(usize, f64)>> {
        let mut adj = vec![Vec::new(); self.variables.len()];
        for (&(i, j), &bias) in &self.quadratic {
            adj[i].push((j, bias));
            adj[j].push((i, bias));
        }
        adj
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Energy of an assignment given in variable order
    pub fn energy(&self, values: &[u8]) -> QdemoResult<f64> {
        if values.len() != self.variables.len() {
            return Err(QdemoError::InvalidProblem(format!(
                "assignment has {} values, model has {} variables",
                values.len(),
                self.variables.len()
            )));
        }
        Ok(self.energy_unchecked(values))
    }

    /// Energy of an assignment keyed by label; every variable must be present
    pub fn energy_of(&self, assignment: &HashMap<String, u8>) -> QdemoResult<f64> {
        let values = self
            .variables
            .iter()
            .map(|v| {
                assignment
                    .get(v)
                    .copied()
                    .ok_or_else(|| QdemoError::UnknownVariable(v.clone()))
            })
            .collect::<QdemoResult<Vec<u8>>>()?;
        Ok(self.energy_unchecked(&values))
    }

    pub(crate) fn energy_unchecked(&self, values: &[u8]) -> f64 {
        let linear: f64 = self
            .linear
            .iter()
            .zip(values)
            .map(|(h, &x)| h * f64::from(x))
            .sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .filter_map(|(&(i, j), &b)| (values[i] != 0 && values[j] != 0).then_some(b))
            .sum();
        self.offset + linear + quadratic
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl fmt::Display for BinaryQuadraticModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BinaryQuadraticModel({} variables, {} interactions, offset={})",
            self.num_variables(),
            self.num_interactions(),
            self.offset
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
