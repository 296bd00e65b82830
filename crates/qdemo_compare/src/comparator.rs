//! Integer equality by XOR check-lines and a multi-controlled X
//!
//! Register layout for operands padded to `n` bits:
//!
//! ```text
//! 0   .. n     A bit-lines
//! n   .. 2n    B bit-lines
//! 2n  .. 3n    check-lines, A_i XOR B_i
//! 3n           output, 1 iff every check-line was 0
//! ```

use qdemo_backend::{Backend, SimulatorBackend};
use qdemo_core::{Bitstring, Circuit, CircuitBuilder, QdemoError, QdemoResult};
use serde::{Deserialize, Serialize};

/// Comparator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorConfig {
    /// Shots per comparison
    pub shots: u64,

    /// Minimum "1" count to declare the operands equal
    pub threshold: u64,

    /// Simulator seed
    pub seed: Option<u64>,
}

impl ComparatorConfig {
    /// Set shots
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Set the equality threshold
    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> QdemoResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate
    pub fn validate(&self) -> QdemoResult<()> {
        if self.shots == 0 {
            return Err(QdemoError::ZeroShots);
        }
        if self.threshold > self.shots {
            return Err(QdemoError::InvalidProblem(format!(
                "threshold {} exceeds shots {}",
                self.threshold, self.shots
            )));
        }
        Ok(())
    }
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            shots: 1024,
            threshold: 1000,
            seed: None,
        }
    }
}

/// Binary digits of `x`, most significant first; zero is `"0"`
pub fn num_to_bitstring(x: u64) -> Bitstring {
    Bitstring::from_value(x)
}

/// Both operands zero-padded on the high end to a common width
pub fn aligned_operands(a: u64, b: u64) -> (Bitstring, Bitstring) {
    let (bits_a, bits_b) = (num_to_bitstring(a), num_to_bitstring(b));
    let n = bits_a.len().max(bits_b.len());
    (bits_a.padded(n), bits_b.padded(n))
}

/// Equality circuit for `a` and `b` on `3n + 1` qubits and one classical bit
pub fn build_circuit(a: u64, b: u64) -> QdemoResult<Circuit> {
    let (bits_a, bits_b) = aligned_operands(a, b);
    let n = bits_a.len();

    let mut builder = CircuitBuilder::with_name(3 * n + 1, 1, format!("compare_{}_{}", a, b))
        .encode_bits(&bits_a, 0)
        .encode_bits(&bits_b, n)
        .barrier();

    for i in 0..2 * n {
        builder = builder.cnot(i, 2 * n + i % n);
    }

    builder
        .x_range(2 * n..3 * n)
        .mcx(2 * n..3 * n, 3 * n)
        .barrier()
        .measure(3 * n, 0)
        .build()
}

/// Runs equality circuits on a backend
pub struct Comparator<B: Backend> {
    backend: B,
    config: ComparatorConfig,
}

impl Comparator<SimulatorBackend> {
    /// Comparator on the ideal simulator
    pub fn simulator(config: ComparatorConfig) -> Self {
        let backend = SimulatorBackend::ideal().with_seed_opt(config.seed);
        Self { backend, config }
    }
}

impl<B: Backend> Comparator<B> {
    /// Comparator on any backend with default settings
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: ComparatorConfig::default(),
        }
    }

    /// Replace settings
    pub fn with_config(mut self, config: ComparatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Settings
    pub fn config(&self) -> &ComparatorConfig {
        &self.config
    }

    /// Underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether `a == b`, decided by measuring the output qubit.
    ///
    /// Equal iff at least `threshold` of `shots` read `1`. A result without
    /// any `1` outcome counts as zero.
    pub fn compare(&self, a: u64, b: u64) -> QdemoResult<bool> {
        self.config.validate()?;

        let circuit = build_circuit(a, b)?;
        let result = self.backend.execute(&circuit, self.config.shots)?;
        let ones = result.count("1");

        log::debug!(
            "compare({}, {}): {}/{} ones on {}",
            a,
            b,
            ones,
            self.config.shots,
            self.backend.name()
        );
        Ok(ones >= self.config.threshold)
    }
}

impl Default for Comparator<SimulatorBackend> {
    fn default() -> Self {
        Self::simulator(ComparatorConfig::default())
    }
}

/// Compare on the default simulator
pub fn compare(a: u64, b: u64) -> QdemoResult<bool> {
    Comparator::<SimulatorBackend>::default().compare(a, b)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qdemo_backend::ExecutionResult;
    use qdemo_core::{Counts, Gate};

    /// Backend that returns fixed counts regardless of the circuit
    struct FixedCounts(Vec<(&'static str, u64)>);

    impl Backend for FixedCounts {
        fn name(&self) -> &str {
            "fixed"
        }

        fn num_qubits(&self) -> usize {
            usize::MAX
        }

        fn execute(&self, _circuit: &Circuit, shots: u64) -> QdemoResult<ExecutionResult> {
            let counts: Counts = self.0.iter().map(|(k, v)| (k.to_string(), *v)).collect();
            Ok(ExecutionResult::new(counts, shots, "fixed"))
        }
    }

    #[test]
    fn test_bitstrings() {
        assert_eq!(num_to_bitstring(0).to_string(), "0");
        assert_eq!(num_to_bitstring(5).to_string(), "101");
        assert_eq!(num_to_bitstring(72).to_string(), "1001000");

        let (a, b) = aligned_operands(3, 6);
        assert_eq!(a.to_string(), "011");
        assert_eq!(b.to_string(), "110");
    }

    #[test]
    fn test_circuit_structure() {
        let circuit = build_circuit(5, 6).unwrap();
        let n = 3;

        assert_eq!(circuit.num_qubits(), 3 * n + 1);
        assert_eq!(circuit.num_clbits(), 1);
        assert_eq!(circuit.count_2q(), 2 * n);
        assert_eq!(circuit.count_multi(), 1);
        assert_eq!(circuit.measurements(), vec![(3 * n, 0)]);

        // 5 = 101 and 6 = 110 set four bit-lines; n more X on the check-lines
        let xs = circuit
            .gates()
            .iter()
            .filter(|g| matches!(g, Gate::X(_)))
            .count();
        assert_eq!(xs, 4 + n);

        let mcx = circuit.gates().iter().find_map(|g| match g {
            Gate::Mcx(controls, target) => Some((controls.clone(), *target)),
            _ => None,
        });
        assert_eq!(mcx, Some((vec![6, 7, 8], 9)));
    }

    #[test]
    fn test_cnot_pairing() {
        let circuit = build_circuit(1, 2).unwrap();
        let cnots: Vec<(usize, usize)> = circuit
            .gates()
            .iter()
            .filter_map(|g| match g {
                Gate::Cnot(c, t) => Some((*c, *t)),
                _ => None,
            })
            .collect();
        assert_eq!(cnots, vec![(0, 4), (1, 5), (2, 4), (3, 5)]);
    }

    #[test]
    fn test_compare_on_simulator() {
        let comparator = Comparator::simulator(ComparatorConfig::default().with_seed(42));

        assert!(comparator.compare(5, 5).unwrap());
        assert!(comparator.compare(0, 0).unwrap());
        assert!(!comparator.compare(5, 6).unwrap());
        assert!(!comparator.compare(0, 1).unwrap());
        // High-end padding: 3 = 011 and 6 = 110 differ
        assert!(!comparator.compare(3, 6).unwrap());
    }

    #[test]
    fn test_compare_eight_bit_operands() {
        // 200 needs 8 bits: 25 qubits
        assert!(compare(200, 200).unwrap());
        assert!(!compare(200, 201).unwrap());
        assert!(!compare(200, 72).unwrap());
    }

    #[test]
    fn test_missing_one_key_is_not_equal() {
        let comparator = Comparator::new(FixedCounts(vec![("0", 1024)]));
        assert!(!comparator.compare(1, 1).unwrap());
    }

    #[test]
    fn test_threshold_boundary() {
        let at = Comparator::new(FixedCounts(vec![("1", 1000), ("0", 24)]));
        assert!(at.compare(2, 2).unwrap());

        let below = Comparator::new(FixedCounts(vec![("1", 999), ("0", 25)]));
        assert!(!below.compare(2, 2).unwrap());
    }

    #[test]
    fn test_config_validation() {
        assert!(ComparatorConfig::default().validate().is_ok());
        assert!(ComparatorConfig::default().with_shots(0).validate().is_err());
        assert!(ComparatorConfig::default()
            .with_shots(100)
            .validate()
            .is_err());

        let config = ComparatorConfig::from_json(r#"{ "seed": 9 }"#).unwrap();
        assert_eq!(config.shots, 1024);
        assert_eq!(config.seed, Some(9));
    }
}
