// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Metrics collection for forgery simulation results.

use std::collections::HashMap;
use std::time::Duration;

/// Collects outcomes and latencies during a simulation.
#[derive(Debug, Default)]
pub struct AttackMetrics {
    /// Count of attempts by outcome
    outcomes: HashMap<Outcome, usize>,
    /// Latency samples (nanoseconds)
    latencies: Vec<u64>,
}

/// Possible outcomes for a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Accepted,
    MissingSignature,
    MalformedSignature,
    SignatureMismatch,
}

impl AttackMetrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attempt outcome.
    pub fn record(&mut self, outcome: Outcome, latency: Duration) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        self.latencies.push(latency.as_nanos() as u64);
    }

    /// Get total attempt count.
    pub fn total(&self) -> usize {
        self.outcomes.values().sum()
    }

    /// Get count for a specific outcome.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Get median latency in nanoseconds.
    pub fn median_latency_ns(&self) -> u64 {
        if self.latencies.is_empty() {
            return 0;
        }
        let mut sorted = self.latencies.clone();
        sorted.sort_unstable();
        sorted[sorted.len() / 2]
    }

    /// Generate a summary report.
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            total: self.total(),
            accepted: self.count(Outcome::Accepted),
            missing: self.count(Outcome::MissingSignature),
            malformed: self.count(Outcome::MalformedSignature),
            mismatched: self.count(Outcome::SignatureMismatch),
            median_latency_ns: self.median_latency_ns(),
        }
    }
}

/// Summary report of a simulation.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub total: usize,
    pub accepted: usize,
    pub missing: usize,
    pub malformed: usize,
    pub mismatched: usize,
    pub median_latency_ns: u64,
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Forgery Metrics Report ===")?;
        writeln!(f, "Total Attempts:    {}", self.total)?;
        writeln!(f, "Accepted:          {}", self.accepted)?;
        writeln!(f, "Missing:           {}", self.missing)?;
        writeln!(f, "Malformed:         {}", self.malformed)?;
        writeln!(f, "Mismatched:        {}", self.mismatched)?;
        writeln!(f, "Median Latency:    {} ns", self.median_latency_ns)?;
        Ok(())
    }
}
