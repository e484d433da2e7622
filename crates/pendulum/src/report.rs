//! Plain-text rendering of energy time series
//!
//! Consumes `(t, Ep, Ek, E, label)` from a [`TimeSeries`] and renders an
//! energy table and drift summaries. Nothing here feeds back into the
//! simulation.

use core::fmt;

use crate::physics::math::Scalar;
use crate::simulation::TimeSeries;

/// Energy table sampled every `sample_every` rows.
///
/// The final sample is always printed so the end state of the run is
/// visible regardless of decimation.
pub struct EnergyTable<'a> {
    series: &'a TimeSeries,
    sample_every: usize,
}

impl<'a> EnergyTable<'a> {
    pub fn new(series: &'a TimeSeries, sample_every: usize) -> Self {
        Self {
            series,
            sample_every: sample_every.max(1),
        }
    }

    /// Indices of the rows that will be printed.
    pub fn row_indices(&self) -> Vec<usize> {
        let len = self.series.len();
        let mut indices: Vec<usize> = (0..len).step_by(self.sample_every).collect();
        if len > 0 && indices.last() != Some(&(len - 1)) {
            indices.push(len - 1);
        }
        indices
    }
}

impl fmt::Display for EnergyTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.series.label())?;
        writeln!(
            f,
            "{:>10}  {:>14}  {:>14}  {:>14}",
            "Time (s)", "Potential (J)", "Kinetic (J)", "Total (J)"
        )?;

        for index in self.row_indices() {
            let sample = &self.series.samples()[index];
            writeln!(
                f,
                "{:>10.3}  {:>14.6}  {:>14.6}  {:>14.6}",
                sample.time, sample.energy.potential, sample.energy.kinetic, sample.energy.total
            )?;
        }

        Ok(())
    }
}

/// How far the total energy moved over one run.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftSummary {
    pub label: &'static str,
    pub integrator: &'static str,
    pub samples: usize,
    pub initial_energy: Scalar,
    pub final_energy: Scalar,
    /// `E_final − E_0` (J)
    pub drift: Scalar,
    /// `drift / E_0`, `None` when the run starts with zero energy
    pub relative_drift: Option<Scalar>,
    pub peak_deviation: Scalar,
    /// Drift of the first integral of the modelled motion (J)
    pub invariant_drift: Scalar,
    pub first_non_finite: Option<usize>,
}

impl DriftSummary {
    pub fn from_series(series: &TimeSeries) -> Self {
        let initial_energy = series.initial().energy.total;
        let drift = series.energy_drift();

        Self {
            label: series.label(),
            integrator: series.integrator(),
            samples: series.len(),
            initial_energy,
            final_energy: series.last().energy.total,
            drift,
            relative_drift: (initial_energy != 0.0).then(|| drift / initial_energy),
            peak_deviation: series.peak_energy_deviation(),
            invariant_drift: series.invariant_drift(),
            first_non_finite: series.first_non_finite(),
        }
    }

    /// Summaries ordered from the smallest to the largest invariant drift.
    ///
    /// Diverged runs sort last.
    pub fn ranked(mut summaries: Vec<DriftSummary>) -> Vec<DriftSummary> {
        summaries.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));
        summaries
    }

    fn sort_key(&self) -> Scalar {
        if self.first_non_finite.is_some() || !self.invariant_drift.is_finite() {
            Scalar::INFINITY
        } else {
            self.invariant_drift.abs()
        }
    }
}

impl fmt::Display for DriftSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} samples, E0 = {:.6} J, E_final = {:.6} J, drift = {:+.3e} J",
            self.label,
            self.integrator,
            self.samples,
            self.initial_energy,
            self.final_energy,
            self.drift
        )?;

        if let Some(relative) = self.relative_drift {
            write!(f, " ({:+.3e} relative)", relative)?;
        }

        write!(
            f,
            ", peak deviation = {:.3e} J, invariant drift = {:+.3e} J",
            self.peak_deviation, self.invariant_drift
        )?;

        if let Some(index) = self.first_non_finite {
            write!(f, ", diverged at sample {index}")?;
        }

        Ok(())
    }
}

/// Side-by-side drift comparison of several runs.
pub struct Comparison(pub Vec<DriftSummary>);

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Energy drift comparison (best first):")?;
        for (rank, summary) in self.0.iter().enumerate() {
            writeln!(f, "  {}. {summary}", rank + 1)?;
        }
        Ok(())
    }
}
