//! Metrics selectable from the command line.

use range_search::LpMetric;

/// The available metrics.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum Metric {
    #[clap(name = "manhattan")]
    Manhattan,
    #[clap(name = "euclidean")]
    Euclidean,
    #[clap(name = "chebyshev")]
    Chebyshev,
}

impl Metric {
    /// The library's selector for this metric.
    pub const fn lp_metric(self) -> LpMetric {
        match self {
            Self::Manhattan => LpMetric::Manhattan,
            Self::Euclidean => LpMetric::Euclidean,
            Self::Chebyshev => LpMetric::Chebyshev,
        }
    }
}
