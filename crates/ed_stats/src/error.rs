use std::fmt;

#[derive(Debug)]
pub enum StatsError {
    ThetaOutOfRange(f64),      // log-series parameter must be in (0, 1)
    EmptyDistribution,         // truncation left no support
    SubsampleTooLarge { m: u64, total: u64 },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::ThetaOutOfRange(theta) => {
                write!(f, "theta must be in the interval (0, 1), got {}", theta)
            }
            StatsError::EmptyDistribution => {
                write!(f, "Distribution has empty support")
            }
            StatsError::SubsampleTooLarge { m, total } => {
                write!(f, "Subsample size {} exceeds sample total {}", m, total)
            }
        }
    }
}

impl std::error::Error for StatsError {}
