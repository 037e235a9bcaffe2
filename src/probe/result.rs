use std::fmt;
use crate::Failure;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Success(u64),
    Failure(Failure),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProbeResult {
    pub target:  String,
    pub outcome: Outcome,
}

impl ProbeResult {
    pub fn new(target: &str, outcome: Outcome) -> Self {
        Self { target: target.to_owned(), outcome }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    pub fn failure(&self) -> Option<Failure> {
        match self.outcome {
            Outcome::Success(_) => None,
            Outcome::Failure(f) => Some(f),
        }
    }

    /// Round trip in nanoseconds, or `-1` for any failure.
    pub fn rtt_nanos(&self) -> i64 {
        match self.outcome {
            Outcome::Success(n) => n.min(i64::MAX as u64) as i64,
            Outcome::Failure(_) => -1,
        }
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "response took {} nanoseconds.", self.rtt_nanos())
    }
}
