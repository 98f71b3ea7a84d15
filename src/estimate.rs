//! The result of a run, and the trait both estimators implement.

use crate::error::AreaError;
use std::fmt;
use std::str::FromStr;

/// The way an estimator chooses the points it tests.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    /// Test the centre of every cell of a regular grid.
    Grid,
    /// Test uniformly distributed random points.
    MonteCarlo,
}

impl Method {
    /// Names accepted by `--method`.
    pub const NAMES: &'static [&'static str] = &["grid", "montecarlo"];
}

impl FromStr for Method {
    type Err = AreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Method::Grid),
            "montecarlo" | "monte-carlo" | "mc" => Ok(Method::MonteCarlo),
            other => Err(AreaError::InvalidArgument(format!(
                "unknown method {:?}, expected one of {}",
                other,
                Method::NAMES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Method::Grid => write!(f, "grid"),
            Method::MonteCarlo => write!(f, "montecarlo"),
        }
    }
}

/// How many of the tested points were members, out of how many, and
/// over how large a rectangle.  Everything else is derived.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Estimate {
    /// How the points were chosen.
    pub method: Method,
    /// Points tested.
    pub samples: u64,
    /// Points counted as members.
    pub inside: u64,
    /// Area of the region the points came from.
    pub region_area: f64,
}

impl Estimate {
    /// Fraction of tested points that were members; zero when nothing
    /// was tested.
    pub fn fraction(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            (self.inside as f64) / (self.samples as f64)
        }
    }

    /// The estimated area of the set inside the region.
    pub fn area(&self) -> f64 {
        self.region_area * self.fraction()
    }

    /// One standard deviation of the Monte-Carlo estimate, treating
    /// each sample as a Bernoulli trial.  Grid counts are not random,
    /// so they have none.
    pub fn std_error(&self) -> Option<f64> {
        match self.method {
            Method::Grid => None,
            Method::MonteCarlo if self.samples == 0 => None,
            Method::MonteCarlo => {
                let p = self.fraction();
                Some(self.region_area * (p * (1.0 - p) / (self.samples as f64)).sqrt())
            }
        }
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "method={} samples={} inside={} area={:.8}",
            self.method,
            self.samples,
            self.inside,
            self.area()
        )?;
        if let Some(err) = self.std_error() {
            write!(f, " stderr={:.8}", err)?;
        }
        Ok(())
    }
}

/// Anything that can produce an area estimate using some number of
/// worker threads.
pub trait Estimator {
    /// The method this estimator implements.
    fn method(&self) -> Method;
    /// Runs the estimate on `threads` workers; zero is an error.
    fn estimate(&self, threads: usize) -> Result<Estimate, AreaError>;
}
