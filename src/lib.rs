#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot area estimator
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring and adding `c`, starting from zero,
//! never runs off to infinity.  Its boundary is a fractal, but its
//! area is finite, a little over 1.5, and no closed form for it is
//! known.  It has to be estimated numerically.
//!
//! Two estimators are provided.  The grid estimator tests the centre
//! of every cell of a regular grid laid over a region; the
//! Monte-Carlo estimator tests uniformly random points.  Both count
//! members, multiply the member fraction by the area of the region,
//! and spread the work over scoped worker threads that each keep a
//! private tally, summed once every worker has finished.

extern crate crossbeam;
extern crate image;
extern crate num;
extern crate num_cpus;

pub mod config;
pub mod error;
pub mod escape;
pub mod estimate;
pub mod grid;
pub mod montecarlo;
pub mod output;
pub mod parse;
pub mod planes;

pub use config::{Config, Format};
pub use error::AreaError;
pub use estimate::{Estimate, Estimator, Method};
pub use grid::GridEstimator;
pub use montecarlo::MonteCarloEstimator;
pub use planes::Region;

use log::info;
use std::time::Instant;

/// Runs one estimate as described by `config`, writing the membership
/// image first if one was asked for.
pub fn run(config: &Config) -> Result<Estimate, AreaError> {
    let (width, height) = config.size;

    if let Some(ref path) = config.image {
        let grid = GridEstimator::new(width, height, config.region, config.iterations)?;
        let pixels = grid.membership_map(config.threads)?;
        output::write_image(path, &pixels, config.size)?;
        info!("wrote {}x{} membership map to {}", width, height, path.display());
    }

    let estimator: Box<dyn Estimator> = match config.method {
        Method::Grid => Box::new(GridEstimator::new(
            width,
            height,
            config.region,
            config.iterations,
        )?),
        Method::MonteCarlo => Box::new(MonteCarloEstimator::new(
            config.region,
            config.samples,
            config.iterations,
            config.seed,
        )),
    };

    info!(
        "estimating with {} over {:?} using {} threads, {} iterations",
        estimator.method(),
        config.region,
        config.threads,
        config.iterations
    );
    let started = Instant::now();
    let estimate = estimator.estimate(config.threads)?;
    info!(
        "{} of {} samples inside after {:?}",
        estimate.inside,
        estimate.samples,
        started.elapsed()
    );
    Ok(estimate)
}
