// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The random estimator.  Throws uniformly distributed darts at the
//! region and counts the ones that land in the set.  Unlike the grid
//! it has no preferred alignment with the boundary, and it comes
//! with an error bar.
//!
//! The samples are cut into fixed-size batches and every batch seeds
//! its own generator from the run seed and the batch number.  Which
//! worker happens to draw which batch therefore has no effect on the
//! points tested, and a run is reproducible for any thread count.

use crossbeam::thread::ScopedJoinHandle;
use log::debug;
use num::Complex;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};

use crate::error::AreaError;
use crate::escape::is_member;
use crate::estimate::{Estimate, Estimator, Method};
use crate::planes::Region;

/// Number of samples drawn from one generator.
pub const BATCH_SIZE: u64 = 16_384;

// Spreads batch numbers across the seed space.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// A batch of work: its index, used to derive the seed, and how many
/// samples to draw.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Batch(u64, u64);

struct Batches {
    next: u64,
    remaining: u64,
}

impl Iterator for Batches {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.remaining == 0 {
            return None;
        }
        let size = self.remaining.min(BATCH_SIZE);
        let batch = Batch(self.next, size);
        self.next += 1;
        self.remaining -= size;
        Some(batch)
    }
}

type BatchQueue = Arc<Mutex<Batches>>;

/// Samples a region of the complex plane uniformly.
struct Dart(Uniform<f64>, Uniform<f64>, StdRng);

impl Dart {
    fn new(region: &Region, seed: u64) -> Self {
        let (ll, ru) = (region.leftlower(), region.rightupper());
        Dart(
            Uniform::new(ll.re, ru.re),
            Uniform::new(ll.im, ru.im),
            StdRng::seed_from_u64(seed),
        )
    }

    fn throw(&mut self) -> Complex<f64> {
        let re = self.0.sample(&mut self.2);
        let im = self.1.sample(&mut self.2);
        Complex::new(re, im)
    }
}

/// The parameters of a Monte-Carlo run.  Once set, nothing here
/// changes.
pub struct MonteCarloEstimator {
    region: Region,
    samples: u64,
    limit: usize,
    seed: u64,
}

impl MonteCarloEstimator {
    /// Draws `samples` points from `region`, iterating each at most
    /// `limit` times, from generators derived from `seed`.
    pub fn new(region: Region, samples: u64, limit: usize, seed: u64) -> Self {
        MonteCarloEstimator {
            region,
            samples,
            limit,
            seed,
        }
    }

    fn batches(&self) -> Batches {
        Batches {
            next: 0,
            remaining: self.samples,
        }
    }

    fn count_batch(&self, batch: Batch) -> u64 {
        let mut dart = Dart::new(
            &self.region,
            self.seed ^ batch.0.wrapping_mul(SEED_STRIDE),
        );
        let mut inside = 0;
        for _ in 0..batch.1 {
            if is_member(dart.throw(), self.limit) {
                inside += 1;
            }
        }
        inside
    }
}

impl Estimator for MonteCarloEstimator {
    fn method(&self) -> Method {
        Method::MonteCarlo
    }

    fn estimate(&self, threads: usize) -> Result<Estimate, AreaError> {
        if threads == 0 {
            return Err(AreaError::NoThreads);
        }

        let batches: BatchQueue = Arc::new(Mutex::new(self.batches()));
        let partials = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<u64>> = (0..threads)
                .map(|worker| {
                    let batches = batches.clone();
                    spawner.spawn(move |_| {
                        let (mut inside, mut drawn) = (0, 0);
                        loop {
                            let batch = match batches.lock() {
                                Ok(mut batches) => batches.next(),
                                Err(_) => None,
                            };
                            match batch {
                                Some(batch) => {
                                    inside += self.count_batch(batch);
                                    drawn += 1;
                                }
                                None => {
                                    break;
                                }
                            }
                        }
                        debug!("monte-carlo worker {} drew {} batches", worker, drawn);
                        inside
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().map_err(|_| AreaError::WorkerPanicked))
                .collect::<Result<Vec<u64>, AreaError>>()
        })
        .map_err(|_| AreaError::WorkerPanicked)??;

        Ok(Estimate {
            method: Method::MonteCarlo,
            samples: self.samples,
            inside: partials.into_iter().sum(),
            region_area: self.region.area(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_AREA: f64 = 1.506_59;

    #[test]
    fn batches_cover_every_sample_once() {
        let estimator = MonteCarloEstimator::new(Region::default(), 2 * BATCH_SIZE + 5, 10, 0);
        let batches: Vec<Batch> = estimator.batches().collect();
        assert_eq!(
            batches,
            vec![Batch(0, BATCH_SIZE), Batch(1, BATCH_SIZE), Batch(2, 5)]
        );
    }

    #[test]
    fn no_samples_means_no_batches() {
        let estimator = MonteCarloEstimator::new(Region::default(), 0, 10, 0);
        assert_eq!(estimator.batches().count(), 0);
        let estimate = estimator.estimate(2).unwrap();
        assert_eq!(estimate.samples, 0);
        assert_eq!(estimate.area(), 0.0);
    }

    #[test]
    fn darts_land_inside_the_region() {
        let region = Region::new(Complex::new(-1.0, 2.0), Complex::new(-0.5, 3.0)).unwrap();
        let mut dart = Dart::new(&region, 7);
        for _ in 0..1000 {
            let c = dart.throw();
            assert!(c.re >= -1.0 && c.re < -0.5);
            assert!(c.im >= 2.0 && c.im < 3.0);
        }
    }

    #[test]
    fn default_region_is_close_to_the_known_area() {
        let estimator = MonteCarloEstimator::new(Region::default(), 200_000, 500, 42);
        let estimate = estimator.estimate(4).unwrap();
        assert!(
            (estimate.area() - KNOWN_AREA).abs() < 0.1,
            "estimated {}",
            estimate.area()
        );
        let err = estimate.std_error().unwrap();
        assert!(err > 0.0 && err < 0.02, "stderr {}", err);
    }

    #[test]
    fn thread_count_does_not_change_the_count() {
        let estimator = MonteCarloEstimator::new(Region::default(), 3 * BATCH_SIZE + 17, 200, 9);
        let single = estimator.estimate(1).unwrap();
        for threads in 2..6 {
            assert_eq!(estimator.estimate(threads).unwrap(), single);
        }
    }

    #[test]
    fn seed_drives_the_samples() {
        let a = MonteCarloEstimator::new(Region::default(), 50_000, 200, 1);
        let b = MonteCarloEstimator::new(Region::default(), 50_000, 200, 1);
        assert_eq!(a.estimate(2).unwrap(), b.estimate(3).unwrap());

        let region = Region::default();
        let first = |seed| Dart::new(&region, seed).throw();
        assert_eq!(first(1), first(1));
        assert_ne!(first(1), first(2));
    }

    #[test]
    fn zero_threads_is_an_error() {
        let estimator = MonteCarloEstimator::new(Region::default(), 10, 10, 0);
        assert!(estimator.estimate(0).is_err());
    }
}
