// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The deterministic estimator.  Lays a grid over the region, tests
//! the centre of every cell, and multiplies the member fraction by
//! the area of the region.  Doubling the resolution quarters the cell
//! area, so the error near the boundary falls off roughly with the
//! cell size; the iteration limit sets the floor below which more
//! resolution stops helping.

use crossbeam::thread::ScopedJoinHandle;
use log::debug;
use std::ops::Range;
use std::sync::{Arc, Mutex};

use crate::error::AreaError;
use crate::escape::is_member;
use crate::estimate::{Estimate, Estimator, Method};
use crate::planes::{Pixel, PlaneMapper, Region};

type RowQueue = Arc<Mutex<Range<usize>>>;

/// Takes a plane and a limit (the number of iterations to conduct
/// per-point) and counts the grid cells whose centres are members.
pub struct GridEstimator {
    plane: PlaneMapper,
    limit: usize,
}

impl GridEstimator {
    /// Requires the width and height of the grid, the region of the
    /// complex plane it covers, and the iteration limit.
    pub fn new(
        width: usize,
        height: usize,
        region: Region,
        limit: usize,
    ) -> Result<Self, AreaError> {
        let plane = PlaneMapper::new(width, height, region)?;
        Ok(GridEstimator { plane, limit })
    }

    fn count_row(&self, row: usize) -> u64 {
        (0..self.plane.width)
            .filter(|&column| {
                is_member(self.plane.pixel_to_point(&Pixel(column, row)), self.limit)
            })
            .count() as u64
    }

    fn map_row(&self, row: usize) -> Vec<u8> {
        (0..self.plane.width)
            .map(|column| {
                if is_member(self.plane.pixel_to_point(&Pixel(column, row)), self.limit) {
                    255
                } else {
                    0
                }
            })
            .collect()
    }

    /// Rows are handed out one at a time from a shared queue, so a
    /// worker that draws cheap rows far from the set simply draws
    /// more of them.  Results come back tagged with their row index,
    /// in no particular order.
    fn scan_rows<T, F>(&self, threads: usize, f: F) -> Result<Vec<(usize, T)>, AreaError>
    where
        T: Send,
        F: Fn(usize) -> T + Sync,
    {
        if threads == 0 {
            return Err(AreaError::NoThreads);
        }

        let rows: RowQueue = Arc::new(Mutex::new(0..self.plane.height));
        let f = &f;
        let partials = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Vec<(usize, T)>>> = (0..threads)
                .map(|worker| {
                    let rows = rows.clone();
                    spawner.spawn(move |_| {
                        let mut done = vec![];
                        loop {
                            let row = match rows.lock() {
                                Ok(mut rows) => rows.next(),
                                Err(_) => None,
                            };
                            match row {
                                Some(row) => done.push((row, f(row))),
                                None => {
                                    break;
                                }
                            }
                        }
                        debug!("grid worker {} scanned {} rows", worker, done.len());
                        done
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().map_err(|_| AreaError::WorkerPanicked))
                .collect::<Result<Vec<_>, AreaError>>()
        })
        .map_err(|_| AreaError::WorkerPanicked)??;

        Ok(partials.into_iter().flatten().collect())
    }

    /// One byte per cell, 255 for members and 0 otherwise, laid out
    /// as an image: the first row is the top of the region (the
    /// largest imaginary part).
    pub fn membership_map(&self, threads: usize) -> Result<Vec<u8>, AreaError> {
        let width = self.plane.width;
        let height = self.plane.height;
        let mut pixels = vec![0 as u8; self.plane.len()];
        for (row, values) in self.scan_rows(threads, |row| self.map_row(row))? {
            let top = (height - 1 - row) * width;
            pixels[top..top + width].copy_from_slice(&values);
        }
        Ok(pixels)
    }
}

impl Estimator for GridEstimator {
    fn method(&self) -> Method {
        Method::Grid
    }

    fn estimate(&self, threads: usize) -> Result<Estimate, AreaError> {
        let inside = self
            .scan_rows(threads, |row| self.count_row(row))?
            .into_iter()
            .map(|(_, count)| count)
            .sum();
        Ok(Estimate {
            method: Method::Grid,
            samples: self.plane.len() as u64,
            inside,
            region_area: self.plane.region.area(),
        })
    }
}
