// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The single error type returned by everything in this crate.

use failure::Fail;
use std::io;

/// Everything that can go wrong between parsing the command line and
/// writing the result.
#[derive(Debug, Fail)]
pub enum AreaError {
    /// The complex region is empty, inverted, or not finite.
    #[fail(display = "invalid region: {}", _0)]
    InvalidRegion(String),

    /// The integral grid has a zero dimension.
    #[fail(display = "invalid grid: {}", _0)]
    InvalidGrid(String),

    /// A command line value could not be understood.
    #[fail(display = "invalid argument: {}", _0)]
    InvalidArgument(String),

    /// An estimate was requested with zero worker threads.
    #[fail(display = "at least one worker thread is required")]
    NoThreads,

    /// A worker thread panicked before returning its partial count.
    #[fail(display = "a worker thread panicked")]
    WorkerPanicked,

    /// Writing the membership image failed.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for AreaError {
    fn from(err: io::Error) -> Self {
        AreaError::Io(err)
    }
}
