// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command line definition and the validated run configuration built
//! from it.  Clap rejects malformed values up front; the cross-field
//! checks (corner ordering, for one) happen in `Config::from_matches`.

use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AreaError;
use crate::estimate::{Estimate, Method};
use crate::parse::{parse_complex, parse_pair, validate_pair, validate_range};
use crate::planes::Region;

const METHOD: &str = "method";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const SIZE: &str = "size";
const SAMPLES: &str = "samples";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const SEED: &str = "seed";
const IMAGE: &str = "image";
const FORMAT: &str = "format";
const VERBOSE: &str = "verbose";

const MAX_SAMPLES: u64 = 10_000_000_000;
const MAX_ITERATIONS: usize = 1_000_000;
// Largest grid side an image can be written for.
const MAX_SIDE: usize = u32::max_value() as usize;

/// How the result is written to standard output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    /// Just the area, suitable for scripts.
    Plain,
    /// `key=value` fields describing the whole estimate.
    Detail,
}

impl Format {
    /// Names accepted by `--format`.
    pub const NAMES: &'static [&'static str] = &["plain", "detail"];

    /// The line printed for `estimate`.
    pub fn render(&self, estimate: &Estimate) -> String {
        match self {
            Format::Plain => format!("{:.8}", estimate.area()),
            Format::Detail => estimate.to_string(),
        }
    }
}

impl FromStr for Format {
    type Err = AreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Format::Plain),
            "detail" => Ok(Format::Detail),
            other => Err(AreaError::InvalidArgument(format!(
                "unknown format {:?}",
                other
            ))),
        }
    }
}

/// Everything a run needs, already validated.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Which estimator to run.
    pub method: Method,
    /// The rectangle of the complex plane to measure.
    pub region: Region,
    /// Grid width and height, used by the grid method and the image.
    pub size: (usize, usize),
    /// Number of random points, used by the Monte-Carlo method.
    pub samples: u64,
    /// Iterations before a point is counted as a member.
    pub iterations: usize,
    /// Worker threads; must be at least one.
    pub threads: usize,
    /// Seed for the Monte-Carlo generators.
    pub seed: u64,
    /// Where to write the grid membership map, if anywhere.
    pub image: Option<PathBuf>,
    /// How to print the result.
    pub format: Format,
    /// Log at debug level rather than warn.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            method: Method::MonteCarlo,
            region: Region::default(),
            size: (1000, 1000),
            samples: 1_000_000,
            iterations: 2000,
            threads: num_cpus::get(),
            seed: 0,
            image: None,
            format: Format::Plain,
            verbose: false,
        }
    }
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, AreaError> {
    matches
        .value_of(name)
        .ok_or_else(|| AreaError::InvalidArgument(format!("missing value for --{}", name)))
}

fn number<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, AreaError> {
    let raw = value(matches, name)?;
    T::from_str(raw)
        .map_err(|_| AreaError::InvalidArgument(format!("could not parse --{} {:?}", name, raw)))
}

fn corner(matches: &ArgMatches, name: &str) -> Result<num::Complex<f64>, AreaError> {
    let raw = value(matches, name)?;
    parse_complex(raw)
        .ok_or_else(|| AreaError::InvalidArgument(format!("could not parse --{} {:?}", name, raw)))
}

impl Config {
    /// Builds a configuration from parsed command line arguments,
    /// checking what clap's per-value validators cannot.
    pub fn from_matches(matches: &ArgMatches) -> Result<Config, AreaError> {
        let defaults = Config::default();

        let region = Region::new(corner(matches, LEFTLOWER)?, corner(matches, RIGHTUPPER)?)?;
        let size = parse_pair(value(matches, SIZE)?, 'x')
            .ok_or_else(|| AreaError::InvalidArgument("could not parse grid size".to_string()))?;
        let threads = match matches.value_of(THREADS) {
            Some(_) => number(matches, THREADS)?,
            None => defaults.threads,
        };

        Ok(Config {
            method: value(matches, METHOD)?.parse()?,
            region,
            size,
            samples: number(matches, SAMPLES)?,
            iterations: number(matches, ITERATIONS)?,
            threads,
            seed: number(matches, SEED)?,
            image: matches.value_of(IMAGE).map(PathBuf::from),
            format: value(matches, FORMAT)?.parse()?,
            verbose: matches.is_present(VERBOSE),
        })
    }
}

fn validate_size(s: &str) -> Result<(), String> {
    match parse_pair::<usize>(s, 'x') {
        Some((w, h)) if w == 0 || h == 0 => Err("Grid size must be at least 1x1".to_string()),
        Some((w, h)) if w > MAX_SIDE || h > MAX_SIDE => Err(format!(
            "Grid width and height must be at most {}",
            MAX_SIDE
        )),
        Some((w, h)) if w.checked_mul(h).is_none() => Err("Grid has too many cells".to_string()),
        Some(_) => Ok(()),
        None => Err("Could not parse grid size, expected WIDTHxHEIGHT".to_string()),
    }
}

/// The `area` command line.
pub fn app<'a, 'b>() -> App<'a, 'b> {
    let max_threads = num_cpus::get();

    App::new("area")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Estimates the area of the Mandelbrot set")
        .arg(
            Arg::with_name(METHOD)
                .long(METHOD)
                .short("m")
                .takes_value(true)
                .possible_values(Method::NAMES)
                .default_value("montecarlo")
                .help("Estimation method"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,-1.25")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the region, as re,im"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0.5,1.25")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the region, as re,im"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1000x1000")
                .validator(|s| validate_size(&s))
                .help("Grid size for the grid method and the image, as WIDTHxHEIGHT"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .long(SAMPLES)
                .short("n")
                .takes_value(true)
                .default_value("1000000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_SAMPLES,
                        "Could not parse sample count",
                        &format!("Sample count must be between 1 and {}", MAX_SAMPLES),
                    )
                })
                .help("Number of random samples for the montecarlo method"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("2000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_ITERATIONS,
                        "Could not parse iteration count",
                        &format!("Iteration count must be between 1 and {}", MAX_ITERATIONS),
                    )
                })
                .help("Iterations before a point is counted as a member"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of worker threads [default: number of CPUs]"),
        )
        .arg(
            Arg::with_name(SEED)
                .long(SEED)
                .takes_value(true)
                .default_value("0")
                .validator(|s| {
                    u64::from_str(&s)
                        .map(|_| ())
                        .map_err(|_| "Could not parse seed".to_string())
                })
                .help("Seed for the montecarlo method"),
        )
        .arg(
            Arg::with_name(IMAGE)
                .long(IMAGE)
                .takes_value(true)
                .value_name("FILE")
                .help("Also write the grid membership map to FILE as a PGM image"),
        )
        .arg(
            Arg::with_name(FORMAT)
                .long(FORMAT)
                .short("f")
                .takes_value(true)
                .possible_values(Format::NAMES)
                .default_value("plain")
                .help("Output format"),
        )
        .arg(
            Arg::with_name(VERBOSE)
                .long(VERBOSE)
                .short("v")
                .help("Log progress to stderr"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Complex;

    fn config(args: &[&str]) -> Result<Config, AreaError> {
        let mut argv = vec!["area"];
        argv.extend_from_slice(args);
        let matches = app()
            .get_matches_from_safe(argv)
            .map_err(|e| AreaError::InvalidArgument(e.message))?;
        Config::from_matches(&matches)
    }

    #[test]
    fn defaults_match_the_default_config() {
        assert_eq!(config(&[]).unwrap(), Config::default());
    }

    #[test]
    fn every_flag_is_read() {
        let c = config(&[
            "-m", "grid", "-l", "-1,-1", "-r", "1,1", "-s", "20x10", "-n", "500", "-i", "300",
            "-t", "1", "--seed", "17", "--image", "out.pgm", "-f", "detail", "-v",
        ])
        .unwrap();
        assert_eq!(c.method, Method::Grid);
        assert_eq!(c.region.leftlower(), Complex::new(-1.0, -1.0));
        assert_eq!(c.region.rightupper(), Complex::new(1.0, 1.0));
        assert_eq!(c.size, (20, 10));
        assert_eq!(c.samples, 500);
        assert_eq!(c.iterations, 300);
        assert_eq!(c.threads, 1);
        assert_eq!(c.seed, 17);
        assert_eq!(c.image, Some(PathBuf::from("out.pgm")));
        assert_eq!(c.format, Format::Detail);
        assert!(c.verbose);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(config(&["-t", "0"]).is_err());
        assert!(config(&["-i", "0"]).is_err());
        assert!(config(&["-n", "0"]).is_err());
        assert!(config(&["-s", "0x10"]).is_err());
        assert!(config(&["-s", "4294967296x4294967296"]).is_err());
        assert!(config(&["-s", "4294967296x1"]).is_err());
        assert!(config(&["-m", "simpson"]).is_err());
        assert!(config(&["--seed", "-3"]).is_err());
    }

    #[test]
    fn oversized_grids_are_rejected_before_any_work() {
        assert!(validate_size("4294967295x1").is_ok());
        assert!(validate_size("4294967296x1").is_err());
        assert!(validate_size("1x4294967296").is_err());
        assert!(validate_size("1000x1000").is_ok());
    }

    #[test]
    fn unmeasurable_region_is_rejected() {
        match config(&["-l", "-1e308,-1", "-r", "1e308,1"]) {
            Err(AreaError::InvalidRegion(_)) => {}
            other => panic!("expected InvalidRegion, got {:?}", other),
        }
    }

    #[test]
    fn inverted_region_is_rejected() {
        match config(&["-l", "1,1", "-r", "-1,-1"]) {
            Err(AreaError::InvalidRegion(_)) => {}
            other => panic!("expected InvalidRegion, got {:?}", other),
        }
    }

    #[test]
    fn plain_format_is_just_the_area() {
        let estimate = Estimate {
            method: Method::Grid,
            samples: 4,
            inside: 1,
            region_area: 2.0,
        };
        assert_eq!(Format::Plain.render(&estimate), "0.50000000");
        assert!(Format::Detail.render(&estimate).starts_with("method=grid"));
    }
}
