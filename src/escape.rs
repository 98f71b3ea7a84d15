// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The membership test.  A point `c` of the complex plane belongs to
//! the Mandelbrot set when the orbit of `z ← z² + c`, started at zero,
//! never leaves the disc of radius 2.  We can only ever iterate a
//! finite number of times, so "never" becomes "not within `limit`
//! iterations," and every estimate built on this test slightly
//! overstates the true area as a result.

use num::Complex;

const D4: f64 = 1.0 / 4.0;
const D16: f64 = D4 / 4.0;

/// The two largest components of the set, the main cardioid and the
/// period-2 bulb centred on -1, have closed forms.  Points inside
/// either are members and cost nothing to classify; this is where
/// most of the interior of the set lives.
#[inline]
pub fn in_cardioid_or_bulb(c: Complex<f64>) -> bool {
    let y = c.im * c.im;
    let q = y + (c.re - D4) * (c.re - D4);
    q * (q + c.re - D4) <= y * D4 || (c.re + 1.0) * (c.re + 1.0) + y <= D16
}

/// This is our classic iterator function, which either returns the
/// iteration at which the orbit escaped, or nothing at all if it
/// stayed bounded for `limit` iterations.
#[inline]
pub fn escape_time(c: Complex<f64>, limit: usize) -> Option<usize> {
    let mut z = Complex::new(0.0_f64, 0.0_f64);
    for i in 0..limit {
        z = z * z + c;
        if z.norm_sqr() > 4.0 {
            return Some(i);
        }
    }
    None
}

/// True when `c` is counted as a member of the set at this
/// iteration limit.
#[inline]
pub fn is_member(c: Complex<f64>, limit: usize) -> bool {
    in_cardioid_or_bulb(c) || escape_time(c, limit).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_a_member() {
        assert!(is_member(Complex::new(0.0, 0.0), 100));
        assert!(in_cardioid_or_bulb(Complex::new(0.0, 0.0)));
    }

    #[test]
    fn shortcut_covers_cusp_and_bulb() {
        assert!(in_cardioid_or_bulb(Complex::new(0.25, 0.0)));
        assert!(in_cardioid_or_bulb(Complex::new(-1.0, 0.0)));
        assert!(in_cardioid_or_bulb(Complex::new(-1.2, 0.0)));
        assert!(!in_cardioid_or_bulb(Complex::new(-2.0, 0.0)));
        assert!(!in_cardioid_or_bulb(Complex::new(0.0, 1.0)));
        assert!(!in_cardioid_or_bulb(Complex::new(0.3, 0.0)));
    }

    #[test]
    fn tip_of_the_antenna_stays_bounded() {
        // -2 maps to 2 and then sits there with |z|² == 4
        assert_eq!(escape_time(Complex::new(-2.0, 0.0), 1000), None);
        assert!(is_member(Complex::new(-2.0, 0.0), 1000));
    }

    #[test]
    fn i_is_a_member() {
        assert_eq!(escape_time(Complex::new(0.0, 1.0), 1000), None);
    }

    #[test]
    fn one_escapes_on_the_third_iteration() {
        assert_eq!(escape_time(Complex::new(1.0, 0.0), 100), Some(2));
        assert!(!is_member(Complex::new(1.0, 0.0), 100));
    }

    #[test]
    fn far_points_escape_immediately() {
        assert_eq!(escape_time(Complex::new(3.0, 3.0), 10), Some(0));
    }

    #[test]
    fn zero_limit_counts_everything() {
        assert_eq!(escape_time(Complex::new(1.0, 0.0), 0), None);
        assert!(is_member(Complex::new(10.0, 10.0), 0));
    }

    #[test]
    fn shortcut_agrees_with_iteration() {
        let mut re = -2.0;
        while re < 0.5 {
            let mut im = -1.25;
            while im < 1.25 {
                let c = Complex::new(re, im);
                if in_cardioid_or_bulb(c) {
                    assert_eq!(escape_time(c, 500), None, "{} escaped", c);
                }
                im += 0.05;
            }
            re += 0.05;
        }
    }
}
