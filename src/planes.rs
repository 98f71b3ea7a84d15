//! Contains the Region and PlaneMapper structs.  A Region is a
//! rectangle on the complex plane given by its leftlower and
//! rightupper corners; a PlaneMapper lays an integral grid with an
//! origin at 0,0 over a Region, so that every cell of the grid stands
//! for a small patch of the complex plane.
use crate::error::AreaError;
use num::Complex;

/// Describes the lower-left corner and upper-right corner of a
/// rectangle on the complex plane, treating the real part of each
/// value as the x-component and the imaginary part of each value as
/// the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    leftlower: Complex<f64>,
    rightupper: Complex<f64>,
}

impl Region {
    /// Constructor.  Both corners must be finite and the region must
    /// have a positive width and height.
    pub fn new(leftlower: Complex<f64>, rightupper: Complex<f64>) -> Result<Region, AreaError> {
        let finite = |c: Complex<f64>| c.re.is_finite() && c.im.is_finite();
        if !finite(leftlower) || !finite(rightupper) {
            return Err(AreaError::InvalidRegion(
                "corners must be finite numbers".to_string(),
            ));
        }

        if rightupper.re <= leftlower.re {
            return Err(AreaError::InvalidRegion(
                "the left lower corner is not to the left of the right upper corner".to_string(),
            ));
        }

        if rightupper.im <= leftlower.im {
            return Err(AreaError::InvalidRegion(
                "the left lower corner is not lower than the right upper corner".to_string(),
            ));
        }

        let region = Region {
            leftlower,
            rightupper,
        };
        if !region.width().is_finite() || !region.height().is_finite() || !region.area().is_finite()
        {
            return Err(AreaError::InvalidRegion(
                "the region is too large to measure".to_string(),
            ));
        }

        Ok(region)
    }

    /// The left lower corner, the smallest real and imaginary parts.
    pub fn leftlower(&self) -> Complex<f64> {
        self.leftlower
    }

    /// The right upper corner, the largest real and imaginary parts.
    pub fn rightupper(&self) -> Complex<f64> {
        self.rightupper
    }

    /// Extent along the real axis.
    pub fn width(&self) -> f64 {
        self.rightupper.re - self.leftlower.re
    }

    /// Extent along the imaginary axis.
    pub fn height(&self) -> f64 {
        self.rightupper.im - self.leftlower.im
    }

    /// Area of the rectangle, in square units of the complex plane.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

impl Default for Region {
    /// A box that holds the whole Mandelbrot set with a small margin.
    fn default() -> Self {
        Region {
            leftlower: Complex::new(-2.0, -1.25),
            rightupper: Complex::new(0.5, 1.25),
        }
    }
}

/// Describes the x, y of a cell in the integral grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Contains the definitions of two planes: an integral cartesian plane,
/// and a complex, real cartesian plane.  Maps cells of the one to
/// points inside the other.
#[derive(Debug)]
pub struct PlaneMapper {
    /// Columns of the integral plane.  The left-lower cell is assumed
    /// to be at 0,0.
    pub width: usize,
    /// Rows of the integral plane.
    pub height: usize,
    /// The rectangle of the complex plane the grid covers.
    pub region: Region,
    // Cells per unit of the complex plane, horizontally and vertically.
    grid_factors: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Lays a `width` x `height` grid over `region`; the
    /// grid must have at least one cell and its cell count must fit
    /// in a `usize`.
    pub fn new(width: usize, height: usize, region: Region) -> Result<PlaneMapper, AreaError> {
        if width == 0 || height == 0 {
            return Err(AreaError::InvalidGrid(format!(
                "grid must be at least 1x1, got {}x{}",
                width, height
            )));
        }

        if width.checked_mul(height).is_none() {
            return Err(AreaError::InvalidGrid(format!(
                "a {}x{} grid has too many cells",
                width, height
            )));
        }

        let grid_factors = (
            (width as f64) / region.width(),
            (height as f64) / region.height(),
        );

        Ok(PlaneMapper {
            width,
            height,
            region,
            grid_factors,
        })
    }

    /// The total number of cells in the integral grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True when the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Area of the complex plane covered by a single cell.
    pub fn cell_area(&self) -> f64 {
        1.0 / (self.grid_factors.0 * self.grid_factors.1)
    }

    /// Given a cell on the integral plane, return the complex number
    /// at the centre of the patch that cell covers.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let origin = self.region.leftlower();
        Complex::new(
            ((pixel.0 as f64 + 0.5) / self.grid_factors.0) + origin.re,
            ((pixel.1 as f64 + 0.5) / self.grid_factors.1) + origin.im,
        )
    }
}
