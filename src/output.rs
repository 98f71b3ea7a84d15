//! Writes the grid membership map as a binary graymap.

use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use std::convert::TryFrom;
use std::fs::File;
use std::path::Path;

use crate::error::AreaError;

/// Writes `pixels`, one byte per cell in rows from the top, to
/// `outfile` as a `bounds.0` x `bounds.1` graymap.
pub fn write_image(outfile: &Path, pixels: &[u8], bounds: (usize, usize)) -> Result<(), AreaError> {
    let (width, height) = match (u32::try_from(bounds.0), u32::try_from(bounds.1)) {
        (Ok(width), Ok(height)) => (width, height),
        _ => {
            return Err(AreaError::InvalidGrid(format!(
                "a {}x{} image is too large to encode",
                bounds.0, bounds.1
            )))
        }
    };
    if Some(pixels.len()) != bounds.0.checked_mul(bounds.1) {
        return Err(AreaError::InvalidGrid(format!(
            "{} pixels do not fill a {}x{} image",
            pixels.len(),
            bounds.0,
            bounds.1
        )));
    }
    let output = File::create(outfile)?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
    encoder.encode(pixels, width, height, ColorType::Gray(8))?;
    Ok(())
}
