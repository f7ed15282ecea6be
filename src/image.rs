//! Reader for LC-3 program images.
//!
//! An image file is a raw byte sequence: the first 16-bit big-endian word is
//! the origin address, every following big-endian word belongs at the next
//! consecutive memory address. Decoding always converts from big endian, no
//! matter what the host byte order is.

use crate::errors::LoadImageError;
use log::debug;
use std::fs;
use std::path::Path;

/// A decoded program image.
#[derive(Debug)]
pub struct Image {
    /// Memory address the payload is loaded at.
    pub origin: u16,
    /// Payload words in memory order.
    pub words: Vec<u16>,
}

/// Reads and decodes an image file.
///
/// # Errors
/// - the file cannot be read
/// - the file is shorter than the origin word or not a whole number of words
pub fn read_image(path: &Path) -> Result<Image, LoadImageError> {
    let bytes = fs::read(path).map_err(|error| LoadImageError::ImageNotReadable {
        file: path.display().to_string(),
        message: error.to_string(),
    })?;
    let image = parse_image(&bytes)?;
    debug!(
        "loaded {} words at origin {:#06X} from '{}'",
        image.words.len(),
        image.origin,
        path.display()
    );
    Ok(image)
}

fn parse_image(bytes: &[u8]) -> Result<Image, LoadImageError> {
    if bytes.len() % 2 != 0 {
        return Err(LoadImageError::ImageNotEvenSize(bytes.len() as u64));
    }
    if bytes.len() < 2 {
        return Err(LoadImageError::ImageMissingOrigin);
    }
    let origin = u16::from_be_bytes([bytes[0], bytes[1]]);
    let words = bytes[2..]
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    Ok(Image { origin, words })
}
