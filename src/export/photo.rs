// src/export/photo.rs

use crate::errors::AppResult;
use image::codecs::jpeg::JpegEncoder;
use image::metadata::Orientation;
use image::{DynamicImage, ExtendedColorType, ImageDecoder, ImageEncoder, ImageReader};
use std::path::Path;

/// Widest photo column, in character units (15000 / 256).
pub const MAX_PHOTO_COLUMN_WIDTH: f64 = 15000.0 / 256.0;

/// A photo decoded, turned upright and re-encoded as JPEG.
#[derive(Debug, Clone)]
pub struct EmbeddedPhoto {
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl EmbeddedPhoto {
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f64 / self.height as f64
        }
    }
}

/// Column width that shows a photo of `aspect` ratio at `row_height` points.
pub fn photo_column_width(aspect: f64, row_height: f64) -> f64 {
    (row_height / 6.0 * aspect).min(MAX_PHOTO_COLUMN_WIDTH)
}

/// Decode `path`, apply its EXIF orientation and re-encode at `quality`.
/// Unreadable orientation metadata leaves the image as stored.
pub fn prepare_photo(path: &Path, quality: u8) -> AppResult<EmbeddedPhoto> {
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);

    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);

    let rgb = img.to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality.clamp(1, 100)).write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;

    Ok(EmbeddedPhoto {
        jpeg,
        width: rgb.width(),
        height: rgb.height(),
    })
}
