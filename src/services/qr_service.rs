//! QR encoding of shareable links as inline PNG data URLs.

use base64::{Engine as _, engine::general_purpose};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;
use thiserror::Error;

/// Smallest edge of the rendered image, quiet zone included.
const MIN_DIMENSION: u32 = 200;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("cannot encode QR symbol: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("cannot write QR image: {0}")]
    Image(#[from] image::ImageError),
}

/// Render `text` as a QR code and return it as `data:image/png;base64,...`.
pub fn qr_data_url(text: &str) -> Result<String, QrError> {
    let png = qr_png(text)?;
    Ok(format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(png)
    ))
}

/// Render `text` as PNG bytes at error-correction level M with a quiet zone.
pub fn qr_png(text: &str) -> Result<Vec<u8>, QrError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M)?;
    let pixels = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(pixels).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Decode the first QR symbol found in PNG bytes.
    pub(crate) fn decode_png(png: &[u8]) -> String {
        let img = image::load_from_memory_with_format(png, ImageFormat::Png)
            .unwrap()
            .to_luma8();
        let (width, height) = img.dimensions();
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            width as usize,
            height as usize,
            |x, y| img.get_pixel(x as u32, y as u32)[0],
        );
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1, "expected exactly one QR symbol");
        let (_meta, content) = grids[0].decode().unwrap();
        content
    }

    /// Decode a `data:image/png;base64,...` URL.
    pub(crate) fn decode_data_url(data_url: &str) -> String {
        let encoded = data_url
            .strip_prefix("data:image/png;base64,")
            .expect("not a PNG data URL");
        let png = general_purpose::STANDARD.decode(encoded).unwrap();
        decode_png(&png)
    }

    #[test]
    fn data_url_round_trips_the_link() {
        let url = "https://project.supabase.co/storage/v1/object/public/shared/uploads/1700000000123.pdf";
        let data_url = qr_data_url(url).unwrap();
        assert!(data_url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_url(&data_url), url);
    }

    #[test]
    fn image_meets_minimum_size() {
        let png = qr_png("https://example.com/a").unwrap();
        let img = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
        assert!(img.width() >= MIN_DIMENSION);
        assert_eq!(img.width(), img.height());
    }

    #[test]
    fn oversized_payload_is_an_encode_error() {
        let too_long = "x".repeat(4000);
        assert!(matches!(qr_data_url(&too_long), Err(QrError::Encode(_))));
    }
}
