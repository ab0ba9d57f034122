use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::NaiveDate;
use fast_image_resize::{self as fir, images::Image as FirImage};
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

use crate::classify::{self, FallbackClassifier};
use crate::domain::{AspectClass, PhotoRecord, DEFAULT_FOLDER};
use crate::error::{Error, Result};

/// Longest edge allowed before a photo is downscaled.
pub const MAX_DIMENSION: u32 = 1200;

/// Quality factor for the re-encode every ingested image goes through.
pub const JPEG_QUALITY: u8 = 70;

/// One raw file handed to the pipeline.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Original filename, extension included.
    pub name: String,
    /// Raw file bytes as read from the source.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Run the pipeline for a single file: decode, clamp dimensions, re-encode,
/// classify, assemble. The re-encode is applied unconditionally: even
/// in-bounds images pay the quality cost so every stored payload has a
/// normalized size.
pub(crate) fn process_file(
    file: &UploadFile,
    folder: &str,
    format_override: Option<AspectClass>,
    fallback: &mut dyn FallbackClassifier,
    id: String,
    date: NaiveDate,
) -> Result<PhotoRecord> {
    let decoded = image::load_from_memory(&file.bytes)
        .map_err(|_| Error::UnreadableFile(file.name.clone()))?;
    let rgb = fit_within_bounds(decoded.to_rgb8())?;
    let jpeg = encode_jpeg(&rgb)?;

    let stem = display_name(&file.name);
    let aspect = classify::resolve(stem, format_override, fallback);

    let folder = folder.trim();
    Ok(PhotoRecord {
        id,
        name: stem.to_string(),
        image_data: to_data_url(&jpeg),
        folder: if folder.is_empty() {
            DEFAULT_FOLDER.to_string()
        } else {
            folder.to_string()
        },
        date,
        aspect,
    })
}

/// Display name: the filename truncated at its first dot.
pub(crate) fn display_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Downscale so both dimensions fit within [`MAX_DIMENSION`], preserving the
/// aspect ratio. In-bounds images pass through untouched; never upscales.
fn fit_within_bounds(rgb: RgbImage) -> Result<RgbImage> {
    let (w, h) = rgb.dimensions();
    if w <= MAX_DIMENSION && h <= MAX_DIMENSION {
        return Ok(rgb);
    }

    let scale = f64::from(MAX_DIMENSION) / f64::from(w.max(h));
    let tw = ((f64::from(w) * scale).round() as u32).max(1);
    let th = ((f64::from(h) * scale).round() as u32).max(1);

    let src = FirImage::from_vec_u8(w, h, rgb.into_raw(), fir::PixelType::U8x3)
        .map_err(|e| Error::Encode(e.to_string()))?;
    let mut dst = FirImage::new(tw, th, fir::PixelType::U8x3);
    fir::Resizer::new()
        .resize(&src, &mut dst, None)
        .map_err(|e| Error::Encode(e.to_string()))?;

    RgbImage::from_raw(tw, th, dst.buffer().to_vec())
        .ok_or_else(|| Error::Encode("resized buffer size mismatch".to_string()))
}

/// JPEG encode via libjpeg-turbo, falling back to the pure-Rust encoder if
/// the turbo path rejects the image.
#[cfg(feature = "turbojpeg")]
pub(crate) fn encode_jpeg(rgb: &RgbImage) -> Result<Vec<u8>> {
    if let Ok(buf) =
        turbojpeg::compress_image(rgb, i32::from(JPEG_QUALITY), turbojpeg::Subsamp::Sub2x2)
    {
        return Ok(buf.to_vec());
    }
    encode_jpeg_rust(rgb)
}

#[cfg(not(feature = "turbojpeg"))]
pub(crate) fn encode_jpeg(rgb: &RgbImage) -> Result<Vec<u8>> {
    encode_jpeg_rust(rgb)
}

fn encode_jpeg_rust(rgb: &RgbImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;
    Ok(out.into_inner())
}

/// Self-describing inline payload, decodable without any external file.
pub(crate) fn to_data_url(jpeg: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", BASE64.encode(jpeg))
}
