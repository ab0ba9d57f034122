use chrono::NaiveDate;
use image::RgbImage;

use crate::domain::{AspectClass, PhotoRecord, ARCHIVE_FOLDER, FAVORITES_FOLDER};
use crate::ingest;

/// Demo content shown on first run, before the user has uploaded anything.
/// Nine records spanning several folders and aspect classes, each carrying
/// a small generated thumbnail so the set is fully self-contained.
pub fn demo_photos() -> Vec<PhotoRecord> {
    let entries: [(&str, &str, &str, (u32, u32), (u8, u8, u8), Option<AspectClass>); 9] = [
        ("1", "Sunset over the sea", "Nature", (96, 64), (220, 120, 60), Some(AspectClass::Landscape)),
        ("2", "Mountain ridge", "Nature", (96, 54), (90, 130, 180), Some(AspectClass::Wide)),
        ("3", "Portrait of a girl", "Portraits", (64, 96), (200, 170, 150), Some(AspectClass::Portrait)),
        ("4", "City skyline", "City", (96, 32), (70, 80, 110), Some(AspectClass::Panorama)),
        ("5", "Architecture", "City", (64, 64), (150, 150, 160), Some(AspectClass::Square)),
        ("6", "Macro dewdrop", "Macro", (80, 64), (60, 160, 90), Some(AspectClass::Instant)),
        ("7", "Evening boulevard", FAVORITES_FOLDER, (96, 41), (120, 70, 140), Some(AspectClass::Cinema)),
        ("8", "Forest trail", "Nature", (64, 64), (50, 110, 60), None),
        ("9", "Old negatives", ARCHIVE_FOLDER, (64, 64), (110, 100, 90), Some(AspectClass::Square)),
    ];

    let mut day = 26u32;
    entries
        .iter()
        .map(|(id, name, folder, (w, h), (r, g, b), aspect)| {
            let date = NaiveDate::from_ymd_opt(2025, 4, day).unwrap_or_default();
            day -= 1;
            PhotoRecord {
                id: (*id).to_string(),
                name: (*name).to_string(),
                image_data: placeholder(*w, *h, *r, *g, *b),
                folder: (*folder).to_string(),
                date,
                aspect: *aspect,
            }
        })
        .collect()
}

/// Gradient placeholder thumbnail, encoded through the same JPEG path as
/// ingested photos.
fn placeholder(w: u32, h: u32, r: u8, g: u8, b: u8) -> String {
    let img = RgbImage::from_fn(w, h, |x, y| {
        image::Rgb([
            r.wrapping_add((x * 2) as u8),
            g.wrapping_add((y * 2) as u8),
            b.wrapping_add((x + y) as u8),
        ])
    });
    ingest::encode_jpeg(&img)
        .map(|jpeg| ingest::to_data_url(&jpeg))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_demo_seed_has_nine_records() {
        assert_eq!(demo_photos().len(), 9);
    }

    #[test]
    fn test_demo_seed_ids_unique() {
        let photos = demo_photos();
        let ids: HashSet<&str> = photos.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), photos.len());
    }

    #[test]
    fn test_demo_seed_payloads_inline() {
        for photo in demo_photos() {
            assert!(
                photo.image_data.starts_with("data:image/jpeg;base64,"),
                "photo {} has no inline payload",
                photo.id
            );
            assert!(!photo.folder.is_empty());
        }
    }

    #[test]
    fn test_demo_seed_covers_reserved_folders() {
        let photos = demo_photos();
        assert!(photos.iter().any(|p| p.folder == FAVORITES_FOLDER));
        assert!(photos.iter().any(|p| p.folder == ARCHIVE_FOLDER));
    }

    #[test]
    fn test_demo_seed_includes_untagged_record() {
        assert!(demo_photos().iter().any(|p| p.aspect.is_none()));
    }

    #[test]
    fn test_demo_seed_deterministic() {
        assert_eq!(demo_photos(), demo_photos());
    }
}
