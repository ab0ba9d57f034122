use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use photofolio_core::domain::Scope;
use photofolio_core::Gallery;

pub fn run(gallery: &Gallery, search: &str, scope: &Scope) -> Result<()> {
    let photos = gallery.filter(search, scope);

    if photos.is_empty() {
        println!("No photos match.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID"),
        Cell::new("Name"),
        Cell::new("Folder"),
        Cell::new("Date"),
        Cell::new("Aspect"),
        Cell::new("Payload"),
    ]);

    for photo in &photos {
        let aspect = match photo.aspect {
            Some(class) => Cell::new(class.as_str()),
            None => Cell::new("\u{2014}").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(&photo.id),
            Cell::new(&photo.name),
            Cell::new(&photo.folder),
            Cell::new(photo.date),
            aspect,
            Cell::new(format_payload(photo.image_data.len())),
        ]);
    }

    println!("{table}");
    println!("{} photo(s)", photos.len());
    Ok(())
}

/// Inline payload size, counted over the encoded string.
fn format_payload(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    match bytes {
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{b} B"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_payload() {
        assert_eq!(format_payload(0), "0 B");
        assert_eq!(format_payload(1023), "1023 B");
        assert_eq!(format_payload(1024), "1.0 KB");
        assert_eq!(format_payload(1_572_864), "1.5 MB");
    }
}
