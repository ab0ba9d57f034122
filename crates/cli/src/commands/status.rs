use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use photofolio_core::domain::MAX_PHOTOS;
use photofolio_core::Gallery;

pub fn run(gallery: &Gallery) -> Result<()> {
    let stats = gallery.stats();
    let folders = gallery.folders();

    println!();
    println!("  Photofolio Status");
    println!("  =================");
    println!();
    println!(
        "   Photos:  {:>5} / {}        Folders: {:>5}",
        stats.total,
        MAX_PHOTOS,
        folders.len()
    );

    let mut folder_table = Table::new();
    folder_table.load_preset(UTF8_FULL);
    folder_table.set_content_arrangement(ContentArrangement::Dynamic);
    folder_table.set_header(vec![Cell::new("Folder"), Cell::new("Photos")]);
    for folder in &folders {
        let count = stats.by_folder.get(folder).copied().unwrap_or(0);
        folder_table.add_row(vec![Cell::new(folder), Cell::new(count)]);
    }

    println!();
    println!("  Folders");
    println!("  -------");
    println!("{folder_table}");

    let mut aspect_table = Table::new();
    aspect_table.load_preset(UTF8_FULL);
    aspect_table.set_content_arrangement(ContentArrangement::Dynamic);
    aspect_table.set_header(vec![Cell::new("Aspect"), Cell::new("Photos")]);
    for (aspect, count) in &stats.by_aspect {
        aspect_table.add_row(vec![Cell::new(aspect), Cell::new(count)]);
    }

    println!();
    println!("  Aspects");
    println!("  -------");
    println!("{aspect_table}");

    println!();
    println!("  Run 'photofolio ls' to list the photos.");
    println!();

    Ok(())
}
