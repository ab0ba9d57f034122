use anyhow::Result;
use photofolio_core::Gallery;

pub fn run(gallery: &Gallery) -> Result<()> {
    let folders = gallery.folders();
    if folders.is_empty() {
        println!("No folders yet — upload some photos first.");
        return Ok(());
    }

    let stats = gallery.stats();
    for folder in &folders {
        let count = stats.by_folder.get(folder).copied().unwrap_or(0);
        println!("{folder} ({count})");
    }
    Ok(())
}
