use anyhow::Result;
use photofolio_core::domain::Scope;
use photofolio_core::Gallery;

pub fn mv(gallery: &mut Gallery, id: &str, folder: &str) -> Result<()> {
    if gallery.move_to_folder(id, folder)? {
        println!("Moved photo {id} to \"{folder}\".");
    } else {
        println!("No photo with id {id}.");
    }
    Ok(())
}

pub fn rm(gallery: &mut Gallery, id: &str) -> Result<()> {
    if gallery.delete_one(id)? {
        println!("Deleted photo {id}.");
    } else {
        println!("No photo with id {id}.");
    }
    Ok(())
}

/// Bulk delete is irreversible, so without `--yes` this only reports what
/// would be removed.
pub fn clear(gallery: &mut Gallery, scope: &Scope, yes: bool) -> Result<()> {
    if !yes {
        let matching = gallery.filter("", scope).len();
        println!(
            "This would delete {matching} photo(s) in scope \"{scope}\". Re-run with --yes to confirm."
        );
        return Ok(());
    }

    let removed = gallery.delete_all_matching(scope)?;
    println!("Deleted {removed} photo(s) in scope \"{scope}\".");
    Ok(())
}
