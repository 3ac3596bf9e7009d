use anyhow::Result;
use std::path::Path;

/// Check that a dataset path exists and has an extension the loader reads.
pub fn validate_dataset_file(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("csv") | Some("tsv") | Some("data") => {}
        _ => anyhow::bail!(
            "Dataset must have a .csv, .tsv or .data extension: {}",
            path.display()
        ),
    }

    if !path.is_file() {
        anyhow::bail!("Dataset file does not exist: {}", path.display());
    }

    Ok(())
}
