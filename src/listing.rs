use crate::error::{Error, Result};
use crate::path_display::PickerEntry;
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use std::path::Path;
use tracing::debug;

/// One-shot recursive listing for the nested directory pick. Not live: no
/// incremental query, a single static exclusion glob, capped during the
/// walk. Entries are sorted by path for stable display (the cap applies to
/// the walk order, not the sorted order).
pub fn list_directory(root: &Path, exclude_glob: &str, cap: usize) -> Result<Vec<PickerEntry>> {
    let mut overrides = OverrideBuilder::new(root);
    overrides
        .add(&format!("!{exclude_glob}"))
        .map_err(|source| Error::InvalidListingGlob {
            pattern: exclude_glob.to_string(),
            source,
        })?;
    let overrides = overrides
        .build()
        .map_err(|source| Error::InvalidListingGlob {
            pattern: exclude_glob.to_string(),
            source,
        })?;

    let walk = WalkBuilder::new(root)
        .standard_filters(false)
        .overrides(overrides)
        .build();

    let mut paths = Vec::new();
    for entry in walk {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(%err, "skipping unreadable listing entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|kind| kind.is_file()) {
            continue;
        }
        paths.push(entry.into_path());
        if paths.len() >= cap {
            debug!(cap, root = %root.display(), "listing truncated at cap");
            break;
        }
    }

    paths.sort();
    Ok(paths
        .iter()
        .map(|path| PickerEntry::from_listing(root, path))
        .collect())
}
