//! Raw asset copying.
//!
//! `.html` files under the template root that are not partials are copied
//! to the same relative path under the output root without evaluation.

use crate::{
    build::report::Outcome,
    log,
    templates::discover_raw_assets,
    utils::fs::{slash_path, write_atomic},
};
use std::{fs, io, path::Path};

/// Copy every raw asset under `templates_root` into `output_root`.
///
/// Existing destination files are replaced. One outcome per asset.
pub fn copy_raw_assets(templates_root: &Path, output_root: &Path) -> Vec<Outcome<io::Error>> {
    discover_raw_assets(templates_root)
        .iter()
        .map(|rel| {
            let source = templates_root.join(rel);
            let dest = output_root.join(rel);
            let name = slash_path(rel);
            match copy_one(&source, &dest) {
                Ok(()) => {
                    log!("assets"; "{name}");
                    Outcome::ok(&source, Some(dest))
                }
                Err(e) => {
                    log!("error"; "copy {name}: {e}");
                    Outcome::failed(&source, Some(dest), e)
                }
            }
        })
        .collect()
}

fn copy_one(source: &Path, dest: &Path) -> io::Result<()> {
    let bytes = fs::read(source)?;
    write_atomic(dest, &bytes)
}
