use std::fs;

use anyhow::{Context, Result};
use log::{error, info};

use crate::{ge5::Ge5Image, matching::match_palettes, palette::Palette, ImageFile};

// Reconciles every file after the first with the first file's palette. Each
// reconciled image is saved under the derived "-new" name, and the in-memory
// buffer is replaced so a later display pass shows the result. A subject
// file whose regions are out of bounds is skipped; the batch continues.
pub fn fix_palettes(files: &mut [ImageFile]) -> Result<()> {
    let (first, rest) = match files.split_first_mut() {
        Some(x) => x,
        None => return Ok(()),
    };
    let reference = first
        .image
        .read_palette()
        .with_context(|| format!("Reading reference palette from {}", first.name))?;

    for file in rest {
        let fixed = match reconcile(&file.image, &reference) {
            Ok(fixed) => fixed,
            Err(e) => {
                error!("Skipping {}: {}", file.name, e);
                continue;
            }
        };
        let out_name = output_name(&file.name);
        info!("Saving {}", out_name);
        fs::write(&out_name, &fixed.data).with_context(|| format!("Writing {}", out_name))?;
        file.image = fixed;
    }
    Ok(())
}

// Produces the reconciled copy of one image: pixels re-indexed through the
// slot mapping, palette rewritten to the reference colors. The input image
// is not modified.
fn reconcile(image: &Ge5Image, reference: &Palette) -> Result<Ge5Image> {
    let subject = image.read_palette()?;
    let mapping = match_palettes(&subject, reference);
    let mut fixed = image.clone();
    fixed.remap_pixels(&mapping)?;
    fixed.write_palette(reference, &mapping)?;
    Ok(fixed)
}

// "image.ge5" -> "image-new.ge5"; a name without a dot gets "-new" appended.
pub fn output_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) => format!("{}-new.{}", stem, ext),
        None => format!("{}-new", name),
    }
}
