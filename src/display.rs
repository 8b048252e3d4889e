// Console tables showing the 16-color palette of each file.
use itertools::Itertools;
use log::error;

use crate::{palette::Palette, ImageFile};

#[derive(Copy, Clone)]
pub enum PaletteFormat {
    Rgb,
    Data,
}

impl PaletteFormat {
    fn label(self) -> &'static str {
        match self {
            PaletteFormat::Rgb => "RGB",
            PaletteFormat::Data => "data",
        }
    }
}

pub fn print_palettes(files: &[ImageFile], format: PaletteFormat) {
    for line in render_palettes(files, format) {
        println!("{}", line);
    }
}

// One header line, one separator line, then one row per file. The name
// column is sized to the longest file name plus two spaces; a file whose
// palette cannot be read is reported and left out of the table.
fn render_palettes(files: &[ImageFile], format: PaletteFormat) -> Vec<String> {
    let width = files.iter().map(|f| f.name.len()).max().unwrap_or(0) + 2;
    let mut lines = vec![
        format!("{:<width$}Palette ({}):", "File:", format.label()),
        "-".repeat(width + 16 * 4),
    ];
    for file in files {
        let palette = match file.image.read_palette() {
            Ok(palette) => palette,
            Err(e) => {
                error!("Skipping {}: {}", file.name, e);
                continue;
            }
        };
        lines.push(format!(
            "{:<width$}{}",
            file.name,
            render_row(&palette, format)
        ));
    }
    lines
}

fn render_row(palette: &Palette, format: PaletteFormat) -> String {
    match format {
        PaletteFormat::Rgb => palette.colors.iter().map(|c| c.rgb_digits()).join(" "),
        PaletteFormat::Data => {
            format!(
                "dw ${}",
                palette.colors.iter().map(|c| c.grb_digits()).join(",$")
            )
        }
    }
}
