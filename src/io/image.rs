//! PNG layer-sheet preview of a solution
//!
//! Every z-layer is drawn as a `length × width` tile, left to right from the
//! bottom layer up, separated by a one-cell gap. Empty cells stay transparent.

use crate::algorithm::solution::Solution;
use crate::io::configuration::PREVIEW_CELL_PIXELS;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

/// Distinct opaque color for a module index
///
/// Hues are spread by the golden angle so neighboring indices differ clearly.
pub fn module_color(module: usize) -> [u8; 4] {
    let hue = (module as f64 * 137.508).rem_euclid(360.0);
    let (r, g, b) = hsv_to_rgb(hue, 0.65, 0.9);
    [r, g, b, 255]
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> (u8, u8, u8) {
    let chroma = value * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = value - chroma;
    let to_byte = |channel: f64| ((channel + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}

/// Render the layer sheet of a solution
pub fn render_layers(solution: &Solution) -> RgbaImage {
    let [length, width, height] = solution.size().dims();
    let cell = PREVIEW_CELL_PIXELS;
    let layer_width = length as u32 * cell;
    let sheet_width = (layer_width + cell) * height as u32 - cell;
    let sheet_height = width as u32 * cell;

    let mut img = ImageBuffer::from_pixel(sheet_width, sheet_height, Rgba([0, 0, 0, 0]));
    for (coordinate, module) in solution.assigned() {
        let [x, y, z] = coordinate;
        let origin_x = z as u32 * (layer_width + cell) + x as u32 * cell;
        // Flip y so that the front row ends up at the bottom of the image
        let origin_y = (width - 1 - y) as u32 * cell;
        let color = Rgba(module_color(module));
        for dx in 0..cell {
            for dy in 0..cell {
                img.put_pixel(origin_x + dx, origin_y + dy, color);
            }
        }
    }
    img
}

/// Export the layer sheet of a solution as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The sheet would not fit into an image
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layers_as_png(solution: &Solution, output_path: &Path) -> Result<()> {
    let [length, width, height] = solution.size().dims();
    let pixels = (length + 1)
        .checked_mul(height)
        .and_then(|columns| columns.checked_mul(PREVIEW_CELL_PIXELS as usize));
    if pixels.is_none_or(|pixels| pixels > u32::MAX as usize) || width == 0 {
        return Err(invalid_parameter(
            "preview",
            &format!("{length}x{width}x{height}"),
            &"grid too large for a preview image",
        ));
    }

    let img = render_layers(solution);

    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
