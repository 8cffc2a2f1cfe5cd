//! ASCII rendering of a heightmap for terminals.
//!
//! Each character shades the mean elevation of a square block of grid
//! vertices, so a 1024x1024 map fits a normal terminal. Built on demand from
//! `&Heightmap`, no systems involved.

use crate::heightmap::Heightmap;

/// Shading ramp from lowest to highest elevation.
pub const ELEVATION_RAMP: &[u8] = b" .:-=+*#%@";

/// Map an elevation to its ramp character, scaled to `max` so that the
/// highest point in the map always uses the densest glyph.
pub fn elevation_char(value: u8, max: u8) -> char {
    if max == 0 {
        return ELEVATION_RAMP[0] as char;
    }
    let last = ELEVATION_RAMP.len() - 1;
    let idx = (value as usize * last + max as usize / 2) / max as usize;
    ELEVATION_RAMP[idx.min(last)] as char
}

/// Side length, in grid vertices, of the block each character covers when
/// the map is squeezed into `columns` characters.
pub fn block_size(width: usize, columns: usize) -> usize {
    width.div_ceil(columns.max(1)).max(1)
}

/// Render `heightmap` at most `columns` characters wide, with row labels and
/// a one-line legend.
pub fn build_preview(heightmap: &Heightmap, columns: usize) -> String {
    let block = block_size(heightmap.width(), columns);
    let max = heightmap.max_height();
    let rows = heightmap.height().div_ceil(block);
    let cols = heightmap.width().div_ceil(block);

    let mut lines: Vec<String> = Vec::with_capacity(rows + 2);
    for row in 0..rows {
        let gy = row * block;
        let mut line = if row % 8 == 0 {
            format!("{gy:>5} | ")
        } else {
            "      | ".to_string()
        };
        for col in 0..cols {
            let mean = block_mean(heightmap, col * block, gy, block);
            line.push(elevation_char(mean, max));
        }
        lines.push(line);
    }

    lines.push(String::new());
    lines.push(format!(
        "{}x{} vertices, {block}x{block} per char, ramp \"{}\" up to elevation {max}",
        heightmap.width(),
        heightmap.height(),
        String::from_utf8_lossy(ELEVATION_RAMP),
    ));
    lines.join("\n")
}

fn block_mean(heightmap: &Heightmap, gx: usize, gy: usize, block: usize) -> u8 {
    let mut sum = 0u32;
    let mut count = 0u32;
    for y in gy..(gy + block).min(heightmap.height()) {
        for x in gx..(gx + block).min(heightmap.width()) {
            if let Some(v) = heightmap.get(x, y) {
                sum += v as u32;
                count += 1;
            }
        }
    }
    if count == 0 {
        0
    } else {
        (sum / count) as u8
    }
}
