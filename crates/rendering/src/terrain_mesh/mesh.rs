use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use simulation::config::{HEIGHT_SCALE, TERRAIN_EXTENT};
use simulation::heightmap::Heightmap;

/// Times the ground texture tiles across the plane on each axis.
pub const TEXTURE_REPEAT: f32 = 32.0;

/// Elevation colour stops, from the valley floor (0.0) to the highest peak
/// (1.0) of the map, in sRGB.
const ELEVATION_STOPS: [(f32, [f32; 3]); 4] = [
    (0.0, [0.20, 0.33, 0.14]),
    (0.45, [0.38, 0.52, 0.22]),
    (0.8, [0.50, 0.43, 0.33]),
    (1.0, [0.93, 0.93, 0.95]),
];

/// World coordinate of vertex `i` of `n` spread over `extent`, centred on 0.
pub fn axis_coord(i: usize, n: usize, extent: f32) -> f32 {
    if n <= 1 {
        return 0.0;
    }
    -extent * 0.5 + i as f32 * extent / (n - 1) as f32
}

/// Texture coordinate of vertex `i` of `n`, already multiplied by the repeat.
fn axis_uv(i: usize, n: usize) -> f32 {
    if n <= 1 {
        return 0.0;
    }
    i as f32 / (n - 1) as f32 * TEXTURE_REPEAT
}

/// World-space Y of a heightmap value.
pub fn vertex_height(value: u8) -> f32 {
    value as f32 * HEIGHT_SCALE
}

/// Linear RGBA vertex colour for `value`, normalised against the map's highest
/// point.
pub fn elevation_color(value: u8, max: u8) -> [f32; 4] {
    let t = if max == 0 {
        0.0
    } else {
        value as f32 / max as f32
    };

    let mut rgb = ELEVATION_STOPS[ELEVATION_STOPS.len() - 1].1;
    for pair in ELEVATION_STOPS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = ((t - t0) / (t1 - t0)).clamp(0.0, 1.0);
            rgb = [
                c0[0] + (c1[0] - c0[0]) * f,
                c0[1] + (c1[1] - c0[1]) * f,
                c0[2] + (c1[2] - c0[2]) * f,
            ];
            break;
        }
    }
    Color::srgb(rgb[0], rgb[1], rgb[2])
        .to_linear()
        .to_f32_array()
}

/// Smooth normal from central differences over the neighbouring vertices.
fn vertex_normal(heightmap: &Heightmap, x: usize, y: usize) -> [f32; 3] {
    let (w, h) = (heightmap.width(), heightmap.height());
    let elevation = |x: usize, y: usize| vertex_height(heightmap.get(x, y).unwrap_or(0));

    let (xl, xr) = (x.saturating_sub(1), (x + 1).min(w - 1));
    let (yu, yd) = (y.saturating_sub(1), (y + 1).min(h - 1));

    let dx = if xr > xl {
        let run = axis_coord(xr, w, TERRAIN_EXTENT) - axis_coord(xl, w, TERRAIN_EXTENT);
        (elevation(xr, y) - elevation(xl, y)) / run
    } else {
        0.0
    };
    let dz = if yd > yu {
        let run = axis_coord(yd, h, TERRAIN_EXTENT) - axis_coord(yu, h, TERRAIN_EXTENT);
        (elevation(x, yd) - elevation(x, yu)) / run
    } else {
        0.0
    };

    let n = Vec3::new(-dx, 1.0, -dz).normalize_or(Vec3::Y);
    n.to_array()
}

/// Build the terrain plane: one vertex per heightmap value, laid out row-major
/// along +X then +Z, two triangles per grid cell.
///
/// `textured` selects white vertex colours so a ground texture shows through
/// unchanged; otherwise vertices are coloured by elevation.
pub fn build_terrain_mesh(heightmap: &Heightmap, textured: bool) -> Mesh {
    let (w, h) = (heightmap.width(), heightmap.height());
    let max = heightmap.max_height();
    let count = heightmap.len();

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(count);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(count);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(count);
    let mut colors: Vec<[f32; 4]> = Vec::with_capacity(count);

    for (i, &value) in heightmap.values().iter().enumerate() {
        let (x, y) = (i % w, i / w);
        positions.push([
            axis_coord(x, w, TERRAIN_EXTENT),
            vertex_height(value),
            axis_coord(y, h, TERRAIN_EXTENT),
        ]);
        normals.push(vertex_normal(heightmap, x, y));
        uvs.push([axis_uv(x, w), axis_uv(y, h)]);
        colors.push(if textured {
            [1.0; 4]
        } else {
            elevation_color(value, max)
        });
    }

    let cells = w.saturating_sub(1) * h.saturating_sub(1);
    let mut indices: Vec<u32> = Vec::with_capacity(cells * 6);
    for y in 0..h.saturating_sub(1) {
        for x in 0..w.saturating_sub(1) {
            let a = (y * w + x) as u32;
            let b = a + 1;
            let c = a + w as u32;
            let d = c + 1;
            // a-c-b and b-c-d wind counter-clockwise seen from +Y.
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_indices(Indices::U32(indices))
}
