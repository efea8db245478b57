//! Procedural primitive generation
//!
//! All primitives are centered at the origin in a Z-up frame and come with
//! normals and texture coordinates, so they can be uploaded as-is.

use std::f32::consts::PI;

use super::GeometryData;

/// A flat plane in the XY plane, `subdivisions` quads along each side.
pub fn plane(width: f32, depth: f32, subdivisions: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let segs = subdivisions.max(1);

    for row in 0..=segs {
        for col in 0..=segs {
            let u = col as f32 / segs as f32;
            let v = row as f32 / segs as f32;
            data.positions
                .push([(u - 0.5) * width, (v - 0.5) * depth, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
            data.tex_coords.push([u, v]);
        }
    }

    let stride = segs + 1;
    for row in 0..segs {
        for col in 0..segs {
            let i = row * stride + col;
            data.indices
                .extend_from_slice(&[i, i + 1, i + stride, i + 1, i + stride + 1, i + stride]);
        }
    }

    data
}

/// An axis-aligned cube with `size` edge length. Each face carries its own
/// four vertices so normals stay flat.
pub fn cube(size: f32) -> GeometryData {
    let h = size * 0.5;
    let mut data = GeometryData::new();
    push_box(&mut data, [-h, -h, -h], [h, h, h]);
    data
}

/// An axis gizmo: three thin boxes running from the origin along +X, +Y
/// and +Z.
pub fn axes(length: f32, thickness: f32) -> GeometryData {
    let t = thickness * 0.5;
    let mut data = GeometryData::new();
    push_box(&mut data, [0.0, -t, -t], [length, t, t]);
    push_box(&mut data, [-t, 0.0, -t], [t, length, t]);
    push_box(&mut data, [-t, -t, 0.0], [t, t, length]);
    data
}

/// Appends an axis-aligned box spanning `lo`..`hi`, four vertices per face
/// so normals stay flat.
fn push_box(data: &mut GeometryData, lo: [f32; 3], hi: [f32; 3]) {
    // (normal, four corners counter-clockwise when seen from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [
                [lo[0], lo[1], hi[2]],
                [hi[0], lo[1], hi[2]],
                [hi[0], hi[1], hi[2]],
                [lo[0], hi[1], hi[2]],
            ],
        ),
        (
            [0.0, 0.0, -1.0],
            [
                [hi[0], lo[1], lo[2]],
                [lo[0], lo[1], lo[2]],
                [lo[0], hi[1], lo[2]],
                [hi[0], hi[1], lo[2]],
            ],
        ),
        (
            [1.0, 0.0, 0.0],
            [
                [hi[0], lo[1], hi[2]],
                [hi[0], lo[1], lo[2]],
                [hi[0], hi[1], lo[2]],
                [hi[0], hi[1], hi[2]],
            ],
        ),
        (
            [-1.0, 0.0, 0.0],
            [
                [lo[0], lo[1], lo[2]],
                [lo[0], lo[1], hi[2]],
                [lo[0], hi[1], hi[2]],
                [lo[0], hi[1], lo[2]],
            ],
        ),
        (
            [0.0, 1.0, 0.0],
            [
                [hi[0], hi[1], hi[2]],
                [hi[0], hi[1], lo[2]],
                [lo[0], hi[1], lo[2]],
                [lo[0], hi[1], hi[2]],
            ],
        ),
        (
            [0.0, -1.0, 0.0],
            [
                [lo[0], lo[1], hi[2]],
                [lo[0], lo[1], lo[2]],
                [hi[0], lo[1], lo[2]],
                [hi[0], lo[1], hi[2]],
            ],
        ),
    ];

    for (normal, corners) in &faces {
        let base = data.positions.len() as u32;
        for (corner, uv) in corners
            .iter()
            .zip([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
        {
            data.positions.push(*corner);
            data.normals.push(*normal);
            data.tex_coords.push(uv);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// A UV sphere with `segments` slices around the Z axis and `rings`
/// latitudinal bands.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let segs = segments.max(3);
    let rings = rings.max(2);

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let polar = v * PI;
        let (sin_p, cos_p) = polar.sin_cos();

        for seg in 0..=segs {
            let u = seg as f32 / segs as f32;
            let azimuth = u * 2.0 * PI;
            let (sin_a, cos_a) = azimuth.sin_cos();

            let normal = [sin_p * cos_a, sin_p * sin_a, cos_p];
            data.positions
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            data.normals.push(normal);
            data.tex_coords.push([u, v]);
        }
    }

    let stride = segs + 1;
    for ring in 0..rings {
        for seg in 0..segs {
            let i = ring * stride + seg;
            data.indices
                .extend_from_slice(&[i, i + stride, i + 1, i + 1, i + stride, i + stride + 1]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_counts() {
        let data = plane(2.0, 2.0, 2);
        assert_eq!(data.vertex_count(), 9); // 3x3 grid
        assert_eq!(data.triangle_count(), 8); // 4 quads
        assert_eq!(data.normals.len(), data.vertex_count());
        assert_eq!(data.tex_coords.len(), data.vertex_count());
    }

    #[test]
    fn cube_counts() {
        let data = cube(1.0);
        assert_eq!(data.vertex_count(), 24); // 6 faces * 4 vertices
        assert_eq!(data.triangle_count(), 12);
    }

    #[test]
    fn cube_vertices_lie_on_the_surface() {
        let data = cube(2.0);
        for p in &data.positions {
            assert!(p.iter().all(|c| c.abs() <= 1.0 + 1e-6));
            assert!(p.iter().any(|c| (c.abs() - 1.0).abs() < 1e-6));
        }
    }

    #[test]
    fn sphere_normals_are_unit_and_radial() {
        let data = uv_sphere(1.5, 12, 6);
        assert!(data.vertex_count() > 0);
        for (p, n) in data.positions.iter().zip(&data.normals) {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - 1.5).abs() < 1e-4);
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn axes_run_from_the_origin_along_each_positive_axis() {
        let length = 2.5;
        let t = 0.05;
        let data = axes(length, 2.0 * t);

        assert_eq!(data.vertex_count(), 72); // 3 boxes * 24
        assert_eq!(data.triangle_count(), 36);

        // Nothing extends past the arm length or behind the origin by more
        // than the arm's half-thickness.
        for p in &data.positions {
            assert!(p.iter().all(|&c| c >= -t - 1e-6 && c <= length + 1e-6));
        }
        // Each axis actually reaches its full length.
        for axis in 0..3 {
            assert!(data.positions.iter().any(|p| (p[axis] - length).abs() < 1e-6));
        }
    }

    #[test]
    fn indices_stay_in_bounds() {
        for data in [
            plane(1.0, 1.0, 3),
            cube(1.0),
            uv_sphere(1.0, 8, 4),
            axes(1.0, 0.05),
        ] {
            let max = data.vertex_count() as u32;
            assert!(data.indices.iter().all(|&i| i < max));
            assert_eq!(data.indices.len() % 3, 0);
        }
    }
}
