//! Wavefront OBJ loading
//!
//! Loads OBJ files into [`GeometryData`], one entry per model in the file.
//! Files are triangulated and re-indexed to a single index stream so the
//! result can be uploaded directly. Files without normals get area-weighted
//! vertex normals computed from the faces.

use std::path::Path;

use crate::error::LoadError;
use crate::gfx::geometry::{compute_vertex_normals, GeometryData};

pub fn load_obj(path: impl AsRef<Path>) -> Result<Vec<GeometryData>, LoadError> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )?;

    let geometries: Vec<GeometryData> = models
        .iter()
        .map(|model| from_tobj_mesh(&model.mesh))
        .filter(|geometry| geometry.triangle_count() > 0)
        .collect();

    if geometries.is_empty() {
        return Err(LoadError::EmptyObject {
            path: path.to_path_buf(),
        });
    }

    log::info!(
        "loaded {:?}: {} model(s), {} triangles",
        path,
        geometries.len(),
        geometries.iter().map(|g| g.triangle_count()).sum::<usize>()
    );
    Ok(geometries)
}

/// Converts one tobj mesh into plain geometry arrays.
pub fn from_tobj_mesh(mesh: &tobj::Mesh) -> GeometryData {
    let positions: Vec<[f32; 3]> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();

    let normals = if mesh.normals.len() == mesh.positions.len() {
        mesh.normals
            .chunks_exact(3)
            .map(|n| [n[0], n[1], n[2]])
            .collect()
    } else {
        log::debug!("OBJ mesh has no usable normals, computing from faces");
        compute_vertex_normals(&positions, &mesh.indices)
    };

    let tex_coords = if mesh.texcoords.len() == positions.len() * 2 {
        mesh.texcoords
            .chunks_exact(2)
            .map(|t| [t[0], t[1]])
            .collect()
    } else {
        vec![[0.0, 0.0]; positions.len()]
    };

    GeometryData {
        positions,
        normals,
        tex_coords,
        indices: mesh.indices.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const TRIANGLE_OBJ: &str = "\
o tri
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";

    fn parse(source: &str) -> Vec<tobj::Model> {
        let (models, _) = tobj::load_obj_buf(
            &mut Cursor::new(source),
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
            |_| Ok(Default::default()),
        )
        .expect("OBJ source should parse");
        models
    }

    #[test]
    fn converts_positions_and_indices() {
        let models = parse(TRIANGLE_OBJ);
        let geometry = from_tobj_mesh(&models[0].mesh);

        assert_eq!(geometry.vertex_count(), 3);
        assert_eq!(geometry.triangle_count(), 1);
        assert_eq!(geometry.positions[1], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn computes_normals_when_the_file_has_none() {
        let models = parse(TRIANGLE_OBJ);
        let geometry = from_tobj_mesh(&models[0].mesh);

        assert_eq!(geometry.normals.len(), 3);
        for normal in &geometry.normals {
            assert!((normal[2] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn missing_tex_coords_become_zeros() {
        let models = parse(TRIANGLE_OBJ);
        let geometry = from_tobj_mesh(&models[0].mesh);
        assert_eq!(geometry.tex_coords, vec![[0.0, 0.0]; 3]);
    }

    #[test]
    fn missing_file_reports_an_error() {
        assert!(load_obj("definitely/not/a/real/file.obj").is_err());
    }
}
