//! USDA serialization - writes a `Scene` as a `#usda 1.0` text document
//!
//! Field order and number formatting are fixed so identical scenes always
//! produce byte-identical files.

use crate::draw::geometry::{MeshBuffer, Scene};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const MESH_INDENT: &str = "    ";
const FIELD_INDENT: &str = "        ";
const ITEM_INDENT: &str = "            ";

/// Serializes a scene to a USDA string
pub fn scene_to_string(scene: &Scene) -> String {
    let mut buffer = Vec::with_capacity(estimate_size(scene));
    // Writing into a Vec cannot fail
    let _ = write_scene(scene, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Serializes a scene to a file, creating parent directories as needed
pub fn scene_to_file<P: AsRef<Path>>(scene: &Scene, file_path: P) -> Result<()> {
    let file_path = file_path.as_ref();
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    let file = File::create(file_path)
        .with_context(|| format!("Failed to create USDA file {}", file_path.display()))?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    write_scene(scene, &mut writer).context("Failed to serialize scene")?;
    writer.flush().context("Failed to flush USDA writer")?;
    Ok(())
}

/// Writes the stage header, the root Xform and every non-empty mesh
///
/// Meshes are rendered into separate buffers in parallel and written out in
/// scene order.
pub fn write_scene<W: Write>(scene: &Scene, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "#usda 1.0")?;
    writeln!(writer, "(")?;
    writeln!(writer, "    defaultPrim = \"{}\"", scene.root_name)?;
    writeln!(writer, "    metersPerUnit = {:?}", scene.meters_per_unit)?;
    writeln!(writer, "    upAxis = \"{}\"", scene.up_axis)?;
    writeln!(writer, ")")?;
    writeln!(writer)?;
    writeln!(writer, "def Xform \"{}\" {{", scene.root_name)?;

    let meshes: Vec<(&str, &MeshBuffer)> = scene.iter().filter(|(_, mesh)| !mesh.is_empty()).collect();
    let mesh_buffers: Result<Vec<Vec<u8>>, io::Error> = meshes
        .par_iter()
        .map(|(name, mesh)| {
            let mut buffer = Vec::with_capacity(estimate_mesh_size(mesh));
            write_mesh(name, mesh, &mut buffer)?;
            Ok(buffer)
        })
        .collect();

    for buffer in mesh_buffers? {
        writer.write_all(&buffer)?;
    }

    writeln!(writer, "}}")
}

fn write_mesh<W: Write>(name: &str, mesh: &MeshBuffer, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}def Mesh \"{}\" {{", MESH_INDENT, name)?;

    if let Some(extent) = mesh.extent() {
        let (lo, hi) = (extent.min, extent.max);
        writeln!(
            writer,
            "{}float3[] extent = [({:.3}, {:.3}, {:.3}), ({:.3}, {:.3}, {:.3})]",
            FIELD_INDENT, lo[0], lo[1], lo[2], hi[0], hi[1], hi[2]
        )?;
    }
    writeln!(writer, "{}bool doubleSided = 1", FIELD_INDENT)?;
    writeln!(writer, "{}uniform token subdivisionScheme = \"none\"", FIELD_INDENT)?;

    write_int_array(writer, "faceVertexCounts", &mesh.face_vertex_counts)?;
    write_int_array(writer, "faceVertexIndices", &mesh.face_vertex_indices)?;
    write_vec3_array(writer, "point3f[] points", &mesh.points)?;

    if !mesh.normals.is_empty() {
        write_vec3_array(writer, "normal3f[] normals", &mesh.normals)?;
        writeln!(writer, "{}uniform token normals:interpolation = \"vertex\"", FIELD_INDENT)?;
    }

    let [r, g, b] = mesh.display_color;
    writeln!(
        writer,
        "{}color3f[] primvars:displayColor = [({:.3}, {:.3}, {:.3})]",
        FIELD_INDENT, r, g, b
    )?;
    writeln!(
        writer,
        "{}uniform token primvars:displayColor:interpolation = \"constant\"",
        FIELD_INDENT
    )?;
    writeln!(writer, "{}}}", MESH_INDENT)
}

/// All values on a single line between the brackets
fn write_int_array<W: Write>(writer: &mut W, name: &str, values: &[u32]) -> io::Result<()> {
    writeln!(writer, "{}int[] {} = [", FIELD_INDENT, name)?;
    writer.write_all(ITEM_INDENT.as_bytes())?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            writer.write_all(b", ")?;
        }
        write!(writer, "{}", value)?;
    }
    writeln!(writer)?;
    writeln!(writer, "{}]", FIELD_INDENT)
}

/// One tuple per line, each with a trailing comma
fn write_vec3_array<W: Write>(writer: &mut W, decl: &str, values: &[[f64; 3]]) -> io::Result<()> {
    writeln!(writer, "{}{} = [", FIELD_INDENT, decl)?;
    for [x, y, z] in values {
        writeln!(writer, "{}({:.3}, {:.3}, {:.3}),", ITEM_INDENT, x, y, z)?;
    }
    writeln!(writer, "{}]", FIELD_INDENT)
}

fn estimate_mesh_size(mesh: &MeshBuffer) -> usize {
    512 + mesh.points.len() * 80 + mesh.face_vertex_indices.len() * 8
}

fn estimate_size(scene: &Scene) -> usize {
    256 + scene.iter().map(|(_, mesh)| estimate_mesh_size(mesh)).sum::<usize>()
}
