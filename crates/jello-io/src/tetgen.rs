//! TetGen mesh reader.
//!
//! Reads the `.node` / `.ele` pair written by TetGen (tetrahedra) or
//! Triangle (2-D triangles). Both files share a base path:
//!
//! ```text
//! # cube.1.node
//! <points> <dim> <attributes> <boundary marker 0|1>
//! <index> <x> <y> [z] [attributes...] [marker]
//!
//! # cube.1.ele
//! <elements> <nodes per element> <attributes>
//! <index> <n0> <n1> <n2> [n3] [more nodes...] [attributes...]
//! ```
//!
//! `#` starts a comment anywhere on a line. Point indices may start at 0
//! or 1 (TetGen's `-z` switch); the smallest point index is taken as the
//! base and element references are shifted by it. Quadratic elements keep
//! their corner nodes only.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use jello_mesh::TetMesh;
use jello_solver::MeshSource;
use jello_types::{Dimension, JelloError, JelloResult, Scalar};

/// Loads the mesh a configuration asks for: generated or read from disk.
pub fn load_mesh(source: &MeshSource) -> JelloResult<TetMesh> {
    match source {
        MeshSource::Tetgen { path } => read_tetgen(path),
        procedural => procedural.generate().ok_or_else(|| {
            JelloError::InvalidConfig(format!("mesh source {procedural:?} cannot be generated"))
        }),
    }
}

/// Reads `<base>.node` and `<base>.ele`.
pub fn read_tetgen(base: impl AsRef<Path>) -> JelloResult<TetMesh> {
    let node_path = with_suffix(base.as_ref(), "node");
    let ele_path = with_suffix(base.as_ref(), "ele");
    let node_text = std::fs::read_to_string(&node_path)?;
    let ele_text = std::fs::read_to_string(&ele_path)?;

    let mesh = parse_tetgen(
        &node_text,
        &node_path.display().to_string(),
        &ele_text,
        &ele_path.display().to_string(),
    )?;
    tracing::info!(
        path = %base.as_ref().display(),
        dim = mesh.dim.size(),
        vertices = mesh.vertex_count(),
        elements = mesh.element_count(),
        "loaded tetgen mesh"
    );
    Ok(mesh)
}

/// `cube.1` + `node` → `cube.1.node` (appends; does not replace `.1`).
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Parses the contents of a `.node` and a `.ele` file.
///
/// The names are only used in error messages.
pub fn parse_tetgen(
    node_text: &str,
    node_name: &str,
    ele_text: &str,
    ele_name: &str,
) -> JelloResult<TetMesh> {
    let nodes = parse_nodes(node_text, node_name)?;
    let elements = parse_elements(ele_text, ele_name, &nodes)?;
    TetMesh::new(nodes.dim, nodes.positions, elements)
}

struct NodeTable {
    dim: Dimension,
    positions: Vec<Scalar>,
    /// Index of the first point (0 or 1 in practice).
    base: usize,
    count: usize,
}

/// Data lines of a TetGen file: `(1-based line number, tokens)`.
fn data_lines(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines().enumerate().filter_map(|(i, raw)| {
        let content = raw.split('#').next().unwrap_or("");
        let tokens: Vec<&str> = content.split_whitespace().collect();
        (!tokens.is_empty()).then_some((i + 1, tokens))
    })
}

fn parse_error(source: &str, line: usize, message: impl Into<String>) -> JelloError {
    JelloError::Parse {
        source_name: source.to_string(),
        line,
        message: message.into(),
    }
}

fn field<T: FromStr>(source: &str, line: usize, token: &str, what: &str) -> JelloResult<T> {
    token
        .parse()
        .map_err(|_| parse_error(source, line, format!("invalid {what} '{token}'")))
}

fn parse_nodes(text: &str, source: &str) -> JelloResult<NodeTable> {
    let mut lines = data_lines(text);
    let (line, header) = lines
        .next()
        .ok_or_else(|| parse_error(source, 1, "missing header"))?;
    if header.len() < 2 {
        return Err(parse_error(source, line, "header needs <points> <dim>"));
    }
    let count: usize = field(source, line, header[0], "point count")?;
    let dim = Dimension::new(field(source, line, header[1], "dimension")?)?;
    let d = dim.size();

    let mut raw: Vec<(usize, usize, Vec<Scalar>)> = Vec::with_capacity(count);
    let mut last_line = line;
    for (line, tokens) in lines.take(count) {
        last_line = line;
        if tokens.len() < 1 + d {
            return Err(parse_error(
                source,
                line,
                format!("expected an index and {d} coordinates"),
            ));
        }
        let index: usize = field(source, line, tokens[0], "point index")?;
        let coords = tokens[1..=d]
            .iter()
            .map(|t| field(source, line, t, "coordinate"))
            .collect::<JelloResult<Vec<Scalar>>>()?;
        raw.push((line, index, coords));
    }
    if raw.len() < count {
        return Err(parse_error(
            source,
            last_line,
            format!("expected {count} points, found {}", raw.len()),
        ));
    }

    let base = raw.iter().map(|(_, index, _)| *index).min().unwrap_or(0);
    let mut positions = vec![0.0; count * d];
    let mut seen = vec![false; count];
    for (line, index, coords) in raw {
        let slot = index - base;
        if slot >= count {
            return Err(parse_error(
                source,
                line,
                format!("point index {index} outside {base}..{}", base + count),
            ));
        }
        if std::mem::replace(&mut seen[slot], true) {
            return Err(parse_error(source, line, format!("duplicate point index {index}")));
        }
        positions[slot * d..(slot + 1) * d].copy_from_slice(&coords);
    }

    Ok(NodeTable {
        dim,
        positions,
        base,
        count,
    })
}

fn parse_elements(text: &str, source: &str, nodes: &NodeTable) -> JelloResult<Vec<u32>> {
    let corners = nodes.dim.vertices_per_element();
    let mut lines = data_lines(text);
    let (line, header) = lines
        .next()
        .ok_or_else(|| parse_error(source, 1, "missing header"))?;
    let count: usize = field(source, line, header[0], "element count")?;
    let per_element: usize = match header.get(1) {
        Some(token) => field(source, line, token, "nodes per element")?,
        None => corners,
    };
    if per_element < corners {
        return Err(parse_error(
            source,
            line,
            format!(
                "{per_element} nodes per element, a {}-D mesh needs {corners}",
                nodes.dim.size()
            ),
        ));
    }
    if per_element > corners {
        tracing::debug!(per_element, corners, "keeping corner nodes of higher-order elements");
    }

    let mut elements = Vec::with_capacity(count * corners);
    let mut read = 0;
    let mut last_line = line;
    for (line, tokens) in lines.take(count) {
        last_line = line;
        if tokens.len() < 1 + per_element {
            return Err(parse_error(
                source,
                line,
                format!("expected an index and {per_element} nodes"),
            ));
        }
        for token in &tokens[1..=corners] {
            let index: usize = field(source, line, token, "node reference")?;
            if index < nodes.base || index - nodes.base >= nodes.count {
                return Err(parse_error(
                    source,
                    line,
                    format!("node reference {index} does not name a point"),
                ));
            }
            elements.push((index - nodes.base) as u32);
        }
        read += 1;
    }
    if read < count {
        return Err(parse_error(
            source,
            last_line,
            format!("expected {count} elements, found {read}"),
        ));
    }
    Ok(elements)
}
