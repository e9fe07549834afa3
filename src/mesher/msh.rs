//! A minimal reader for the summary counts of an ASCII Gmsh `.msh` file, versions 2.2 and 4.1.

use crate::errors::MshParseError;
use std::fmt::{Display, Formatter};

// Gmsh element type codes
const TRIANGLE: u32 = 2;
const QUAD: u32 = 3;

/// Node and element counts of a generated mesh
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct MeshStatistics {
    pub nodes: usize,
    /// All elements, including the boundary lines and points Gmsh stores alongside the surface
    pub elements: usize,
    pub triangles: usize,
    pub quads: usize,
}

impl Display for MeshStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} nodes, {} elements (Triangles: {}, Quads: {})",
            self.nodes, self.elements, self.triangles, self.quads
        )
    }
}

impl MeshStatistics {
    fn tally(&mut self, element_type: u32, count: usize) {
        match element_type {
            TRIANGLE => self.triangles += count,
            QUAD => self.quads += count,
            _ => {}
        }
    }
}

fn next_line<'a, I: Iterator<Item = &'a str>>(
    lines: &mut I,
    section: &'static str,
) -> Result<&'a str, MshParseError> {
    lines.next().ok_or(MshParseError::Truncated(section))
}

/// Parses the whitespace separated integer fields of a header line, requiring at least `min`
fn fields(line: &str, section: &'static str, min: usize) -> Result<Vec<usize>, MshParseError> {
    let malformed = || MshParseError::Malformed {
        section,
        line: line.to_string(),
    };

    let values = line
        .split_whitespace()
        .map(|f| f.parse::<usize>().map_err(|_| malformed()))
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() < min {
        return Err(malformed());
    }
    Ok(values)
}

/// Reads the node count and the element counts by type from the text of a mesh file
pub fn parse_statistics(text: &str) -> Result<MeshStatistics, MshParseError> {
    let mut lines = text.lines().map(str::trim);
    let mut version: Option<u32> = None;
    let mut nodes: Option<usize> = None;
    let mut elements: Option<MeshStatistics> = None;

    while let Some(line) = lines.next() {
        match line {
            "$MeshFormat" => {
                let header = next_line(&mut lines, "$MeshFormat")?;
                let mut parts = header.split_whitespace();
                let major = parts
                    .next()
                    .and_then(|v| v.split('.').next())
                    .and_then(|v| v.parse::<u32>().ok());
                let file_type = parts.next();
                match (major, file_type) {
                    (Some(_), Some("1")) => return Err(MshParseError::Binary),
                    (Some(m), Some(_)) => version = Some(m),
                    _ => {
                        return Err(MshParseError::Malformed {
                            section: "$MeshFormat",
                            line: header.to_string(),
                        })
                    }
                }
            }
            "$Nodes" => {
                let v = version.ok_or(MshParseError::MissingSection("$MeshFormat"))?;
                let header = fields(next_line(&mut lines, "$Nodes")?, "$Nodes", 1)?;
                // 4.x: numEntityBlocks numNodes minNodeTag maxNodeTag
                let count = if v >= 4 { header.get(1) } else { header.first() };
                nodes = Some(*count.ok_or(MshParseError::Truncated("$Nodes"))?);
            }
            "$Elements" => {
                let v = version.ok_or(MshParseError::MissingSection("$MeshFormat"))?;
                elements = Some(read_elements(&mut lines, v)?);
            }
            _ => {}
        }
    }

    let nodes = nodes.ok_or(MshParseError::MissingSection("$Nodes"))?;
    let mut stats = elements.ok_or(MshParseError::MissingSection("$Elements"))?;
    stats.nodes = nodes;
    Ok(stats)
}

fn read_elements<'a, I: Iterator<Item = &'a str>>(
    lines: &mut I,
    version: u32,
) -> Result<MeshStatistics, MshParseError> {
    const SECTION: &str = "$Elements";
    let mut stats = MeshStatistics::default();

    if version >= 4 {
        // numEntityBlocks numElements minElementTag maxElementTag, then per block a header of
        // entityDim entityTag elementType numElementsInBlock followed by one line per element
        let header = fields(next_line(lines, SECTION)?, SECTION, 2)?;
        stats.elements = header[1];
        for _ in 0..header[0] {
            let block = fields(next_line(lines, SECTION)?, SECTION, 4)?;
            let count = block[3];
            for _ in 0..count {
                next_line(lines, SECTION)?;
            }
            stats.tally(block[2] as u32, count);
        }
    } else {
        // numElements, then one line of elm-number elm-type ... per element
        let header = fields(next_line(lines, SECTION)?, SECTION, 1)?;
        stats.elements = header[0];
        for _ in 0..header[0] {
            let line = next_line(lines, SECTION)?;
            let element = fields(line, SECTION, 2)?;
            stats.tally(element[1] as u32, 1);
        }
    }

    Ok(stats)
}
