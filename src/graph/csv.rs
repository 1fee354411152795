//! Node file import.
//!
//! Node files are comma separated with a header row, for example
//!
//! ```text
//! address,name,lat,lng,reward_scale_correct
//! 11abc,quiet-lime-owl,37.7749,-122.4194,0.5
//! ```
//!
//! The first column is the node key. `name`, `lat` and `lng` are required,
//! `address` and `reward_scale_correct` are optional, and every other column
//! is kept as a string attribute.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::node::Node;
use crate::error::{HexScaleError, Result};

/// Read nodes from a file on disk.
pub fn read_nodes_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Node>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let nodes = parse_nodes(BufReader::new(file))?;
    if nodes.is_empty() {
        log::warn!("No nodes found in {}", path.display());
    }
    Ok(nodes)
}

/// Parse nodes from any buffered reader.
pub fn parse_nodes<R: BufRead>(reader: R) -> Result<Vec<Node>> {
    let mut lines = reader.lines().enumerate();

    let (header_line, header): (usize, Vec<String>) = loop {
        match lines.next() {
            Some((idx, line)) => {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                break (idx + 1, split_record(&line));
            }
            None => return Ok(Vec::new()),
        }
    };

    let column = |name: &str| header.iter().position(|h| h == name);
    let missing = |name: &str| HexScaleError::InvalidRecord {
        line: header_line,
        reason: format!("header is missing the '{}' column", name),
    };
    let name_col = column("name").ok_or_else(|| missing("name"))?;
    let lat_col = column("lat").ok_or_else(|| missing("lat"))?;
    let lng_col = column("lng").ok_or_else(|| missing("lng"))?;
    let address_col = column("address");
    let scale_col = column("reward_scale_correct");
    let known = [Some(name_col), Some(lat_col), Some(lng_col), address_col, scale_col];

    let mut nodes = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_record(&line);
        if fields.len() != header.len() {
            return Err(HexScaleError::InvalidRecord {
                line: line_no,
                reason: format!("expected {} fields, got {}", header.len(), fields.len()),
            });
        }

        let lat = parse_number(&fields[lat_col], "lat", line_no)?;
        let lng = parse_number(&fields[lng_col], "lng", line_no)?;
        let mut node = Node::new(fields[0].clone(), fields[name_col].clone(), lat, lng);

        if let Some(col) = address_col {
            node = node.with_address(fields[col].clone());
        }
        if let Some(col) = scale_col
            && let Some(scale) = parse_optional(&fields[col], "reward_scale_correct", line_no)?
        {
            node = node.with_reward_scale_correct(scale);
        }
        for (col, key) in header.iter().enumerate() {
            if !known.contains(&Some(col)) {
                node = node.with_attribute(key.clone(), fields[col].clone());
            }
        }

        nodes.push(node);
    }

    Ok(nodes)
}

fn split_record(line: &str) -> Vec<String> {
    line.trim_end_matches(['\r', '\n'])
        .split(',')
        .map(|field| field.trim().to_string())
        .collect()
}

fn parse_number(field: &str, column: &str, line: usize) -> Result<f64> {
    field.parse::<f64>().map_err(|e| HexScaleError::InvalidRecord {
        line,
        reason: format!("{} '{}': {}", column, field, e),
    })
}

/// Empty and `None` fields parse as absent.
fn parse_optional(field: &str, column: &str, line: usize) -> Result<Option<f64>> {
    if field.is_empty() || field.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    parse_number(field, column, line).map(Some)
}
