use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lloyd::{ClusterDefinition, Point};
use tracing::debug;

use crate::error::{DatasetError, Result};

/// Reads the cluster definitions of a problem file.
pub fn load_definitions(path: impl AsRef<Path>) -> Result<Vec<ClusterDefinition>> {
    let path = path.as_ref();
    let definitions = read_definitions(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), n_clusters = definitions.len(), "loaded problem");
    Ok(definitions)
}

/// Parses one definition per line: `n_points center_x center_y stdev_x stdev_y`.
///
/// Blank lines are skipped. A problem without any definition is an error.
pub fn read_definitions(reader: impl BufRead) -> Result<Vec<ClusterDefinition>> {
    let mut definitions = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let definition = parse_definition(&line).map_err(|message| DatasetError::Parse {
            line: index + 1,
            message,
        })?;
        debug!(
            n_points = definition.n_points,
            center = %definition.center,
            stdev = %definition.stdev,
            "cluster definition"
        );
        definitions.push(definition);
    }

    if definitions.is_empty() {
        return Err(DatasetError::EmptyProblem);
    }
    Ok(definitions)
}

fn parse_definition(line: &str) -> std::result::Result<ClusterDefinition, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(format!("expected 5 fields, found {}", fields.len()));
    }

    let n_points = fields[0]
        .parse::<usize>()
        .map_err(|err| format!("invalid point count {:?}: {}", fields[0], err))?;
    let mut coords = [0f64; 4];
    for (coord, field) in coords.iter_mut().zip(&fields[1..]) {
        *coord = field
            .parse::<f64>()
            .map_err(|err| format!("invalid coordinate {:?}: {}", field, err))?;
    }

    Ok(ClusterDefinition::new(
        n_points,
        Point::new(coords[0], coords[1]),
        Point::new(coords[2], coords[3]),
    ))
}
