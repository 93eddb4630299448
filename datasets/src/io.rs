use std::io::{Read, Write};

use csv::{ReaderBuilder, WriterBuilder};
use lloyd::Point;
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

#[derive(Serialize, Deserialize)]
struct CenterRecord {
    x: f64,
    y: f64,
}

/// Writes one row per point: its coordinates followed by its cluster id in each labeling.
///
/// The header names the columns `x`, `y`, `cluster_0`, `cluster_1`, ...
pub fn write_points<W: Write>(points: &[Point], labelings: &[&[usize]], writer: W) -> Result<()> {
    for (labeling, labels) in labelings.iter().enumerate() {
        if labels.len() != points.len() {
            return Err(DatasetError::LabelCount {
                labeling,
                expected: points.len(),
                found: labels.len(),
            });
        }
    }

    let mut writer = WriterBuilder::new().from_writer(writer);
    let mut header = vec!["x".to_string(), "y".to_string()];
    header.extend((0..labelings.len()).map(|labeling| format!("cluster_{}", labeling)));
    writer.write_record(&header)?;

    let mut record = Vec::with_capacity(header.len());
    for (index, point) in points.iter().enumerate() {
        record.clear();
        record.push(point.x.to_string());
        record.push(point.y.to_string());
        record.extend(labelings.iter().map(|labels| labels[index].to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes centers as `x,y` rows, the row index being the cluster id.
pub fn write_centers<W: Write>(centers: &[Point], writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    for center in centers {
        writer.serialize(CenterRecord {
            x: center.x,
            y: center.y,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads centers written by [`write_centers`].
pub fn read_centers<R: Read>(reader: R) -> Result<Vec<Point>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    reader
        .deserialize()
        .map(|record| -> Result<Point> {
            let CenterRecord { x, y } = record?;
            Ok(Point::new(x, y))
        })
        .collect()
}
