//! Parameter snapshot
//!
//! A flat list of formatted values, one per field per sphere, ordered field
//! by field: every sphere's visibility, then every sphere's x position, and so
//! on down to elasticity. Sinks receive the whole list once per frame.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{error::SnapshotError, physics::SimulationState};

use super::BodyField;

/// Formatted table values of one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSnapshot {
    columns: usize,
    values: Vec<String>,
}

impl ParameterSnapshot {
    pub fn capture(state: &SimulationState) -> Self {
        let columns = state.sphere_count();
        let mut values = Vec::with_capacity(columns * BodyField::ALL.len());

        for field in BodyField::ALL {
            values.extend(state.spheres().map(|sphere| field.format(sphere)));
        }

        Self { columns, values }
    }

    /// Number of spheres
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn cell(&self, field: BodyField, column: usize) -> Option<&str> {
        if column >= self.columns {
            return None;
        }
        self.values
            .get(field.row() * self.columns + column)
            .map(String::as_str)
    }
}

/// Destination for the per-frame snapshot
pub trait SnapshotSink {
    /// Replaces whatever the sink held with `snapshot`
    fn write(&mut self, snapshot: &ParameterSnapshot) -> Result<(), SnapshotError>;
}

/// Keeps the latest snapshot for the panel
#[derive(Debug, Default)]
pub struct MemorySink {
    latest: ParameterSnapshot,
}

impl MemorySink {
    pub fn latest(&self) -> &ParameterSnapshot {
        &self.latest
    }

    /// Swaps in a new snapshot; never fails
    pub fn replace(&mut self, snapshot: &ParameterSnapshot) {
        self.latest.clone_from(snapshot);
    }
}

impl SnapshotSink for MemorySink {
    fn write(&mut self, snapshot: &ParameterSnapshot) -> Result<(), SnapshotError> {
        self.replace(snapshot);
        Ok(())
    }
}

/// Truncates and rewrites a text file, one value per line
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotSink for FileSink {
    fn write(&mut self, snapshot: &ParameterSnapshot) -> Result<(), SnapshotError> {
        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);

        for value in snapshot.values() {
            writeln!(writer, "{}", value).map_err(|e| self.io_error(e))?;
        }

        writer.flush().map_err(|e| self.io_error(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{SimulationConfig, SphereConfig},
        physics::SimulationState,
    };
    use cgmath::Vector3;

    fn two_sphere_state() -> SimulationState {
        let config = SimulationConfig::default().with_spheres(vec![
            SphereConfig::new("A", Vector3::new(1.0, 2.0, 3.0)).with_elasticity(0.5),
            SphereConfig::new("B", Vector3::new(-1.0, 0.0, 0.0)).with_hidden(true),
        ]);
        SimulationState::from_config(&config).unwrap()
    }

    #[test]
    fn test_capture_is_field_major() {
        let snapshot = ParameterSnapshot::capture(&two_sphere_state());

        assert_eq!(snapshot.columns(), 2);
        assert_eq!(snapshot.values().len(), 22);
        assert_eq!(&snapshot.values()[..6], ["yes", "no", "1.000", "-1.000", "2.000", "0.000"]);
        assert_eq!(snapshot.values()[20], "50.000");
        assert_eq!(snapshot.values()[21], "100.000");
    }

    #[test]
    fn test_cell_lookup() {
        let snapshot = ParameterSnapshot::capture(&two_sphere_state());
        assert_eq!(snapshot.cell(BodyField::PositionZ, 0), Some("3.000"));
        assert_eq!(snapshot.cell(BodyField::MassExponent, 1), Some("10.000"));
        assert_eq!(snapshot.cell(BodyField::Radius, 2), None);
    }

    #[test]
    fn test_memory_sink_replaces_contents() {
        let mut sink = MemorySink::default();
        let snapshot = ParameterSnapshot::capture(&two_sphere_state());
        sink.write(&snapshot).unwrap();
        assert_eq!(sink.latest(), &snapshot);
    }

    #[test]
    fn test_memory_sink_replace_overwrites() {
        let mut sink = MemorySink::default();
        let first = ParameterSnapshot::capture(&two_sphere_state());
        sink.replace(&first);

        let mut state = two_sphere_state();
        state.bodies_mut()[1].location.x = 9.0;
        let second = ParameterSnapshot::capture(&state);
        sink.replace(&second);

        assert_eq!(sink.latest(), &second);
        assert_eq!(sink.latest().cell(BodyField::PositionX, 0), Some("9.000"));
    }

    #[test]
    fn test_file_sink_rewrites_file() {
        let path = std::env::temp_dir().join(format!("spherebox-snapshot-{}.txt", std::process::id()));
        let mut sink = FileSink::new(&path);
        let snapshot = ParameterSnapshot::capture(&two_sphere_state());

        sink.write(&snapshot).unwrap();
        sink.write(&snapshot).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 22);
        assert_eq!(contents.lines().next(), Some("yes"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_sink_reports_io_errors() {
        let mut sink = FileSink::new("/nonexistent-dir/spherebox/snapshot.txt");
        let result = sink.write(&ParameterSnapshot::default());
        assert!(matches!(result, Err(SnapshotError::Io { .. })));
    }
}
