//! Loading and validating the municipality data set.

use crate::error::{MuniError, Result};
use crate::municipality::Municipality;
use glob::glob;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A validated, read-only collection of municipality records.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Where the records were loaded from.
    pub source: PathBuf,

    records: Vec<Municipality>,
}

/// Summary figures for a data set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub record_count: usize,
    pub total_population: u64,
    pub by_type: BTreeMap<String, usize>,
    pub by_county: BTreeMap<String, usize>,
}

impl Dataset {
    /// Load records from a JSON array file, or from a directory holding one
    /// JSON record per `*.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let records = if path.is_dir() {
            load_directory(path)?
        } else if path.is_file() {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str::<Vec<Municipality>>(&raw).map_err(|e| {
                MuniError::InvalidRecord {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?
        } else {
            return Err(MuniError::DataNotFound(path.to_path_buf()));
        };

        let dataset = Self::from_records(path, records)?;
        info!(
            source = %path.display(),
            records = dataset.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Validate in-memory records. `source` is only used in error messages.
    pub fn from_records(source: impl Into<PathBuf>, records: Vec<Municipality>) -> Result<Self> {
        let source = source.into();
        validate(&source, &records)?;
        Ok(Self { source, records })
    }

    pub fn records(&self) -> &[Municipality] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by id, FIPS code, or name slug (case-insensitive).
    pub fn find(&self, id_or_slug: &str) -> Option<&Municipality> {
        self.records.iter().find(|m| m.matches_id_or_slug(id_or_slug))
    }

    /// Like [`find`](Self::find), but a miss is an error.
    pub fn get(&self, id_or_slug: &str) -> Result<&Municipality> {
        self.find(id_or_slug)
            .ok_or_else(|| MuniError::RecordNotFound(id_or_slug.to_string()))
    }

    /// Sorted, deduplicated county names.
    pub fn counties(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|m| m.county.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Record counts and population totals.
    pub fn stats(&self) -> DatasetStats {
        let mut by_type = BTreeMap::new();
        let mut by_county = BTreeMap::new();
        let mut total_population: u64 = 0;

        for m in &self.records {
            *by_type.entry(m.kind.to_string()).or_insert(0) += 1;
            *by_county.entry(m.county.clone()).or_insert(0) += 1;
            total_population = total_population.saturating_add(m.population());
        }

        DatasetStats {
            record_count: self.records.len(),
            total_population,
            by_type,
            by_county,
        }
    }
}

fn load_directory(dir: &Path) -> Result<Vec<Municipality>> {
    let pattern = dir.join("*.json");
    let pattern_str = pattern.to_string_lossy();

    let mut files: Vec<PathBuf> = glob(&pattern_str)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "skipping unreadable dataset entry");
                None
            }
        })
        .collect();
    files.sort();
    debug!(dir = %dir.display(), files = files.len(), "reading record files");

    let mut records = Vec::with_capacity(files.len());
    for file in files {
        let raw = std::fs::read_to_string(&file)?;
        let record = serde_json::from_str::<Municipality>(&raw).map_err(|e| {
            MuniError::InvalidRecord {
                path: file.clone(),
                message: e.to_string(),
            }
        })?;
        records.push(record);
    }
    Ok(records)
}

fn validate(source: &Path, records: &[Municipality]) -> Result<()> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());

    for (index, m) in records.iter().enumerate() {
        if m.id.trim().is_empty() {
            return Err(MuniError::InvalidRecord {
                path: source.to_path_buf(),
                message: format!("record {} has an empty id", index),
            });
        }
        if m.name.trim().is_empty() {
            return Err(MuniError::InvalidRecord {
                path: source.to_path_buf(),
                message: format!("record '{}' has an empty name", m.id),
            });
        }
        if !seen.insert(m.id.to_lowercase()) {
            return Err(MuniError::DuplicateId {
                id: m.id.clone(),
                source_path: source.to_path_buf(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MunicipalityType;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const RECORDS: &str = r#"[
        {"id": "chicago", "fipsCode": "1714000", "name": "Chicago", "type": "City", "county": "Cook", "population": {"current": 2695598}},
        {"id": "oak-park", "name": "Oak Park", "type": "Village", "county": "Cook", "population": {"current": 54583}},
        {"id": "peoria", "name": "Peoria", "type": "City", "county": "Peoria", "population": {"current": 113150}}
    ]"#;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_array_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "municipalities.json", RECORDS);
        let ds = Dataset::load(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[1].name, "Oak Park");
        assert_eq!(ds.source, path);
    }

    #[test]
    fn test_load_directory_sorted_by_file() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "b-springfield.json",
            r#"{"id": "springfield", "name": "Springfield", "type": "City", "county": "Sangamon", "population": {"current": 114394}}"#,
        );
        write_file(
            &dir,
            "a-chicago.json",
            r#"{"id": "chicago", "name": "Chicago", "type": "City", "county": "Cook", "population": {"current": 2695598}}"#,
        );
        write_file(&dir, "notes.txt", "ignored");

        let ds = Dataset::load(dir.path()).unwrap();
        let ids: Vec<&str> = ds.records().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["chicago", "springfield"]);
    }

    #[test]
    fn test_load_missing_path() {
        let err = Dataset::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, MuniError::DataNotFound(_)));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "bad.json", r#"[{"id": "x"}]"#);
        let err = Dataset::load(&path).unwrap_err();
        assert!(matches!(err, MuniError::InvalidRecord { .. }));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let records = vec![
            Municipality::new("Joliet", "Joliet", MunicipalityType::City, "Will", 150_000),
            Municipality::new("joliet", "Joliet Township", MunicipalityType::Town, "Will", 1),
        ];
        let err = Dataset::from_records("mem", records).unwrap_err();
        assert!(matches!(err, MuniError::DuplicateId { ref id, .. } if id == "joliet"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let records = vec![Municipality::new("x", " ", MunicipalityType::City, "Will", 1)];
        let err = Dataset::from_records("mem", records).unwrap_err();
        assert!(matches!(err, MuniError::InvalidRecord { .. }));
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        let ds = Dataset::from_records("mem", Vec::new()).unwrap();
        assert!(ds.is_empty());
        assert!(ds.counties().is_empty());
    }

    #[test]
    fn test_find_by_id_fips_and_slug() {
        let records: Vec<Municipality> = serde_json::from_str(RECORDS).unwrap();
        let ds = Dataset::from_records("mem", records).unwrap();
        assert_eq!(ds.find("CHICAGO").map(|m| m.id.as_str()), Some("chicago"));
        assert_eq!(ds.find("1714000").map(|m| m.id.as_str()), Some("chicago"));
        assert_eq!(ds.find("oak-park").map(|m| m.id.as_str()), Some("oak-park"));
        assert!(ds.find("springfield").is_none());
        assert!(matches!(ds.get("springfield"), Err(MuniError::RecordNotFound(_))));
    }

    #[test]
    fn test_counties_and_stats() {
        let records: Vec<Municipality> = serde_json::from_str(RECORDS).unwrap();
        let ds = Dataset::from_records("mem", records).unwrap();
        assert_eq!(ds.counties(), vec!["Cook", "Peoria"]);

        let stats = ds.stats();
        assert_eq!(stats.record_count, 3);
        assert_eq!(stats.total_population, 2695598 + 54583 + 113150);
        assert_eq!(stats.by_type.get("City"), Some(&2));
        assert_eq!(stats.by_type.get("Village"), Some(&1));
        assert_eq!(stats.by_county.get("Cook"), Some(&2));
    }
}
