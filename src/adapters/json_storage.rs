use crate::domain::{AddOutcome, Record, Vacancy, VacancyStorage};
use crate::utils::error::Result;
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILENAME: &str = "vacancies.json";

/// Stores vacancies as one pretty-printed JSON array.
///
/// Every write rewrites the whole file. There is no locking, so concurrent
/// writers can lose updates.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Vec<Record> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("💾 {} does not exist yet", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("🔶 Could not read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        if content.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Vec<Record>>(&content) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    "🔶 {} is not a JSON array of objects, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Atomic write: a sibling `.tmp` file is renamed over the target.
    fn save(&self, records: &[Record]) -> Result<()> {
        let data = render(records)?;
        let temp_path = self.temp_path();

        let write = || -> std::io::Result<()> {
            // Make sure the parent directory exists
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&temp_path, &data)?;
            fs::rename(&temp_path, &self.path).inspect_err(|_| {
                let _ = fs::remove_file(&temp_path);
            })
        };

        write().map_err(|e| {
            tracing::error!("❌ Failed to write {}: {}", self.path.display(), e);
            e.into()
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(DEFAULT_FILENAME));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn render(records: &[Record]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

fn contains_name(records: &[Record], name: &str) -> bool {
    records.iter().any(|record| record.name() == Some(name))
}

impl Default for JsonFileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_FILENAME)
    }
}

impl VacancyStorage for JsonFileStorage {
    async fn add_vacancy(&self, vacancy: &Vacancy) -> Result<AddOutcome> {
        let mut records = self.load();
        if contains_name(&records, vacancy.name()) {
            tracing::info!("💾 Vacancy '{}' already stored, skipping", vacancy.name());
            return Ok(AddOutcome::Duplicate);
        }

        records.push(vacancy.to_mapping());
        self.save(&records)?;
        tracing::debug!("💾 Stored '{}' ({} total)", vacancy.name(), records.len());
        Ok(AddOutcome::Added)
    }

    async fn get_vacancies(&self) -> Vec<Record> {
        self.load()
    }

    async fn remove_vacancy(&self, name: &str) -> Result<usize> {
        let mut records = self.load();
        let before = records.len();
        records.retain(|record| record.name() != Some(name));
        let removed = before - records.len();

        self.save(&records)?;
        tracing::debug!("💾 Removed {} vacancies named '{}'", removed, name);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Salary;
    use serde_json::Number;
    use tempfile::TempDir;

    fn vacancy(name: &str) -> Vacancy {
        Vacancy::new(
            name,
            "https://hh.ru/vacancy/1",
            Some("Описание".to_string()),
            Salary::Amount(Number::from(100000)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("absent.json"));
        assert!(storage.get_vacancies().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.json");

        fs::write(&path, "{not json").unwrap();
        let storage = JsonFileStorage::new(&path);
        assert!(storage.get_vacancies().await.is_empty());

        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(storage.get_vacancies().await.is_empty());

        fs::write(&path, "   \n").unwrap();
        assert!(storage.get_vacancies().await.is_empty());
    }

    #[tokio::test]
    async fn test_written_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vacancies.json");
        let storage = JsonFileStorage::new(&path);

        storage.add_vacancy(&vacancy("Разработчик")).await.unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[\n    {\n        \"name\": \"Разработчик\""));
        assert!(content.contains("\"description\": \"Описание\""));
        assert!(content.contains("\"salary\": 100000"));
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/vacancies.json");
        let storage = JsonFileStorage::new(&path);

        let outcome = storage.add_vacancy(&vacancy("A")).await.unwrap();
        assert_eq!(outcome, AddOutcome::Added);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_remove_on_absent_file_writes_empty_array() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vacancies.json");
        let storage = JsonFileStorage::new(&path);

        assert_eq!(storage.remove_vacancy("A").await.unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vacancies.json");
        // A directory in place of the file makes the rename fail.
        fs::create_dir(&path).unwrap();
        let storage = JsonFileStorage::new(&path);

        let err = storage.add_vacancy(&vacancy("A")).await.unwrap_err();
        assert!(matches!(err, crate::utils::error::VacancyError::IoError(_)));
        assert!(!temp_dir.path().join("vacancies.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vacancies.json");
        let storage = JsonFileStorage::new(&path);
        storage.add_vacancy(&vacancy("A")).await.unwrap();
        let before = fs::read_to_string(&path).unwrap();

        // Block the temp file so the next write cannot complete.
        fs::create_dir(temp_dir.path().join("vacancies.json.tmp")).unwrap();

        let err = storage.add_vacancy(&vacancy("B")).await.unwrap_err();
        assert!(matches!(err, crate::utils::error::VacancyError::IoError(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);

        let stored = storage.get_vacancies().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name(), Some("A"));
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let storage = JsonFileStorage::new("data/vacancies.json");
        assert_eq!(storage.temp_path(), PathBuf::from("data/vacancies.json.tmp"));
    }
}
