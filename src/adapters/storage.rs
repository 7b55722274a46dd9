use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        Ok(tokio::fs::read(full_path).await?)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    fn resolve(&self, path: &str) -> String {
        Path::new(&self.base_path).join(path).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_string_lossy());

        storage.write_file("data/raw.csv", b"bedrooms\n1\n").await.unwrap();
        let read = storage.read_file("data/raw.csv").await.unwrap();

        assert_eq!(read, b"bedrooms\n1\n");
        assert!(storage.resolve("data/raw.csv").ends_with("raw.csv"));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_string_lossy());

        let result = tokio_test::block_on(storage.read_file("models/rental_model.json"));
        assert!(matches!(result, Err(crate::utils::error::RentError::IoError(_))));
    }
}
