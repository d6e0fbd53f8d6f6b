use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write a generated dataset (or any artifact) to disk atomically.
///
/// The content goes to a temporary file in the target directory first,
/// then is persisted (renamed) over the final path. A reader therefore
/// never observes a half-written customers.csv or products.json.
/// Missing parent directories are created, so the generator can write
/// straight into a fresh `data/` folder.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if !parent.exists() {
        fs::create_dir_all(parent).map_err(InfrastructureError::Io)?;
    }

    // Temp file must live in the same directory: rename is only atomic
    // within one filesystem.
    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(InfrastructureError::Io)?;

    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_missing_parent() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("data").join("customers.csv");

        atomic_write(&file_path, "customer_id,name\n1,Customer_1\n")?;

        assert!(file_path.exists());
        Ok(())
    }

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("products.json");

        atomic_write(&file_path, "[]")?;
        atomic_write(&file_path, "[{\"product_id\":1}]")?;

        let read_content = fs::read_to_string(file_path)?;
        assert_eq!(read_content, "[{\"product_id\":1}]");
        Ok(())
    }
}
