//! Import/export command handlers

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use quotebook_core::{CodecError, QuoteStore};

use crate::output::Output;

/// Import quotes from a JSON file
///
/// Imported quotes are appended as-is; duplicates are kept.
pub fn import(store: &mut QuoteStore, path: &Path, output: &Output) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file: {:?}", path))?;

    let count = match store.import_json(&text) {
        Ok(count) => count,
        Err(e) if e.downcast_ref::<CodecError>().is_some() => {
            return Err(e.context(format!("Invalid JSON format in {:?}", path)));
        }
        Err(e) => return Err(e),
    };

    output.success(&format!("Quotes imported successfully! ({} new)", count));
    Ok(())
}

/// Export all quotes to a JSON file
pub fn export(store: &QuoteStore, path: &Path, output: &Output) -> Result<()> {
    fs::write(path, store.export_json())
        .with_context(|| format!("Failed to write export file: {:?}", path))?;

    output.success(&format!(
        "Exported {} quotes to {}",
        store.len(),
        path.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{temp_config, temp_store};
    use crate::output::OutputFormat;
    use quotebook_core::{Quote, QuoteStore};
    use tempfile::TempDir;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_export_then_import_into_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = temp_store(&temp_dir);
        let file = temp_dir.path().join("quotes.json");

        export(&store, &file, &quiet()).unwrap();

        let other_dir = TempDir::new().unwrap();
        let mut other = QuoteStore::open_with_seed(temp_config(&other_dir), Vec::new()).unwrap();
        import(&mut other, &file, &quiet()).unwrap();

        assert_eq!(other.quotes(), store.quotes());
    }

    #[test]
    fn test_import_keeps_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);
        let file = temp_dir.path().join("import.json");
        fs::write(
            &file,
            r#"[{"text": "Stay hungry, stay foolish.", "category": "Inspiration"}]"#,
        )
        .unwrap();

        import(&mut store, &file, &quiet()).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(
            store.quotes()[2],
            Quote::new("Stay hungry, stay foolish.", "Inspiration")
        );
    }

    #[test]
    fn test_import_invalid_document() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);
        let file = temp_dir.path().join("bad.json");
        fs::write(&file, r#"{"text": "not in an array"}"#).unwrap();

        let err = import(&mut store, &file, &quiet()).unwrap_err();

        assert!(err.to_string().starts_with("Invalid JSON format"));
        assert!(err.downcast_ref::<CodecError>().is_some());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_import_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);

        let err = import(&mut store, &temp_dir.path().join("missing.json"), &quiet());
        assert!(err.is_err());
    }
}
