// Catalog document parsing
//
// Document shape: { "<catalog>": { "<category/path>": [ { name, path?, paths? } ] } }
// Only the first top-level catalog is read.

use super::{Catalog, CategoryPath, Item};
use crate::error::CatalogError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let document: Map<String, Value> = serde_json::from_str(json)?;
    let (name, body) = document.into_iter().next().ok_or(CatalogError::Empty)?;

    let Value::Object(categories) = body else {
        return Err(CatalogError::UnexpectedShape(format!(
            "catalog {name:?} is not an object"
        )));
    };

    let mut entries = Vec::with_capacity(categories.len());
    for (raw_path, raw_items) in categories {
        let path = CategoryPath::parse(&raw_path)?;
        let items: Vec<Item> = serde_json::from_value(raw_items)?;
        entries.push((path, items));
    }

    log::debug!("Parsed catalog {:?} with {} categories", name, entries.len());
    Ok(Catalog::new(name, entries))
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&contents)?;
    log::info!(
        "Loaded catalog {:?} from {} ({} categories)",
        catalog.name(),
        path.display(),
        catalog.len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOC: &str = r#"{
        "examples": {
            "hooks/use-ref": [{ "name": "useRef", "path": "hooks/use-ref/App_hooks-use-ref.tsx" }],
            "component-snippets/modal": [
                { "name": "Overlay", "paths": ["component-snippets/modal/overlay.css", "component-snippets/modal/App_overlay.tsx"] }
            ],
            "dynamic-load": []
        },
        "ignored": { "x": [] }
    }"#;

    #[test]
    fn test_parse_keeps_document_order() {
        let catalog = parse_catalog(DOC).unwrap();
        assert_eq!(catalog.name(), "examples");
        let keys: Vec<&str> = catalog.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["hooks/use-ref", "component-snippets/modal", "dynamic-load"]);

        let overlay = &catalog.items("component-snippets/modal").unwrap()[0];
        assert_eq!(overlay.path, None);
        assert_eq!(overlay.paths.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_catalog("{}"), Err(CatalogError::Empty)));
        assert!(matches!(
            parse_catalog(r#"{"examples": []}"#),
            Err(CatalogError::UnexpectedShape(_))
        ));
        assert!(matches!(
            parse_catalog(r#"{"examples": {"a//b": []}}"#),
            Err(CatalogError::InvalidCategoryPath(_))
        ));
        assert!(matches!(parse_catalog("not json"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOC.as_bytes()).unwrap();
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);

        let missing = load_catalog(Path::new("/definitely/not/here.json"));
        assert!(matches!(missing, Err(CatalogError::Io { .. })));
    }
}
