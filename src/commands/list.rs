//! List command - Show stored positions

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use crate::storage::PositionStore;

/// List every record, or only the records of `name`
pub fn execute(store: &PositionStore, name: Option<&str>) -> Result<String> {
    let names = match name {
        Some(name) => vec![name.to_string()],
        None => store.names().context("Failed to list stored names")?,
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name"),
        Cell::new("File"),
        Cell::new("Context"),
        Cell::new("Position"),
        Cell::new("Relativity"),
        Cell::new("Specificity"),
    ]);

    let mut count = 0;
    for name in &names {
        let records = store
            .records(name)
            .with_context(|| format!("Failed to read records of {name}"))?;
        for stored in records {
            let file = stored
                .path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();
            let position = stored
                .record
                .position
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());

            table.add_row(vec![
                Cell::new(name),
                Cell::new(file),
                Cell::new(stored.record.context.to_string()),
                Cell::new(position),
                Cell::new(stored.record.relativity.to_string()),
                Cell::new(stored.record.context.specificity().to_string()),
            ]);
            count += 1;
        }
    }

    if count == 0 {
        return Ok("No stored positions.".to_string());
    }

    let mut output = table.to_string();
    output.push_str(&format!("\n\n{} position(s) found", count));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Context, Position, Relativity};

    #[test]
    fn test_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = PositionStore::open(dir.path());
        assert_eq!(execute(&store, None).unwrap(), "No stored positions.");
    }

    #[test]
    fn test_lists_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = PositionStore::open(dir.path());
        store
            .store("home", &Context::new("Editor", "", "nav"), Position::new(1, 2), Relativity::Window)
            .unwrap();
        store
            .store("away", &Context::default(), Position::new(3, 4), Relativity::Absolute)
            .unwrap();

        let output = execute(&store, None).unwrap();
        assert!(output.contains("app=Editor, mode=nav"));
        assert!(output.contains("(1, 2)"));
        assert!(output.contains("WINDOW"));
        assert!(output.contains("2 position(s) found"));

        let output = execute(&store, Some("away")).unwrap();
        assert!(output.contains("(3, 4)"));
        assert!(!output.contains("(1, 2)"));
    }
}
