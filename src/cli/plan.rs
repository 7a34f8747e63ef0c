//! Plan command: print the asset plan.

use anyhow::Result;

use crate::plan::{ASSET_PLAN, AssetTarget, Encoding, ICO_SIZES};

/// Execute plan command
pub fn print_plan(json: bool) -> Result<()> {
    let output = if json {
        serde_json::to_string_pretty(&ASSET_PLAN)?
    } else {
        format_table(&ASSET_PLAN)
    };
    println!("{output}");
    Ok(())
}

fn format_table(targets: &[AssetTarget]) -> String {
    let width = targets.iter().map(|t| t.name.len()).max().unwrap_or(0);
    targets
        .iter()
        .map(|t| format!("{:<width$}  {:>9}  {}", t.name, size_label(t), t.encoding.extension()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn size_label(target: &AssetTarget) -> String {
    match target.encoding {
        Encoding::Ico => ICO_SIZES
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join("/"),
        _ => format!("{}x{}", target.width, target.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_target() {
        let table = format_table(&ASSET_PLAN);
        assert_eq!(table.lines().count(), ASSET_PLAN.len());
        assert!(table.contains("apple-touch-icon.png"));
        assert!(table.contains("180x180"));
        assert!(table.contains("16/32/48"));
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value = serde_json::to_value(&ASSET_PLAN).unwrap();
        let first = &json[0];
        assert_eq!(first["name"], "web-app-manifest-512x512.png");
        assert_eq!(first["width"], 512);
        assert_eq!(first["encoding"], "png");
        assert_eq!(json[7]["encoding"], "ico");
    }
}
