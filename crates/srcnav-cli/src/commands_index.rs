//! `srcnav index`: extract tables from resolved units and write them as JSON.

use colored::Colorize;
use srcnav_core::{ProgramTables, SrcnavConfig};
use srcnav_index::{manifest, IndexResult, Indexer};
use std::io::Write;
use std::path::{Path, PathBuf};

pub(crate) struct IndexArgs<'a> {
    pub root: &'a Path,
    pub inputs: &'a [PathBuf],
    pub manifest: Option<&'a Path>,
    pub output: Option<&'a Path>,
    pub config: Option<&'a Path>,
    pub pretty: bool,
}

pub(crate) fn cmd_index(args: &IndexArgs<'_>) -> anyhow::Result<()> {
    let indexer = Indexer::new(SrcnavConfig::resolve(args.config, args.root)?);
    let pretty = args.pretty || indexer.config().output.pretty;

    let packages = manifest::load_packages(args.root, args.manifest);
    let inputs = if args.inputs.is_empty() {
        indexer.collect_inputs(args.root)
    } else {
        args.inputs.to_vec()
    };

    eprintln!("Indexing {} unit(s) from {}...", inputs.len(), args.root.display());
    let result = indexer.index_files(&inputs, packages)?;

    let json = render(&result.tables, pretty)?;
    match args.output {
        Some(path) => {
            std::fs::write(path, json.as_bytes())?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    print_summary(&result);
    Ok(())
}

fn render(tables: &ProgramTables, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(tables)?
    } else {
        serde_json::to_string(tables)?
    };
    Ok(json)
}

fn print_summary(result: &IndexResult) {
    eprintln!("{}", "Index summary".bold());
    eprintln!("  Files scanned:  {}", result.files_scanned);
    eprintln!("  Files indexed:  {}", result.files_indexed);
    if result.files_failed > 0 {
        eprintln!("  Files failed:   {}", result.files_failed.to_string().red());
    } else {
        eprintln!("  Files failed:   0");
    }
    eprintln!("  Symbols:        {}", result.stats.symbols);
    eprintln!("  References:     {}", result.stats.references);
    eprintln!("  Packages:       {}", result.tables.packages.len());
    if result.stats.skipped_declarations + result.stats.skipped_references > 0 {
        eprintln!(
            "  {}     {} declarations, {} references",
            "Unresolved:".yellow(),
            result.stats.skipped_declarations,
            result.stats.skipped_references
        );
    }
    for (kind, count) in &result.kind_counts {
        eprintln!("    {:<12} {}", kind.as_str(), count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const UNIT: &str = r#"{
        "path": "lib/main.dart",
        "library": { "uri": "package:app/main.dart" },
        "library_name": "main",
        "declarations": [
            { "kind": "function", "element": { "name": "main", "offset": 5,
              "library": { "uri": "package:app/main.dart" } },
              "return_type": "void",
              "location": { "line": 1, "column": 6 } }
        ]
    }"#;

    #[test]
    fn index_writes_tables_to_output_file() {
        let dir = std::env::temp_dir().join("srcnav_cli_index_test");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("pubspec.yaml"), "name: app\nversion: 1.0.0\n").unwrap();
        fs::write(dir.join("main.unit.json"), UNIT).unwrap();
        let out = dir.join("tables.json");

        cmd_index(&IndexArgs {
            root: &dir,
            inputs: &[],
            manifest: None,
            output: Some(&out),
            config: None,
            pretty: true,
        })
        .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["packages"][0]["name"], "app");
        assert_eq!(written["symbols"][1]["Sig"], "void main()");
        assert_eq!(written["symbols"][1]["External"], false);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn project_config_turns_on_pretty_output() {
        let dir = std::env::temp_dir().join("srcnav_cli_pretty_test");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("srcnav.toml"), "[output]\npretty = true\n").unwrap();
        fs::write(dir.join("main.unit.json"), UNIT).unwrap();
        let out = dir.join("tables.json");

        cmd_index(&IndexArgs {
            root: &dir,
            inputs: &[],
            manifest: None,
            output: Some(&out),
            config: None,
            pretty: false,
        })
        .unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert!(written.contains("\n  \"symbols\""), "expected indented JSON");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn index_without_inputs_fails() {
        let dir = std::env::temp_dir().join("srcnav_cli_empty_test");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let result = cmd_index(&IndexArgs {
            root: &dir,
            inputs: &[],
            manifest: None,
            output: None,
            config: None,
            pretty: false,
        });
        assert!(result.is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
