use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use sitecraft_editor::{Document, Mutation, MutationResult};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Site file to edit
    pub file: PathBuf,

    /// JSON array of mutations to apply in order
    #[arg(short, long)]
    pub mutations: PathBuf,

    /// Write the result here instead of back to the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Counts reported after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub applied: usize,
    pub noops: usize,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    println!("✏️  {} {}", "Applying".green().bold(), args.mutations.display());

    let summary = run(&args, cwd)?;

    println!();
    println!(
        "✨ {} {} applied, {} no-op",
        "Done".green().bold(),
        summary.applied.to_string().green(),
        summary.noops.to_string().yellow()
    );
    Ok(())
}

pub fn run(args: &ApplyArgs, cwd: &str) -> Result<ApplySummary> {
    let config = Config::load(cwd)?;
    let site_path = PathBuf::from(cwd).join(&args.file);
    let mutations_path = PathBuf::from(cwd).join(&args.mutations);

    let mut doc = Document::load(site_path.clone(), config.editor_options())?;

    let source = fs::read_to_string(&mutations_path)
        .with_context(|| format!("Cannot read mutations from {}", mutations_path.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid mutation list in {}", mutations_path.display()))?;

    let mut summary = ApplySummary::default();
    for (index, mutation) in mutations.into_iter().enumerate() {
        let name = mutation.name();
        match doc.apply(mutation) {
            MutationResult::Applied { version } => {
                summary.applied += 1;
                debug!(index, mutation = name, version, "applied");
                println!("  {} #{} {}", "✓".green(), index, name);
            }
            MutationResult::Noop { reason } => {
                summary.noops += 1;
                println!("  {} #{} {} - {}", "⚠".yellow(), index, name, reason);
            }
        }
    }

    match &args.output {
        Some(output) => doc.save_as(PathBuf::from(cwd).join(output))?,
        None => doc.save()?,
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecraft_model::WebsiteData;

    fn setup() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let site = WebsiteData::single_tab("home", "Home");
        fs::write(dir.path().join("site.json"), site.to_json_pretty().unwrap()).unwrap();
        dir
    }

    fn args(output: Option<&str>) -> ApplyArgs {
        ApplyArgs {
            file: PathBuf::from("site.json"),
            mutations: PathBuf::from("edits.json"),
            output: output.map(PathBuf::from),
        }
    }

    #[test]
    fn test_apply_counts_and_saves() {
        let dir = setup();
        let edits = r#"[
            { "InsertComponent": { "component": { "id": "col", "type": "column", "children": [] } } },
            { "InsertComponent": { "component": { "id": "hello", "type": "title" }, "parent_id": "col" } },
            { "UpdateProps": { "component_id": "hello", "props": { "text": "Hello" } } },
            { "RemoveComponent": { "component_id": "missing" } },
            { "AddTab": { "tab_id": "about", "label": "About" } }
        ]"#;
        fs::write(dir.path().join("edits.json"), edits).unwrap();

        let summary = run(&args(None), &dir.path().display().to_string()).unwrap();
        assert_eq!(summary, ApplySummary { applied: 4, noops: 1 });

        let saved = WebsiteData::from_json(&fs::read_to_string(dir.path().join("site.json")).unwrap()).unwrap();
        assert_eq!(saved.tabs.len(), 2);
        assert_eq!(saved.active_tab_id, "about");
        let col = &saved.tab("home").unwrap().content[0];
        assert_eq!(col.children()[0].props.get_str("text"), Some("Hello"));
    }

    #[test]
    fn test_apply_to_separate_output() {
        let dir = setup();
        fs::write(
            dir.path().join("edits.json"),
            r#"[{ "SetTabSticky": { "sticky": true } }]"#,
        )
        .unwrap();

        run(&args(Some("out.json")), &dir.path().display().to_string()).unwrap();

        let original = fs::read_to_string(dir.path().join("site.json")).unwrap();
        let written = fs::read_to_string(dir.path().join("out.json")).unwrap();
        assert!(!original.contains("tabSticky"));
        assert!(written.contains("\"tabSticky\": true"));
    }

    #[test]
    fn test_apply_rejects_bad_mutation_list() {
        let dir = setup();
        fs::write(dir.path().join("edits.json"), r#"{ "not": "a list" }"#).unwrap();

        assert!(run(&args(None), &dir.path().display().to_string()).is_err());
    }
}
