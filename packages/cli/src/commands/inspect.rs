use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitecraft_editor::{layer_outline, Document, LayerEntry};
use sitecraft_model::{NodeCounter, Visitor};
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Site file to inspect (defaults to the configured output)
    pub file: Option<PathBuf>,
}

pub fn inspect(args: InspectArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = config.resolve(cwd, args.file.as_ref());
    let doc = Document::load(path.clone(), config.editor_options())?;

    println!("🔍 {} {}", "Inspecting".green().bold(), path.display());
    println!();
    print!("{}", report(&doc)?);

    Ok(())
}

/// Tab bar, cross-tab region and per-tab layer outlines
pub fn report(doc: &Document) -> Result<String> {
    let forest = doc.forest();
    let mut out = String::new();

    let mut all = NodeCounter::default();
    all.visit_forest(forest);
    let mut visible = NodeCounter {
        visible_only: true,
        count: 0,
    };
    visible.visit_forest(forest);
    writeln!(out, "{} components ({} visible)", all.count, visible.count)?;
    writeln!(out)?;

    writeln!(out, "{}", "Tabs".bold())?;
    for tab in &forest.tabs {
        let marker = if tab.id == forest.active_tab_id { "▶".green() } else { " ".normal() };
        let status = if tab.enabled { "".normal() } else { " (disabled)".dimmed() };
        writeln!(out, "  {} {}. {} [{}]{}", marker, tab.position, tab.label, tab.id.cyan(), status)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Cross-tab".bold())?;
    write_layers(&mut out, &doc.cross_tab_layers())?;

    for tab in &forest.tabs {
        writeln!(out)?;
        writeln!(out, "{} {}", "Tab".bold(), tab.label.bold())?;
        write_layers(&mut out, &layer_outline(&tab.content, doc.selection()))?;
    }

    Ok(out)
}

fn write_layers(out: &mut String, layers: &[LayerEntry]) -> std::fmt::Result {
    if layers.is_empty() {
        return writeln!(out, "  {}", "(empty)".dimmed());
    }

    for layer in layers {
        let indent = "  ".repeat(layer.depth + 1);
        let line = format!("{}{} [{}]", indent, layer.label, layer.id);
        if layer.enabled {
            writeln!(out, "{}", line)?;
        } else {
            writeln!(out, "{} {}", line.dimmed(), "(disabled)".dimmed())?;
        }
    }
    Ok(())
}
