use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitecraft_editor::{palette as palette_entries, PaletteCategory};

#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn palette(args: PaletteArgs, _cwd: &str) -> Result<()> {
    let entries = palette_entries();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for category in [PaletteCategory::Layout, PaletteCategory::Content, PaletteCategory::WebsiteSpecific] {
        println!("{}", category.label().bold());
        for entry in entries.iter().filter(|e| e.category == category) {
            let scope = if entry.is_cross_tab { " (all tabs)".dimmed() } else { "".normal() };
            println!("  {} {}{}", entry.label, entry.component_type.as_str().cyan(), scope);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_prints() {
        assert!(palette(PaletteArgs { json: false }, ".").is_ok());
        assert!(palette(PaletteArgs { json: true }, ".").is_ok());
    }
}
