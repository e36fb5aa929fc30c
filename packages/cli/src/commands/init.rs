use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitecraft_model::WebsiteData;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Site file to create (defaults to the configured output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Force overwrite an existing site file
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let site_path = config.resolve(cwd, args.output.as_ref());

    if site_path.exists() && !args.force {
        println!("{} {} already exists", "⚠️".yellow(), site_path.display().to_string().bright_white());
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Sitecraft site...".bright_blue().bold());

    if let Some(parent) = site_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            println!("  {} Created {}/", "✓".green(), parent.display());
        }
    }

    let forest = WebsiteData::default();
    fs::write(&site_path, forest.to_json_pretty()?)?;
    println!("  {} Created {}", "✓".green(), site_path.display());

    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);
    if !config_path.exists() {
        fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    println!();
    println!("{}", "✅ Site initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: sitecraft inspect {}", site_path.display());
    println!("  2. Run: sitecraft apply {} --mutations edits.json", site_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cwd_of(dir: &tempfile::TempDir) -> String {
        dir.path().display().to_string()
    }

    #[test]
    fn test_init_writes_default_site_and_config() {
        let dir = tempfile::tempdir().unwrap();
        init(InitArgs { output: None, force: false }, &cwd_of(&dir)).unwrap();

        let text = fs::read_to_string(dir.path().join("site.json")).unwrap();
        let forest = WebsiteData::from_json(&text).unwrap();
        assert_eq!(forest, WebsiteData::default());
        assert!(dir.path().join(DEFAULT_CONFIG_NAME).exists());
    }

    #[test]
    fn test_init_keeps_existing_site_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let site = dir.path().join("site.json");
        fs::write(&site, "keep me").unwrap();

        init(InitArgs { output: None, force: false }, &cwd_of(&dir)).unwrap();
        assert_eq!(fs::read_to_string(&site).unwrap(), "keep me");

        init(InitArgs { output: None, force: true }, &cwd_of(&dir)).unwrap();
        assert!(WebsiteData::from_json(&fs::read_to_string(&site).unwrap()).is_ok());
    }

    #[test]
    fn test_init_custom_output_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            output: Some(PathBuf::from("pages/landing.json")),
            force: false,
        };
        init(args, &cwd_of(&dir)).unwrap();
        assert!(dir.path().join("pages/landing.json").exists());
    }
}
