//! `render --environment <env>` — load config, apply overrides, write manifests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{
    builder::{PossibleValuesParser, TypedValueParser},
    Args,
};
use colored::Colorize;

use stencil_core::{
    config::{self, IMAGE_TAG_KEY, VERSION_KEY},
    Environment, Overrides,
};
use stencil_renderer::{pipeline, RenderedFile, WriteResult};

/// Render every manifest for one environment.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Environment to render. Selects `<config-dir>/<env>.yaml`.
    #[arg(long, short = 'e', value_name = "ENV", value_parser = environment_parser())]
    pub environment: Environment,

    /// Container image tag; replaces `image_tag` from the config file.
    #[arg(long, short = 't', value_name = "TAG")]
    pub image_tag: Option<String>,

    /// Application version; replaces `version` from the config file.
    #[arg(long, short = 'v', value_name = "VER")]
    pub version: Option<String>,

    /// Root of the rendered output; files land in `<output-dir>/<env>/`.
    #[arg(long, short = 'o', value_name = "DIR", default_value = "rendered")]
    pub output_dir: PathBuf,

    /// Directory holding `<env>.yaml` configuration files.
    #[arg(long, value_name = "DIR", default_value = "config")]
    pub config_dir: PathBuf,

    /// Directory holding the `k8s/` and `argocd/` templates.
    #[arg(long, value_name = "DIR", default_value = "templates")]
    pub template_dir: PathBuf,

    /// Render and report without writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let env = self.environment;
        let mut config = config::load_for(&self.config_dir, env)?;
        config.apply_overrides(&Overrides {
            image_tag: self.image_tag,
            version: self.version,
        });

        let output_dir = self.output_dir.join(env.as_str());
        let unset = || "<unset>".to_string();
        let prefix = if self.dry_run { "[dry-run] " } else { "" };

        println!("{prefix}🚀 Rendering templates for {} environment", env.to_string().bold());
        println!("📁 Output directory: {}", output_dir.display());
        println!(
            "🏷️  Image tag: {}",
            config.get_display(IMAGE_TAG_KEY).unwrap_or_else(unset)
        );
        println!(
            "📦 Version: {}",
            config.get_display(VERSION_KEY).unwrap_or_else(unset)
        );
        println!();

        pipeline::render_all(
            &config,
            &self.template_dir,
            &output_dir,
            self.dry_run,
            |file| print_rendered(file, prefix),
        )
        .context("error rendering templates")?;

        println!();
        println!(
            "{prefix}🎉 {}",
            format!("Successfully rendered all templates for {env}").green()
        );
        Ok(())
    }
}

fn environment_parser() -> impl TypedValueParser<Value = Environment> {
    PossibleValuesParser::new(Environment::all().iter().map(Environment::as_str))
        .try_map(|s| s.parse::<Environment>())
}

fn print_rendered(file: &RenderedFile, prefix: &str) {
    let note = match &file.write {
        WriteResult::Written { .. } | WriteResult::WouldWrite { .. } => String::new(),
        WriteResult::Unchanged { .. } => " (unchanged)".dimmed().to_string(),
    };
    println!(
        "{prefix}✅ Rendered {} → {}{note}",
        file.template,
        display_path(&file.path),
    );
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
