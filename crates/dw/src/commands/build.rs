//! `dw build` command implementation.

use std::path::PathBuf;

use clap::Args;

use dw_images::InMemoryAssetRegistry;
use dw_render::HtmlPageRenderer;
use dw_site::{Config, SectionBuild, SiteBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file.
    #[arg(short, long, default_value = "docweave.toml")]
    config: PathBuf,

    /// Build a single section instead of all configured sections.
    #[arg(short, long)]
    section: Option<String>,

    /// Enable verbose output (show per-section build logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any section build fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(&self.config)?;
        // Assets are checked on disk; a populated registry is only wired in
        // when building through the library API.
        let registry = InMemoryAssetRegistry::new();
        let renderer = HtmlPageRenderer::new();
        let builder = SiteBuilder::new(&config, &registry, &renderer);

        let built = match self.section {
            Some(name) => {
                let build = builder.build_section(&name)?;
                vec![(name, build)]
            }
            None => builder.build_all()?,
        };

        for (name, build) in &built {
            output.info(&describe(name, build));
        }
        output.success(&format!(
            "Built {} section(s), navigation written to {}",
            built.len(),
            config.nav_dir.display()
        ));
        Ok(())
    }
}

fn describe(name: &str, build: &SectionBuild) -> String {
    format!(
        "  {name}: {} top-level entries, {} images",
        build.nav.len(),
        build.images.len()
    )
}
