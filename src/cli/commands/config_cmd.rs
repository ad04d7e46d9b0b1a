//! config command - Print the effective policy configuration

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;

/// Print the effective (or default) configuration as TOML.
pub fn show(ctx: &Context, defaults: bool) -> Result<()> {
    let config = if defaults {
        Config::default()
    } else {
        ctx.load_config()?
    };

    let rendered = config
        .to_toml_string()
        .context("Failed to render configuration")?;
    print!("{}", rendered);

    Ok(())
}
