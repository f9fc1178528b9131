use std::fs;
use std::path::Path;

use travelseed_core::EntityIdStrategy;
use travelseed_generate::GenerateOptions;

use crate::CliError;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionOverrides {
    pub entity_ids: Option<EntityIdStrategy>,
    pub ordinal_base: Option<u32>,
}

pub fn load_options(
    path: Option<&Path>,
    overrides: OptionOverrides,
) -> Result<GenerateOptions, CliError> {
    let options = match path {
        Some(path) => {
            let options = parse_options(&fs::read_to_string(path)?)?;
            tracing::info!(event = "config_loaded", path = %path.display());
            options
        }
        None => GenerateOptions::default(),
    };
    let options = apply_overrides(options, overrides);
    options.validate()?;
    Ok(options)
}

fn parse_options(text: &str) -> Result<GenerateOptions, toml::de::Error> {
    toml::from_str(text)
}

fn apply_overrides(mut options: GenerateOptions, overrides: OptionOverrides) -> GenerateOptions {
    if let Some(entity_ids) = overrides.entity_ids {
        options.entity_ids = entity_ids;
    }
    if let Some(ordinal_base) = overrides.ordinal_base {
        options.ordinal_base = ordinal_base;
    }
    options
}
