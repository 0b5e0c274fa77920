use crate::config::PlatformTemplate;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and validate a platform template from a YAML file
pub fn load_template(template_path: &Path) -> Result<PlatformTemplate> {
    info!("Loading platform template from: {:?}", template_path);

    let file = File::open(template_path)
        .wrap_err_with(|| format!("Failed to open template '{}'", template_path.display()))?;

    let template: PlatformTemplate = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse template '{}'", template_path.display()))?;

    template.validate()?;

    Ok(template)
}

/// Use the template file when given, otherwise the built-in defaults
pub fn load_template_or_default(template_path: Option<&Path>) -> Result<PlatformTemplate> {
    match template_path {
        Some(path) => load_template(path),
        None => {
            info!("Using built-in platform template");
            Ok(PlatformTemplate::default())
        }
    }
}
