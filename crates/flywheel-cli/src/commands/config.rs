use anyhow::Result;

use flywheel_core::AppConfig;

/// Print the config path and the active values
pub fn show(config: &AppConfig) -> Result<()> {
    let path = AppConfig::config_path()?;
    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not present, showing defaults)", path.display());
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Write the default configuration file
pub fn init() -> Result<()> {
    let path = AppConfig::config_path()?;
    if path.exists() {
        anyhow::bail!("config already exists at {}", path.display());
    }
    AppConfig::default().save()?;
    println!("wrote {}", path.display());
    Ok(())
}
