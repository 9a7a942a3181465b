//! `taskday config`

use crate::error::Result;
use crate::storage::config::{self, Config};

/// Print the effective config; with `init`, also write the defaults.
pub fn execute(init: bool) -> Result<()> {
    let path = config::config_path()?;

    if init {
        if path.exists() {
            println!("Config already exists: {}", path.display());
        } else {
            config::save_config_to(&path, &Config::default())?;
            println!("Wrote default config: {}", path.display());
        }
    }

    let effective = config::load_config_from(&path)?;
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(&effective)?);
    Ok(())
}
