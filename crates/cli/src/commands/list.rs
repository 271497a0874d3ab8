use anyhow::Result;
use pathcopy_core::Config;

use crate::display::format_plugin_line;

pub fn list_command(config: &Config) -> Result<()> {
    let registry = config.build_registry()?;
    for plugin in registry.iter() {
        println!("{}", format_plugin_line(plugin));
    }
    Ok(())
}
