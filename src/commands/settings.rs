//! Config command - Show or change settings

use anyhow::Result;
use owo_colors::OwoColorize;

use super::Env;

pub fn show(env: &Env) -> Result<String> {
    Ok(serde_json::to_string_pretty(&env.settings)?)
}

pub fn set(env: &mut Env, key: &str, value: &str) -> Result<()> {
    env.settings.set(key, value)?;
    env.settings.save(&env.root)?;
    println!("{} {} = {}", "Saved:".green(), key, value);
    Ok(())
}
