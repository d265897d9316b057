//! Mode command - Manage the manually set mode of the session

use anyhow::Result;
use owo_colors::OwoColorize;

use super::Env;
use crate::config;

/// Set the manual mode, overriding the default mode for lookups
pub fn set(env: &mut Env, mode: &str) -> Result<()> {
    env.session.set_mode(mode);
    env.session.save(&config::data_dir(&env.root))?;
    println!("{} {}", "Mode:".green(), env.session.lookup_mode(&env.settings));
    Ok(())
}

/// Drop the manual mode and fall back to the default mode
pub fn clear(env: &mut Env) -> Result<()> {
    env.session.clear_mode();
    env.session.save(&config::data_dir(&env.root))?;
    println!("{} {}", "Mode:".green(), describe(env));
    Ok(())
}

pub fn show(env: &Env) -> String {
    describe(env)
}

fn describe(env: &Env) -> String {
    let mode = env.session.lookup_mode(&env.settings);
    let source = if env.session.manual_mode.is_some() {
        "manual"
    } else {
        "default"
    };
    if mode.is_empty() {
        format!("(none, {source})")
    } else {
        format!("{mode} ({source})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::host::fake::FakeHost;
    use crate::session::Session;
    use crate::storage::{Position, PositionStore};

    #[test]
    fn test_mode_persists_in_session() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::in_app("Editor", "", Position::ORIGIN);
        let mut env = Env {
            root: dir.path().to_path_buf(),
            store: PositionStore::open(dir.path()),
            settings: Settings::default(),
            session: Session::default(),
            host: &host,
        };

        set(&mut env, "nav").unwrap();
        assert_eq!(show(&env), "nav (manual)");
        let reloaded = Session::load(&config::data_dir(dir.path())).unwrap();
        assert_eq!(reloaded.manual_mode.as_deref(), Some("nav"));

        clear(&mut env).unwrap();
        assert_eq!(show(&env), "(none, default)");
        let reloaded = Session::load(&config::data_dir(dir.path())).unwrap();
        assert_eq!(reloaded.manual_mode, None);
    }
}
