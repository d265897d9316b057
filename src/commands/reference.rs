//! Reference command - Move the reference point to the cursor

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::Env;
use crate::storage::Position;

/// Set the reference point to the current cursor position
pub fn execute(env: &Env) -> Result<Position> {
    let position = env.host.cursor_position()?;
    env.store
        .reference_point()
        .set(position)
        .context("Failed to update the reference point")?;
    println!("{} {}", "Reference point:".green(), position);
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::host::fake::FakeHost;
    use crate::session::Session;
    use crate::storage::PositionStore;

    #[test]
    fn test_reference_follows_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::in_app("Editor", "", Position::ORIGIN);
        host.cursor.set(Position::new(320, 240));
        let env = Env {
            root: dir.path().to_path_buf(),
            store: PositionStore::open(dir.path()),
            settings: Settings::default(),
            session: Session::default(),
            host: &host,
        };

        assert_eq!(execute(&env).unwrap(), Position::new(320, 240));
        assert_eq!(
            env.store.reference_point().get().unwrap(),
            Position::new(320, 240)
        );
    }
}
