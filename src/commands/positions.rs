//! Store, update, remove and go-to commands
//!
//! Each returns `Ok(false)` when the failure was already reported to the user
//! through the host.

use anyhow::{Context as _, Result};
use owo_colors::OwoColorize;
use tracing::error;

use super::Env;
use crate::session;
use crate::storage::StoreError;

/// Store the cursor position under `name` for the active storage context
pub fn store(env: &Env, name: &str) -> Result<bool> {
    let window = env.host.active_window()?;
    let context = session::storage_context(&env.settings, &window);

    // Reject before the cursor is read or the reference point is created
    if env.store.find_exact(name, &context)?.is_some() {
        tell_use_update(env, name);
        return Ok(false);
    }

    let relativity = env.settings.relativity;
    let position = env
        .store
        .resolve_for_write(env.host.cursor_position()?, relativity, env.host)?;

    match env.store.store(name, &context, position, relativity) {
        Ok(path) => {
            println!("{} {} -> {}", "Stored:".green(), name, path.display());
            Ok(true)
        }
        Err(StoreError::AlreadyExists { .. }) => {
            tell_use_update(env, name);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Overwrite the position stored under `name` for the active storage context
pub fn update(env: &Env, name: &str) -> Result<bool> {
    let window = env.host.active_window()?;
    let context = session::storage_context(&env.settings, &window);

    if env.store.find_exact(name, &context)?.is_none() {
        tell_position_unavailable(env, name);
        return Ok(false);
    }

    let relativity = env.settings.relativity;
    let position = env
        .store
        .resolve_for_write(env.host.cursor_position()?, relativity, env.host)?;

    match env.store.update(name, &context, position, relativity) {
        Ok(path) => {
            println!("{} {} -> {}", "Updated:".green(), name, path.display());
            Ok(true)
        }
        Err(StoreError::NotFound { .. }) => {
            tell_position_unavailable(env, name);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Remove the best matching position stored under `name`
pub fn remove(env: &Env, name: &str) -> Result<bool> {
    let window = env.host.active_window()?;
    let context = env.session.lookup_context(&env.settings, &window);

    match env.store.remove(name, &context) {
        Ok(_) => {
            env.host
                .notify(&format!("Removed position {name} from the active context"));
            Ok(true)
        }
        Err(StoreError::NotFound { .. }) => {
            tell_position_unavailable(env, name);
            Ok(false)
        }
        Err(StoreError::InvalidDeleteTarget(path)) => {
            env.host.notify(&format!(
                "Warning! Refused to remove {} because it is outside the position storage",
                path.display()
            ));
            Ok(false)
        }
        Err(e @ StoreError::Io { .. }) => {
            error!(error = %e, "removal failed");
            env.host
                .notify(&format!("Error! Could not remove position {name}!"));
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Move the cursor to the best matching position stored under `name`
pub fn go(env: &Env, name: &str) -> Result<bool> {
    let window = env.host.active_window()?;
    let context = env.session.lookup_context(&env.settings, &window);

    let Some(found) = env.store.best_match(name, &context)? else {
        tell_position_unavailable(env, name);
        return Ok(false);
    };

    let target = env
        .store
        .resolve_for_read(&found.record, env.host)
        .with_context(|| format!("Failed to resolve: {}", found.path.display()))?;
    env.host.move_cursor(target)?;
    Ok(true)
}

fn tell_use_update(env: &Env, name: &str) {
    env.host.notify(&format!(
        "Cannot overwrite position {name} with this command. Instead use update {name}"
    ));
}

fn tell_position_unavailable(env: &Env, name: &str) {
    env.host.notify(&format!(
        "The position {name} does not exist in an active context!"
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::{CliHost, HostArgs};
    use crate::config::{self, Settings};
    use crate::host::fake::FakeHost;
    use crate::session::Session;
    use crate::storage::{Context, Position, PositionStore, Record, Relativity};

    fn env<'a>(root: &std::path::Path, host: &'a dyn crate::host::Host) -> Env<'a> {
        Env {
            root: root.to_path_buf(),
            store: PositionStore::open(root),
            settings: Settings::default(),
            session: Session::default(),
            host,
        }
    }

    #[test]
    fn test_store_then_go() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::in_app("Editor", "main.rs", Position::ORIGIN);
        host.cursor.set(Position::new(100, 200));
        let env = env(dir.path(), &host);

        assert!(store(&env, "home").unwrap());
        host.cursor.set(Position::ORIGIN);
        assert!(go(&env, "home").unwrap());

        assert_eq!(*host.moves.borrow(), vec![Position::new(100, 200)]);
    }

    #[test]
    fn test_store_twice_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::in_app("Editor", "main.rs", Position::ORIGIN);
        let env = env(dir.path(), &host);

        assert!(store(&env, "home").unwrap());
        assert!(!store(&env, "home").unwrap());

        let notifications = host.notifications.borrow();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].contains("update home"));
    }

    #[test]
    fn test_update_moves_target() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::in_app("Editor", "main.rs", Position::ORIGIN);
        let env = env(dir.path(), &host);

        host.cursor.set(Position::new(100, 200));
        store(&env, "home").unwrap();
        host.cursor.set(Position::new(300, 400));
        assert!(update(&env, "home").unwrap());

        go(&env, "home").unwrap();
        assert_eq!(host.moves.borrow().last(), Some(&Position::new(300, 400)));
    }

    #[test]
    fn test_update_missing_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::in_app("Editor", "main.rs", Position::ORIGIN);
        let env = env(dir.path(), &host);

        assert!(!update(&env, "home").unwrap());
        assert!(host.notifications.borrow()[0].contains("does not exist"));
    }

    #[test]
    fn test_window_relative_store_follows_window() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::in_app("Editor", "main.rs", Position::new(1000, 500));
        let mut env = env(dir.path(), &host);
        env.settings.relativity = Relativity::Window;

        host.cursor.set(Position::new(1010, 520));
        store(&env, "button").unwrap();

        host.window.borrow_mut().top_left = Some(Position::new(0, 0));
        go(&env, "button").unwrap();
        assert_eq!(host.moves.borrow().last(), Some(&Position::new(10, 20)));
    }

    #[test]
    fn test_go_uses_manual_mode() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::in_app("Editor", "main.rs", Position::ORIGIN);
        let mut env = env(dir.path(), &host);
        env.store
            .store("home", &Context::new("", "", "nav"), Position::new(7, 7), Relativity::Absolute)
            .unwrap();

        assert!(!go(&env, "home").unwrap());

        env.session.set_mode("nav");
        assert!(go(&env, "home").unwrap());
        assert_eq!(*host.moves.borrow(), vec![Position::new(7, 7)]);
    }

    #[test]
    fn test_go_reports_record_without_position() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::in_app("Editor", "main.rs", Position::ORIGIN);
        let env = env(dir.path(), &host);
        let name_dir = env.store.name_directory("home").unwrap();
        std::fs::create_dir_all(&name_dir).unwrap();
        std::fs::write(name_dir.join("0.txt"), "app:Editor\n").unwrap();

        assert!(go(&env, "home").is_err());
        assert!(host.moves.borrow().is_empty());
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::in_app("Editor", "main.rs", Position::ORIGIN);
        let env = env(dir.path(), &host);
        let path = env
            .store
            .store("home", &Context::new("Editor", "", ""), Position::ORIGIN, Relativity::Absolute)
            .unwrap();

        assert!(remove(&env, "home").unwrap());
        assert!(!path.exists());
        assert!(Record::read(&path).is_err());

        assert!(!remove(&env, "home").unwrap());
        assert!(host.notifications.borrow()[1].contains("does not exist"));
    }

    #[test]
    fn test_rejected_store_leaves_reference_point_alone() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::in_app("Editor", "main.rs", Position::ORIGIN);
        let mut env = env(dir.path(), &host);
        env.settings.relativity = Relativity::MousePoint;
        env.store
            .store("home", &Context::new("Editor", "", ""), Position::new(1, 1), Relativity::Absolute)
            .unwrap();

        assert!(!store(&env, "home").unwrap());

        assert!(!config::data_dir(dir.path()).exists());
        assert!(host.notifications.borrow()[0].contains("update home"));
    }

    #[test]
    fn test_missing_update_leaves_reference_point_alone() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::in_app("Editor", "main.rs", Position::ORIGIN);
        let mut env = env(dir.path(), &host);
        env.settings.relativity = Relativity::MousePoint;

        assert!(!update(&env, "home").unwrap());
        assert!(!config::data_dir(dir.path()).exists());
    }

    #[test]
    fn test_update_does_not_overwrite_global_position() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::in_app("Editor", "main.rs", Position::ORIGIN);
        let env = env(dir.path(), &host);
        let global = env
            .store
            .store("home", &Context::default(), Position::new(1, 1), Relativity::Absolute)
            .unwrap();

        host.cursor.set(Position::new(9, 9));
        assert!(!update(&env, "home").unwrap());

        let record = Record::read(&global).unwrap();
        assert_eq!(record.position, Some(Position::new(1, 1)));
    }

    #[test]
    fn test_window_store_needs_window_origin() {
        let dir = tempfile::tempdir().unwrap();
        let host = CliHost::new(HostArgs {
            cursor: Some(Position::new(10, 20)),
            app: Some("Editor".into()),
            ..HostArgs::default()
        });
        let mut env = env(dir.path(), &host);
        env.settings.relativity = Relativity::Window;

        assert!(store(&env, "button").is_err());
        assert!(env.store.records("button").unwrap().is_empty());

        env.settings.relativity = Relativity::Absolute;
        assert!(store(&env, "button").unwrap());
    }
}
