//! Database connection configuration.
//!
//! The connection is described by a butane [`ConnectionSpec`]. It is read
//! from the `COOK_BLOG_DATABASE` environment variable when set, otherwise
//! from `.butane/connection.json` in the working directory, the file
//! `butane init` writes.

use std::path::{Path, PathBuf};

use butane::db::{Connection, ConnectionSpec};

use crate::Result;

/// Environment variable holding a connection URL, e.g. `sqlite://blog.db`.
pub const DATABASE_ENV: &str = "COOK_BLOG_DATABASE";

/// Directory holding `connection.json`, relative to the working directory.
pub const BUTANE_DIR: &str = ".butane";

/// Resolve the connection spec from the environment or [`BUTANE_DIR`].
pub fn connection_spec() -> Result<ConnectionSpec> {
    let dir = std::env::current_dir()
        .map_err(butane::Error::from)?
        .join(BUTANE_DIR);
    resolve(std::env::var(DATABASE_ENV).ok(), &dir)
}

/// Load the spec saved in `dir`.
pub fn load_connection_spec(dir: impl AsRef<Path>) -> Result<ConnectionSpec> {
    let dir: PathBuf = dir.as_ref().into();
    log::debug!("loading connection spec from {}", dir.display());
    Ok(ConnectionSpec::load(dir)?)
}

fn resolve(env_value: Option<String>, dir: &Path) -> Result<ConnectionSpec> {
    match env_value {
        Some(url) if !url.trim().is_empty() => {
            log::debug!("using connection from {DATABASE_ENV}");
            Ok(ConnectionSpec::try_from(url).map_err(butane::Error::from)?)
        }
        _ => load_connection_spec(dir),
    }
}

/// Connect using [`connection_spec`].
pub fn establish_connection() -> Result<Connection> {
    let spec = connection_spec()?;
    Ok(butane::db::connect(&spec)?)
}
