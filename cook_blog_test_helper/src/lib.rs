//! Test helpers to set up database connections for `cook_blog`.
//!
//! Every test gets its own in-memory SQLite database. The schema is built
//! from the "current" migration state that butane's `#[model]` attribute
//! writes under `.butane/migrations` while the model crate compiles, so the
//! tests always run against the models as they are in the source tree.
#![deny(missing_docs)]

extern crate alloc;

use butane::db::{get_backend, Backend, BackendConnection, Connection, ConnectionSpec};
use butane::migrations::{self, MemMigrations, Migration, Migrations, MigrationsMut};

// Re-exported for use by `blog_test!`.
#[doc(hidden)]
pub use paste;

/// Backend name used by every helper in this crate.
pub const BACKEND_NAME: &str = "sqlite";

/// Create a [`MemMigrations`] holding a single migration from an empty
/// database to the "current" schema found on disk.
pub fn create_current_migrations(backend: Box<dyn Backend>) -> MemMigrations {
    let mut root = std::env::current_dir().unwrap();
    root.push(".butane/migrations");
    let mut disk_migrations = migrations::from_root(&root);
    let disk_current = disk_migrations.current();
    log::info!("loading migrations from {:?}", disk_current);
    // Copy into memory so concurrently running tests never write to disk.
    let mut mem_migrations = MemMigrations::new();
    let mem_current = mem_migrations.current();

    migrations::copy_migration(disk_current, mem_current).unwrap();

    assert!(
        disk_current.db().unwrap().tables().count() != 0,
        "No tables to migrate"
    );

    assert!(
        mem_migrations
            .create_migration(&nonempty::nonempty![backend], "init", None)
            .expect("expected to create migration without error"),
        "expected to create migration"
    );
    mem_migrations
}

/// Populate the database schema.
pub fn setup_db(conn: &mut Connection) {
    let mem_migrations = create_current_migrations(conn.backend());
    log::info!("created current migration");
    mem_migrations.migrate(conn).unwrap();
}

/// Create an empty in-memory SQLite [`Connection`] without any schema.
pub fn sqlite_connection() -> Connection {
    let backend = get_backend(BACKEND_NAME).expect("sqlite backend is not enabled");
    backend.connect(":memory:").unwrap()
}

/// [`ConnectionSpec`] for an in-memory SQLite database.
pub fn sqlite_connspec() -> ConnectionSpec {
    ConnectionSpec::new(BACKEND_NAME, ":memory:")
}

/// Run `test` against a fresh, migrated in-memory database.
pub fn run_sqlite_test(test: impl FnOnce(Connection)) {
    env_logger::try_init().ok();
    log::info!("connecting to sqlite memory database..");
    let mut conn = sqlite_connection();
    setup_db(&mut conn);
    log::info!("running sqlite test");
    test(conn);
}

/// Declare a `#[test]` named `<fname>_sqlite` which calls `fname` with a
/// migrated connection.
///
/// ```ignore
/// fn saves_a_tag(conn: Connection) { /* ... */ }
/// blog_test!(saves_a_tag);
/// ```
#[macro_export]
macro_rules! blog_test {
    ($fname:ident) => {
        $crate::paste::item! {
            #[test]
            fn [<$fname _sqlite>]() {
                $crate::run_sqlite_test($fname);
            }
        }
    };
}
