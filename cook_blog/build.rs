fn main() {
    // The #[model] attribute writes the current schema into .butane/ while the
    // crate compiles. Remove the stale copy first so dropped models and fields
    // do not linger in the migration state the tests build from.
    let dir = ".butane/";
    println!("cargo:rerun-if-changed={dir}");
    if std::path::Path::new(&dir).is_dir() {
        std::fs::remove_dir_all(dir).unwrap();
    }
}
