/// Database layer for Corkboard
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pooling with a startup probe
/// - `migrations`: embedded schema migration set and runner
///
/// Models live in the `models` module at crate root level; the storage
/// abstraction over this layer lives in `store`.
pub mod migrations;
pub mod pool;
