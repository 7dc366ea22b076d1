/// API server middleware
///
/// - `security`: security response headers applied to every response
pub mod security;
