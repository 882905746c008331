// handlers/mod.rs
//
// All routes sit behind basic_auth_middleware; handlers can rely on an
// AuthUser extension being present.
pub mod fallback; // Plain-text 404 for unknown routes and methods
pub mod todo;     // {prefix}/todo and {prefix}/todo/:id

pub use fallback::not_found;
pub use todo::*;
