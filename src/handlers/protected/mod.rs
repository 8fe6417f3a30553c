// handlers/protected/mod.rs - Protected handlers (token authentication required)
//
// Middleware: token_auth_middleware resolves the Authorization header to an
// AuthUser before any handler here runs. Ownership checks happen per handler.

pub mod recipes;

pub use recipes::*;
