// handlers/mod.rs - Handler tiers
//
// Public (no auth) → Protected (token auth)
pub mod protected; // Token authentication required (/recipes/*)
pub mod public; // No authentication required (/, /health)
