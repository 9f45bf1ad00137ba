// Authentication and authorization
// Mock auth boundary, session tokens, and the role gate

pub mod gate;
pub mod jwt;
pub mod service;

pub use gate::{authorize, AccessDecision, Gated, Protected};
pub use service::{AuthError, AuthGrant, AuthService, MockAuthService};
