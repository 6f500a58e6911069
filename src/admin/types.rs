use serde::{Deserialize, Serialize};

/// JWT claims carried by an admin session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub username: String,
    pub exp: usize,
    pub iat: usize,
}

/// Request payload for the admin login
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// Response carrying the bearer token for admin routes
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub token: String,
}
