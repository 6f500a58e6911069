pub mod handlers;
pub mod middleware;
pub mod token;
pub mod types;

pub use handlers::login;
pub use middleware::admin_auth;
pub use token::TokenConfig;
pub use types::AdminClaims;
