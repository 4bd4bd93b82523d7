pub mod dto;
pub mod handlers;
pub mod jwt;

pub use handlers::auth_routes;
pub use jwt::CurrentUser;
