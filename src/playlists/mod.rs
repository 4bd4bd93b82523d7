pub mod handlers;

pub use handlers::playlist_routes;
