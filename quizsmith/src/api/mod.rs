mod frontend;
mod routes;
mod state;
pub mod uploads;
pub mod v1;

pub use routes::create_router;
pub use state::AppState;
