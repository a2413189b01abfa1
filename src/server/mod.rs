pub mod app;
mod deserializers;
mod routes;

pub use routes::ApiError;
