pub mod response;
pub mod router;
pub mod routes;
pub mod server;
