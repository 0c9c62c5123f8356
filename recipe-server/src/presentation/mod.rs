pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod representation;
pub mod routes;
#[cfg(test)]
pub mod test_support;
pub mod utils;
