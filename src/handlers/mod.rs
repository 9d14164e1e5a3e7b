pub mod auth;
pub mod events;
pub mod members;
pub mod memberships;
pub mod params;
pub mod products;
pub mod utils;
