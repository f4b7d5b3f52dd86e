pub mod admin;
pub mod ads;
pub mod auth;
pub mod cart;
pub mod issues;
pub mod orders;
pub mod products;
pub mod profile;
pub mod wishlist;
