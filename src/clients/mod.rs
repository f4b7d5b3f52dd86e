//! Thin per-resource clients over [`crate::store::Store`].

pub mod ads;
pub mod cart;
pub mod issues;
pub mod products;
pub mod users;
