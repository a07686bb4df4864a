pub mod admin;
pub mod auth;
pub mod booking;
pub mod hall;
pub mod handler;
pub mod health;
pub mod member;
