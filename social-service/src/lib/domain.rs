pub mod auth;
pub mod notification;
pub mod post;
pub mod user;
