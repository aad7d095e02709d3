pub mod images;
pub mod mail;
pub mod repositories;
