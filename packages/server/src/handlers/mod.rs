pub mod auth;
pub mod health;
pub mod moderation;
pub mod photo;
