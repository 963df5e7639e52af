mod common;

mod auth;
mod moderation;
