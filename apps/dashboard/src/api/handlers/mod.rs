pub mod auth;
pub mod pages;
pub mod projects;
pub mod tasks;
pub mod users;
