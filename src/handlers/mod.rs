pub mod bot;
pub mod health;
