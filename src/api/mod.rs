pub mod exercises;
pub mod health;
pub mod swagger;
pub mod users;
