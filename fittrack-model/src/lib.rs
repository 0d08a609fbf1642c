pub mod diary;
pub mod food;
pub mod goals;
pub mod user;
