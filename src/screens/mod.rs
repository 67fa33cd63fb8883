pub mod admin;
pub mod main_screen;
pub mod password;
