pub mod app;
pub mod captcha;
pub mod config;
pub mod country;
pub mod form;
pub mod shared;
pub mod steps;
pub mod store;
pub mod tui;
pub mod wizard;
