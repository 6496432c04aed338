pub mod animation;
pub mod app;
pub mod calculator;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod db;
pub mod directory;
pub mod global;
pub mod roster;
pub mod session;
