#![forbid(unsafe_code)]

pub mod lessons;
pub mod repository;
pub mod sqlite;
