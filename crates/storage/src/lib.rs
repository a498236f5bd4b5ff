#![forbid(unsafe_code)]

pub mod history;
pub mod question_bank;
pub mod repository;
pub mod sqlite;
