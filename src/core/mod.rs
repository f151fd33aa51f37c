// Core domain: error kinds, data model, token signing

pub mod crypto;
pub mod errors;
pub mod models;
