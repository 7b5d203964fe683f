pub mod context;
pub mod message;
pub mod settings;
