pub mod cache;
pub mod forms;
