pub mod add;
pub mod edit;
pub mod list;
pub mod remove;
pub mod render;
