pub mod links;
pub mod text;
