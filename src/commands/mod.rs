pub mod inventory;
pub mod merge;
pub mod parse;
pub mod source;
pub mod validate;
