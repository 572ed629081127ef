pub mod json;
pub mod script;
pub mod srt;
pub mod text;
pub mod time;
