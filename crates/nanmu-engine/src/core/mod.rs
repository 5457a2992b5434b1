pub mod body;
pub mod rect;
pub mod time;
pub mod zone;
