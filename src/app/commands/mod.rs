pub mod checkpoint;
pub mod pillow;
pub mod tag;
