pub mod archive;
pub mod channels;
pub mod sanitize;
