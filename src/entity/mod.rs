pub mod channel;
pub mod source;
