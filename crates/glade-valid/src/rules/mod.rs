pub mod application;
pub mod felling;
pub mod restocking;
