//! Request module - HTTP connection to the vulnerable parameter

pub mod connect;

pub use connect::Request;
