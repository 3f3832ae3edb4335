// vault-saga/src/saga/mod.rs

//! Defines the `Saga<TData, Err>` struct, its step registration, and its execution logic.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Saga;
