//! Rephrase Library
//!
//! Core modules for the Rephrase editor: a plain-text editing surface and a
//! controller that swaps selected text for a paraphrase fetched from a
//! remote service.

pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod gui;
pub mod paraphrase;
pub mod surface;
