//! API handlers
//!
//! Author: hephaex@gmail.com

pub mod company;
pub mod health;
pub mod root;
