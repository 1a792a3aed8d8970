//! Core logic for the clinic directory.
//!
//! This crate contains pure domain logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `auth` - Admin token gate and login check
//! - `imaging` - Photo decoding, downscaling and JPEG re-encoding
//! - `photo` - Photo upload pipeline for patients and doctors
//! - `storage` - Object store client (OpenDAL)

pub mod auth;
pub mod imaging;
pub mod photo;
pub mod storage;
