//! Downrate CLI library.
//!
//! This crate provides the glue around the conversion core: WAV decoding and
//! encoding, per-channel conversion, request loading, logging setup and the
//! command implementations behind the `downrate` binary.

pub mod audio;
pub mod commands;
pub mod logging;
pub mod request;
