//! RSS posts - pick blog posts to announce on social media
//!
//! This crate reads a local RSS feed and selects posts either by
//! publication day or at random among older posts. The two command-line
//! tools print their selection as JSON for the announcement pipeline.

pub mod config;
pub mod document;
pub mod feed;
pub mod item;
pub mod logging;
pub mod select;
