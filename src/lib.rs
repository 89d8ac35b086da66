//! The library code for `siteconf`, the site configuration of Weiming's Blog.
//!
//! The blog is rendered by an external static site generator. This crate owns
//! the generator's settings: it loads them from a `siteconf.yaml` project file
//! ([`crate::config`]) into a single immutable [`SiteConfiguration`], and
//! renders that record back out in the shape the generator consumes, a flat
//! mapping of setting names to values ([`crate::value`]), either as YAML or as
//! a template context.
//!
//! Nothing here renders pages or writes feeds; those remain the generator's
//! job, as does checking that the theme directory and timezone are valid.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod config;
pub mod feed;
pub mod link;
pub mod plugin;
mod util;
pub mod value;

pub use config::SiteConfiguration;
