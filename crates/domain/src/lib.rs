//! # labsindex-domain
//!
//! Pure domain model for the labs index site.
//!
//! ## Responsibilities
//! - Preference values: [`Theme`](theme::Theme), [`Locale`](locale::Locale)
//!   and the [`PreferenceKey`](preference::PreferenceKey)s they persist under
//! - Locale detection from ambient language tags
//! - Translation tables supplied by hosting pages
//! - Access request rules: sanitizing, validation, issue URL construction
//! - Navigation and entrance-animation decisions
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app` or adapters.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod access_request;
pub mod animation;
pub mod locale;
pub mod navigation;
pub mod preference;
pub mod theme;
pub mod translation;
pub mod username;
