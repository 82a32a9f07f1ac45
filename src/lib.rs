//! Jom Sihat - a bilingual wellness site.
//!
//! Serves a small set of marketing pages in English and Bahasa Melayu.
//! The visitor's language preference lives in a private session cookie,
//! texts come from a JSON translation table, and pages are rendered
//! server-side with Tera.

pub mod config;
pub mod error;
pub mod i18n;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod shutdown;
pub mod state;
pub mod templates;
