//! Screenplay E2E
//!
//! Web vocabulary for screenplay actors, backed by an in-memory browser:
//! - `StubBrowsing` serves pages from declarative YAML site fixtures
//! - Interactions open pages, click targets and type text
//! - Questions read titles, text, values and URLs
//!
//! # Site fixture (YAML)
//!
//! ```text
//! base_url: http://shop.test
//! pages:
//!   - url: /login
//!     title: Log in
//!     elements:
//!       - css: '#username'
//!         editable: true
//!       - css: button[type=submit]
//!         link_to: /account
//! ```
//!
//! A real driver-backed ability would expose the same interactions; none
//! of this is known to `screenplay-core`.

pub mod browsing;
pub mod error;
pub mod interactions;
pub mod questions;
pub mod site;
pub mod target;

pub use browsing::StubBrowsing;
pub use error::{BrowsingError, BrowsingResult};
pub use interactions::{Click, Enter, Open};
pub use questions::{CurrentUrl, Presence, Text, Title, Value};
pub use site::{Element, Page, Site};
pub use target::{Locate, Strategy, Target};
