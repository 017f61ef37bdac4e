//! geoparam-cli
//! ============
//!
//! Command-line interface for the `geoparam-core` geocoding facade and
//! per-user parameter store.
//!
//! This crate primarily provides a binary (`geoparam`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview.
//!
//! Basic usage:
//!
//! ```text
//! geoparam --help
//! geoparam geocode "8 bd du port, amiens"
//! geoparam reverse 49.8974 2.2901
//! geoparam users create 1
//! geoparam params set 1 '{"theme":"dark"}'
//! geoparam params delete 1 theme
//! ```
//!
//! For programmatic access use the [`geoparam-core`] crate directly.
//!
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.
