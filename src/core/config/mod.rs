//! Client configuration: validation, defaults, and loading.
//!
//! # Module layout
//!
//! - **types** — The resolved [`Config`] consumed by the client, the default
//!   constants, and the function-valued field aliases.
//! - **raw** — [`RawConfig`], the partially-specified input, plus the private
//!   TOML file shapes.
//! - **resolve** — `validate`, `resolve`, `build`, `default_uid`.
//! - **load** — `load`/`load_from`: a TOML file plus env overrides into a
//!   [`RawConfig`].

mod load;
mod raw;
mod resolve;
mod types;

pub use load::{ENDPOINT_ENV, VERBOSE_ENV, load, load_from, parse_flag};
pub use raw::RawConfig;
pub use resolve::{build, default_retry_after, default_uid, resolve, validate};
pub use types::*;
