//! # WHOIS Lookup Client
//!
//! Terminal counterpart of the lookup gateway. [`ApiClient`] issues one
//! `POST /api/whois` per submission, [`LookupView`] keeps the form and result
//! state, and [`Toast`] shows failures for a few seconds before clearing
//! itself.

pub mod api;
pub mod prompt;
pub mod render;
pub mod toast;
pub mod view;

pub use api::{ApiClient, ClientError, DEFAULT_API_URL};
pub use prompt::{parse_prompt, PromptCommand};
pub use render::{contact_table, domain_table, format_long_date};
pub use toast::{Toast, TOAST_DURATION};
pub use view::LookupView;
