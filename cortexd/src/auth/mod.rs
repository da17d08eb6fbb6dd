//! Authentication and authorization for the back office.
//!
//! The service sits behind an authenticating proxy, so there is no local
//! credential handling: the proxy injects the caller's verified email
//! address in a trusted header (configurable, `x-cortexd-user` by default)
//! and this module turns that into a typed identity.
//!
//! - [`current_user`]: extractors for the proxied identity. [`CurrentUser`]
//!   is any authenticated caller; [`AdminUser`] additionally requires the
//!   caller's email to match the configured administrator email exactly.
//!
//! Every admin route takes [`AdminUser`] as an argument, so the gate runs
//! before any handler logic. A request without the identity header, or with
//! a non-matching email, is rejected with 403. If no administrator email is
//! configured at all, admin routes fail with 500 rather than silently
//! allowing or denying access.
//!
//! ```ignore
//! use cortexd::auth::current_user::AdminUser;
//!
//! async fn admin_handler(admin: AdminUser) -> Result<String> {
//!     Ok(format!("hello, {}", admin.0.email))
//! }
//! ```

pub mod current_user;

pub use current_user::{AdminUser, CurrentUser};
