//! Supabase backend client.
//!
//! Two upstream surfaces behind one base URL:
//! - GoTrue (`/auth/v1`) - passwordless sign-in links, token introspection
//! - PostgREST (`/rest/v1`) - table reads, exact counts, news writes
//!
//! Row-level authorization is enforced server-side by the backend; this
//! client only carries credentials, it grants nothing by itself.

mod client;
mod types;

pub use client::SupabaseClient;
