// Life of a request:
// 1. `/api/*` requests hit the JSON document handlers
//    - Mutations check the bearer ID token first (when a key is configured)
//    - Handlers go through the SQLite document store
// 2. `/__/firebase/init.json` hands the identity config to the browser
// 3. Any other GET is resolved against the client route table and answered
//    with the shell page (404 when no client route matches)
//
// Client-side components:
//  - Identity client + read-only auth handle
//  - Route table and resolver
//  - App shell (icons, mounting, navigation)

pub mod api;
pub mod auth;
pub mod config;
pub mod documents;
pub mod router;
pub mod shell;

#[cfg(test)]
mod testing;

pub use api::{AppState, build_router};
pub use shell::AppShell;
