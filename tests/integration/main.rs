//! End-to-end API tests exercising the full router over in-memory
//! stores, so they run without PostgreSQL.

mod helpers;

mod auth_test;
mod permission_test;
