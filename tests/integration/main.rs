//! Integration tests for Briefex
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! fetcher and the full ingest cycle end-to-end against in-memory SQLite.

mod fetch_tests;
mod ingest_tests;
