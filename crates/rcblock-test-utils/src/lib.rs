//! Shared test utilities for the rcblock workspace.
//!
//! This crate provides a throwaway home directory fixture so crate test
//! suites never touch the real startup files. It is a dev-dependency only.

pub mod home;

pub use home::FakeHome;
