//! # vantage-std
//!
//! Standard implementations for the Vantage single-page navigation engine.
//!
//! This crate provides:
//! - **Event bus**: [`Dispatcher`], the ordered snapshot-delivery bus
//! - **Routing**: [`Router`] and its [`RouterBuilder`]
//! - **View plumbing**: [`ViewScope`], [`view_factory`]
//! - **Anchor interception**: [`AnchorInterceptor`]
//! - **Templates**: [`HandlebarsEngine`]
//! - **Test doubles**: the [`testing`] module
//!
//! [`Dispatcher`]: bus::Dispatcher
//! [`Router`]: router::Router
//! [`RouterBuilder`]: router::RouterBuilder
//! [`ViewScope`]: scope::ViewScope
//! [`view_factory`]: factory::view_factory
//! [`AnchorInterceptor`]: intercept::AnchorInterceptor
//! [`HandlebarsEngine`]: template::HandlebarsEngine

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core contracts
pub use vantage_core;

// Modules
pub mod bus;
pub mod factory;
pub mod intercept;
pub mod router;
pub mod scope;
pub mod template;
pub mod testing;
