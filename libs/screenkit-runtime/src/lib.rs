//! Runtime support for members generated by the screenkit pipeline.
//!
//! Generated bodies never touch a platform directly; they run against the primitives here:
//!
//! - [`Bundle`] / [`Parcel`]: the generic key-value argument carrier and its typed values
//! - [`NavigationDescriptor`]: what a generated `createScreen` returns (key + factory)
//! - [`Controller`]: an instantiated owner, holding its arguments, root view and binding cache
//! - [`View`], [`Binder`], [`BinderRegistry`]: view tree, binder functions and their lookup
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod binder;
pub mod bundle;
pub mod controller;
pub mod error;
pub mod navigation;
pub mod view;

pub use binder::{Binder, BinderRegistry, BoundView, LayoutBinder};
pub use bundle::{Bundle, Parcel};
pub use controller::Controller;
pub use error::RuntimeError;
pub use navigation::NavigationDescriptor;
pub use view::View;
