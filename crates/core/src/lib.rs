//! Stark Core - Storefront domain library.
//!
//! This crate provides the domain model and in-memory stores shared by the
//! Stark components:
//! - `storefront` - HTTP storefront (catalog adapter, sessions, routes)
//! - `cli` - Terminal catalog browser
//!
//! # Architecture
//!
//! The core crate contains only types, pure functions and process-local
//! stores - no I/O, no HTTP clients. Every store is an explicit value that
//! callers own and pass around.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, prices and statuses
//! - [`product`] - Catalog products, ratings and categories
//! - [`filter`] - The filter/sort pipeline over a product list
//! - [`cart`] - Cart store
//! - [`orders`] - Append-only order store
//! - [`reviews`] - In-memory product reviews
//! - [`identity`] - Profile handed over by the identity provider

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod filter;
pub mod identity;
pub mod orders;
pub mod product;
pub mod reviews;
pub mod types;

pub use cart::{CartLine, CartStore};
pub use filter::{FilterError, FilterState, PriceRange, SortOption};
pub use identity::{AuthState, UserProfile};
pub use orders::{Order, OrderStore};
pub use product::{Category, ParseCategoryError, Product, Rating};
pub use reviews::{Review, ReviewError, ReviewStore};
pub use types::*;
