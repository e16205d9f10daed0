pub mod cart;
pub mod catalog;
pub mod config;
pub mod data;
pub mod pager;
pub mod session;
pub mod storefront;
pub mod view;
