pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod facets;
pub mod filters;
pub mod paging;
pub mod search;
pub mod ui;
