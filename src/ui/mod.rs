/// UI module exports
pub mod bridge;
pub mod components;
pub mod form;
pub mod list;
pub mod popup;
