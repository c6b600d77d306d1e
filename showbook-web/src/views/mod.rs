//! Server-side rendering
//!
//! `models` turns repository records into plain view data; `pages` and
//! `forms` render that data to HTML strings inside the `layout` shell.

pub mod forms;
pub mod layout;
pub mod models;
pub mod pages;
