//! HTML rendering: map markers, tables and the page shell

pub mod html;
pub mod map;
pub mod page;

pub use map::{MapView, Marker, MarkerColor};
pub use page::{error_page, Page};
