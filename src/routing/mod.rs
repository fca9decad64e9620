//! Route table: descriptors, path matching and full-path rendering.

mod defaults;
mod path;
mod table;

pub use defaults::default_routes;
pub use path::{parse_query, render_full_path};
pub use table::{RouteError, RouteTable};
