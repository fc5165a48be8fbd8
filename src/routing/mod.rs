//! Path routing: pattern syntax, the ordered table, and the console's views.

pub mod console;
pub mod pattern;
pub mod table;

pub use console::{View, console_routes};
pub use pattern::Params;
pub use table::{RouteMatch, RouteTable, RouteTableError};
