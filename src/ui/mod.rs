pub mod console;
pub mod table;
pub mod views;

pub use console::{ConsoleNotifier, StdinConfirm};
pub use table::{Paginator, Table};
