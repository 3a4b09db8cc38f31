pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, error, favorite_marker, header, info, section, success, summary_row, warn};
pub use progress::Spinner;
pub use table::{emoji_table, stats_table, TableBuilder};
pub use theme::{theme, Theme};
