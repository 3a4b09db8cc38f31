pub struct Icons;

impl Icons {
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const PACKAGE: &str = "📦";
    pub const CLOCK: &str = "⏱️";
    pub const FOLDER: &str = "🗂️";
    pub const CLIPBOARD: &str = "📋";
    pub const STAR: &str = "⭐";
    pub const EMPTY: &str = "∅";
}
