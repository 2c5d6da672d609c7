pub struct Icons;

impl Icons {
    pub const ROCKET: &str = "🚀";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const DATABASE: &str = "🗄️";
    pub const PLANE: &str = "✈️";
    pub const TICKET: &str = "🎫";
    pub const SEAT: &str = "💺";
    pub const GEAR: &str = "⚙️";
}
