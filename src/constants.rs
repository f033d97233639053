use ratatui::style::Color;

pub const CATEGORY_COLORS: [Color; 3] = [
    Color::Rgb(255, 153, 204),
    Color::Rgb(255, 153, 0),
    Color::Rgb(0, 176, 80),
];

pub const GROWTH_SETTINGS: GrowthSettings = GrowthSettings {
    seedling_until_secs: 15 * 60,
    growing_until_secs: 30 * 60,
};

pub const TIME_SETTINGS: TimeSettings = TimeSettings {
    target_fps: 60,
    poll_ms: 1,
    warning_ms: 2500,
    add_time_secs: 15 * 60,
};

pub const LABELS: Labels = Labels {
    default_owner: "UserName",
    home_commit: "Event",
    quit_commit: "Unnamed activity",
    max_label_chars: 48,
};

pub const FILE_NAMES: FileNames = FileNames {
    record: "data.json",
    backup_prefix: "data",
    backup_extension: "json",
    log: "thriving.log",
};

pub const PLOTS_PER_FIELD: usize = 9;
pub const GRID_SIDE: usize = 3;

pub struct GrowthSettings {
    pub seedling_until_secs: u64,
    pub growing_until_secs: u64,
}

pub struct TimeSettings {
    pub target_fps: u64,
    pub poll_ms: u64,
    pub warning_ms: u64,
    pub add_time_secs: u64,
}

pub struct Labels {
    pub default_owner: &'static str,
    pub home_commit: &'static str,
    pub quit_commit: &'static str,
    pub max_label_chars: usize,
}

pub struct FileNames {
    pub record: &'static str,
    pub backup_prefix: &'static str,
    pub backup_extension: &'static str,
    pub log: &'static str,
}
