use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(124, 175, 194);     // #7CAFC2
pub const LOADING: Color = Color::Rgb(219, 171, 121);    // #DBAB79
pub const IDLE: Color = Color::Rgb(161, 193, 129);       // #A1C181
pub const TIMEOUT: Color = Color::Rgb(232, 131, 136);    // #E88388

pub const TEXT_DIM: Color = Color::Rgb(136, 136, 136);   // #888888
pub const TEXT_WHITE: Color = Color::Rgb(255, 255, 255); // #FFFFFF

pub const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
