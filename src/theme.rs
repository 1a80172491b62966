use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub name_font_size: f32,
    pub rank_font_size: f32,
    pub node_fill: String,
    pub node_border: String,
    pub name_color: String,
    pub rank_color: String,
    pub root_fill: String,
    pub root_border: String,
    pub root_name_color: String,
    pub root_rank_color: String,
    pub line_color: String,
    pub line_width: f32,
    pub corner_radius: f32,
    pub background: String,
}

impl Theme {
    /// Palette of the agent app's downline chart.
    pub fn classic() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            name_font_size: 14.0,
            rank_font_size: 11.0,
            node_fill: "#FFFFFF".to_string(),
            node_border: "#E5E7EB".to_string(),
            name_color: "#111827".to_string(),
            rank_color: "#6B7280".to_string(),
            root_fill: "#111827".to_string(),
            root_border: "#111827".to_string(),
            root_name_color: "#FFFFFF".to_string(),
            root_rank_color: "#D1D5DB".to_string(),
            line_color: "#9CA3AF".to_string(),
            line_width: 2.0,
            corner_radius: 12.0,
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            name_font_size: 13.0,
            rank_font_size: 11.0,
            node_fill: "#F8FAFF".to_string(),
            node_border: "#C7D2E5".to_string(),
            name_color: "#1C2430".to_string(),
            rank_color: "#7A8AA6".to_string(),
            root_fill: "#0B4AA2".to_string(),
            root_border: "#0B4AA2".to_string(),
            root_name_color: "#FFFFFF".to_string(),
            root_rank_color: "#D7E0F0".to_string(),
            line_color: "#7A8AA6".to_string(),
            line_width: 1.4,
            corner_radius: 10.0,
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" => Some(Self::classic()),
            "modern" => Some(Self::modern()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
