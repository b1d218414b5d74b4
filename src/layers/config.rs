/// Static display descriptor for one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Gradient token pair, start and end colour
    pub gradient: (&'static str, &'static str),
    /// Colour family token
    pub color: &'static str,
    /// `#rrggbb`, used by the terminal renderer
    pub hex_color: &'static str,
}

impl LayerConfig {
    /// RGB triple parsed from `hex_color`; grey if the table entry is malformed
    pub fn rgb(&self) -> (u8, u8, u8) {
        parse_hex(self.hex_color).unwrap_or((107, 114, 128))
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Canonical layers, in display order
pub static LAYERS: [LayerConfig; 9] = [
    LayerConfig {
        id: "backend-apis",
        name: "Backend APIs",
        description: "Reactive programming, API design, microservices",
        gradient: ("orange-500", "orange-700"),
        color: "orange",
        hex_color: "#f97316",
    },
    LayerConfig {
        id: "video-streaming",
        name: "Video Streaming",
        description: "Encoding, quality, playback optimization",
        gradient: ("pink-500", "pink-700"),
        color: "pink",
        hex_color: "#ec4899",
    },
    LayerConfig {
        id: "platform-tooling",
        name: "Platform Tooling",
        description: "Open source tools, infrastructure utilities",
        gradient: ("yellow-500", "yellow-700"),
        color: "yellow",
        hex_color: "#eab308",
    },
    LayerConfig {
        id: "data-infrastructure",
        name: "Data Infrastructure",
        description: "Data systems, pipelines, storage",
        gradient: ("blue-500", "blue-700"),
        color: "blue",
        hex_color: "#3b82f6",
    },
    LayerConfig {
        id: "observability",
        name: "Observability",
        description: "Monitoring, metrics, alerting, auto-scaling",
        gradient: ("indigo-500", "indigo-700"),
        color: "indigo",
        hex_color: "#6366f1",
    },
    LayerConfig {
        id: "engineering-culture",
        name: "Engineering Culture",
        description: "Practices, processes, team culture",
        gradient: ("purple-500", "purple-700"),
        color: "purple",
        hex_color: "#a855f7",
    },
    LayerConfig {
        id: "performance",
        name: "Performance",
        description: "Optimization, caching, speed improvements",
        gradient: ("red-500", "red-700"),
        color: "red",
        hex_color: "#ef4444",
    },
    LayerConfig {
        id: "distributed-systems",
        name: "Distributed Systems",
        description: "Cassandra, databases, microservices architecture",
        gradient: ("green-500", "green-700"),
        color: "green",
        hex_color: "#10b981",
    },
    LayerConfig {
        id: "cloud-infrastructure",
        name: "Cloud Infrastructure",
        description: "AWS, cloud migration, scaling",
        gradient: ("cyan-500", "cyan-700"),
        color: "cyan",
        hex_color: "#06b6d4",
    },
];

/// Used whenever a layer id is not in [`LAYERS`]
pub static DEFAULT_LAYER: LayerConfig = LayerConfig {
    id: "uncategorized",
    name: "Uncategorized",
    description: "Content not yet classified",
    gradient: ("gray-500", "gray-700"),
    color: "gray",
    hex_color: "#6b7280",
};

/// Legacy layer spellings and the current id each maps to
pub static LEGACY_LAYER_MAP: [(&str, &str); 9] = [
    ("data", "data-infrastructure"),
    ("streaming", "video-streaming"),
    ("video/encoding", "video-streaming"),
    ("infrastructure", "cloud-infrastructure"),
    ("platform", "platform-tooling"),
    ("frontend/ui", "platform-tooling"),
    ("api/backend", "backend-apis"),
    ("ml/data-science", "data-infrastructure"),
    ("security", "platform-tooling"),
];
