use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen layout configuration
pub struct AppLayout {
    pub search_area: Rect,
    pub layers_area: Rect,
    pub results_area: Rect,
    pub stats_area: Option<Rect>,
    pub status_area: Rect,
}

impl AppLayout {
    /// Create the layout:
    /// - Query line: 3 rows (top)
    /// - Layer sidebar: 25% width (left)
    /// - Results: remaining width, minus 30% for the stats panel when shown
    /// - Status bar: bottom row
    pub fn new(area: Rect, show_stats: bool) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Query line
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let main_constraints: &[Constraint] = if show_stats {
            &[Constraint::Percentage(25), Constraint::Percentage(45), Constraint::Percentage(30)]
        } else {
            &[Constraint::Percentage(25), Constraint::Percentage(75)]
        };
        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(main_constraints)
            .split(vertical_chunks[1]);

        Self {
            search_area: vertical_chunks[0],
            layers_area: horizontal_chunks[0],
            results_area: horizontal_chunks[1],
            stats_area: show_stats.then(|| horizontal_chunks[2]),
            status_area: vertical_chunks[2],
        }
    }
}

/// Centered popup covering `percent_x` by `percent_y` of `area`
pub fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
