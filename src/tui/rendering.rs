use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{Focus, MessageType, StatsState, StatusMessage};
use super::layout::{AppLayout, centered_rect};
use crate::detail::{display_snippet, post_url};
use crate::layers::{layer_name, resolve};
use crate::models::{Entry, LayerInfo, QueryState};
use crate::utils::{format_long, format_short, format_year_month, sanitize, truncate_chars};
use crate::views::{ViewMode, ViewRow, ViewState, ViewSummary, layer_lanes};

const TEXT: Color = Color::Rgb(250, 250, 250);
const MUTED: Color = Color::Rgb(113, 113, 122);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

/// Characters of a title shown in a result row
const ROW_TITLE_CHARS: usize = 70;
/// Years and layers listed in the stats panel
const TOP_YEARS: usize = 6;
const TOP_LAYERS: usize = 8;

/// Everything one frame needs, borrowed from the app
pub struct RenderState<'a> {
    pub input: &'a str,
    pub focus: Focus,
    pub query: &'a QueryState,
    pub rows: &'a [ViewRow<'a>],
    pub selected_idx: usize,
    pub view: &'a ViewState,
    pub summary: ViewSummary,
    pub visible: &'a [Entry],
    pub categories: &'a [String],
    pub year_bounds: (i32, i32),
    pub layers: &'a [LayerInfo],
    pub layer_idx: usize,
    /// `Some` while the stats panel is open
    pub stats: Option<&'a StatsState>,
    pub detail: Option<&'a Entry>,
    pub loading: bool,
    pub directive_error: Option<&'a str>,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area(), state.stats.is_some());

    render_query_line(frame, layout.search_area, state);
    render_layer_sidebar(frame, layout.layers_area, state);
    render_results(frame, layout.results_area, state);
    if let (Some(area), Some(stats)) = (layout.stats_area, state.stats) {
        render_stats_panel(frame, area, stats);
    }
    render_status_bar(frame, layout.status_area, state);

    if let Some(entry) = state.detail {
        render_detail(frame, frame.area(), entry);
    }
}

fn focus_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { ACCENT } else { MUTED };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
}

fn layer_color(layer_id: &str) -> Color {
    let (r, g, b) = resolve(layer_id).rgb();
    Color::Rgb(r, g, b)
}

fn render_query_line(frame: &mut Frame, area: Rect, state: &RenderState) {
    let line = if state.input.is_empty() {
        Line::from(Span::styled(
            "layer:data from:2019 sort:oldest | search text",
            Style::default().fg(MUTED),
        ))
    } else {
        Line::from(Span::styled(state.input, Style::default().fg(TEXT)))
    };

    let paragraph = Paragraph::new(line)
        .block(focus_block(" Query (directives | text) ", state.focus == Focus::Search));
    frame.render_widget(paragraph, area);
}

fn render_layer_sidebar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let focused = state.focus == Focus::Layers;
    let mut lines: Vec<Line> = state
        .layers
        .iter()
        .enumerate()
        .map(|(idx, info)| {
            let marker = if state.query.selected_layers.contains(&info.name) { "[x]" } else { "[ ]" };
            let label = format!(" {} ({})", sanitize(&layer_name(&info.name)), info.count);
            let style = if focused && idx == state.layer_idx {
                Style::default().fg(TEXT).bg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(layer_color(&info.name))
            };
            Line::from(vec![Span::styled(marker, Style::default().fg(MUTED)), Span::styled(label, style)])
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled("No layers", Style::default().fg(MUTED))));
    }

    lines.push(Line::from(""));
    let (min_year, max_year) = state.year_bounds;
    lines.push(Line::from(Span::styled(
        format!("Years: {}-{}", min_year, max_year),
        Style::default().fg(MUTED),
    )));
    if !state.categories.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Tags: {}", sanitize(&state.categories.join(", "))),
            Style::default().fg(MUTED),
        )));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(focus_block(" Layers ", focused))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn summary_line(state: &RenderState) -> Line<'static> {
    let ViewSummary { total, shown, layers, periods } = state.summary;
    let mut spans = vec![Span::styled(
        format!(" Showing {} of {} posts | {} layers | {} periods", shown, total, layers, periods),
        Style::default().fg(MUTED),
    )];

    if state.view.mode == ViewMode::Timeline {
        let capped = state.view.cap.apply(state.visible);
        for lane in layer_lanes(&capped.entries) {
            spans.push(Span::styled(" | ", Style::default().fg(MUTED)));
            spans.push(Span::styled(
                format!("{} {}", sanitize(&layer_name(&lane.layer)), lane.count),
                Style::default().fg(layer_color(&lane.layer)),
            ));
        }
    }
    Line::from(spans)
}

fn row_item<'a>(row: &ViewRow<'a>, selected: bool) -> ListItem<'a> {
    let line = match row {
        ViewRow::Post(entry) => {
            let layers: Vec<String> = entry.layers.iter().map(|l| sanitize(&layer_name(l))).collect();
            Line::from(vec![
                Span::styled("● ", Style::default().fg(layer_color(entry.primary_layer()))),
                Span::raw(format!(
                    "{} | {} | {}",
                    format_short(entry),
                    truncate_chars(&sanitize(&entry.title), ROW_TITLE_CHARS),
                    layers.join(", ")
                )),
            ])
        }
        ViewRow::Section { key, count, expanded: None } => Line::from(Span::styled(
            format!("── {} ({}) ──", format_year_month(key), count),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        ViewRow::Section { key, count, expanded: Some(open) } => Line::from(Span::styled(
            format!("{} {} ({})", if *open { "▾" } else { "▸" }, key, count),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        ViewRow::LoadMore { remaining } => Line::from(Span::styled(
            format!("Load more ({} remaining)", remaining),
            Style::default().fg(ACCENT),
        )),
        ViewRow::End { total } => Line::from(Span::styled(
            format!("End of timeline ({} posts)", total),
            Style::default().fg(MUTED),
        )),
    };

    let style = if selected {
        Style::default().fg(TEXT).bg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT)
    };
    ListItem::new(line).style(style)
}

fn render_results(frame: &mut Frame, area: Rect, state: &RenderState) {
    let focused = state.focus == Focus::Results;
    let title = format!(" {} ", state.view.mode.label());
    let block = focus_block(&title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    frame.render_widget(Paragraph::new(summary_line(state)), chunks[0]);

    if state.rows.is_empty() {
        let text = if state.loading { "Loading posts..." } else { "No posts found" };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(MUTED))),
            chunks[1],
        );
        return;
    }

    let items: Vec<ListItem> = state
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| row_item(row, focused && idx == state.selected_idx))
        .collect();

    let mut list_state = ListState::default().with_selected(Some(state.selected_idx));
    frame.render_stateful_widget(List::new(items), chunks[1], &mut list_state);
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(MUTED)),
        Span::raw(value),
    ])
}

fn render_stats_panel(frame: &mut Frame, area: Rect, stats: &StatsState) {
    let lines = match stats {
        StatsState::NotLoaded => vec![Line::from("Loading statistics...")],
        StatsState::Failed => vec![Line::from(Span::styled(
            "Analytics failed to load",
            Style::default().fg(ERROR),
        ))],
        StatsState::Loaded(stats) => {
            let mut lines = vec![
                stat_line("Total posts", stats.total_posts.to_string()),
                stat_line("Span", format!("{} years", stats.timeline_span_years())),
                stat_line("Multi-layer posts", stats.multi_layer_posts.to_string()),
                stat_line("Avg layers/post", format!("{:.1}", stats.avg_layers_per_post)),
                stat_line(
                    "Earliest",
                    stats.date_range.earliest.as_deref().map_or_else(|| "N/A".to_string(), sanitize),
                ),
                stat_line(
                    "Latest",
                    stats.date_range.latest.as_deref().map_or_else(|| "N/A".to_string(), sanitize),
                ),
                Line::from(""),
                Line::from(Span::styled("Top years", Style::default().add_modifier(Modifier::BOLD))),
            ];
            for (year, count) in stats.top_years(TOP_YEARS) {
                lines.push(Line::from(format!("  {} {}", sanitize(year), count)));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Top layers",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for (layer, count) in stats.top_layers(TOP_LAYERS) {
                lines.push(Line::from(Span::styled(
                    format!("  {} {}", sanitize(&layer_name(layer)), count),
                    Style::default().fg(layer_color(layer)),
                )));
            }
            lines
        }
    };

    let paragraph = Paragraph::new(Text::from(lines))
        .block(focus_block(" Statistics ", false))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_detail(frame: &mut Frame, area: Rect, entry: &Entry) {
    let popup = centered_rect(area, 70, 60);
    let label = |text: &'static str| Span::styled(text, Style::default().fg(MUTED));

    let layers: Vec<Span> = entry
        .layers
        .iter()
        .flat_map(|layer| {
            [
                Span::styled(sanitize(&layer_name(layer)), Style::default().fg(layer_color(layer))),
                Span::raw(" "),
            ]
        })
        .collect();

    let lines = vec![
        Line::from(Span::styled(sanitize(&entry.title), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![label("Date: "), Span::raw(format_long(entry))]),
        Line::from([vec![label("Layers: ")], layers].concat()),
        Line::from(""),
        Line::from(display_snippet(entry)),
        Line::from(""),
        Line::from(vec![label("Read: "), Span::styled(post_url(entry), Style::default().fg(ACCENT))]),
        Line::from(""),
        Line::from(label("Esc: close | Ctrl+Y: copy URL")),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(focus_block(" Post ", true))
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (status_text, style) = if let Some(error) = state.directive_error {
        (format!(" [ERROR] {} ", error), Style::default().fg(ERROR).bg(BAR_BG))
    } else if let Some(msg) = state.status_message {
        let fg = match msg.message_type {
            MessageType::Success => ACCENT,
            MessageType::Error => ERROR,
        };
        (format!(" {} ", msg.text), Style::default().fg(fg).bg(BAR_BG))
    } else {
        let mut parts = vec![
            format!("[{}]", state.view.mode.label()),
            state.query.sort.label().to_string(),
        ];
        if state.loading {
            parts.push("loading...".to_string());
        }
        if let Some(query) = state.query.effective_search() {
            parts.push(format!("search: {}", query));
        }
        parts.push("Tab: focus".to_string());
        parts.push("Ctrl+T: view".to_string());
        parts.push("Ctrl+S: stats".to_string());
        parts.push("Ctrl+C: quit".to_string());
        (format!(" {} ", parts.join(" | ")), Style::default().fg(TEXT).bg(BAR_BG))
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
