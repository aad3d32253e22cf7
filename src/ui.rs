use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{
    Component, EventContext, EventKind, EventRoutingState, HandlerResponse, RenderContext,
};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use crate::action::Action;
use crate::pagination::PageLabel;
use crate::state::{AppState, CatalogEntry, PokemonStat, StatTier, View};

const BG_BASE: Color = Color::Rgb(12, 18, 28);
const BG_PANEL: Color = Color::Rgb(20, 32, 46);
const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
const ACCENT_BLUE: Color = Color::Rgb(59, 130, 246);
const ACCENT_RED: Color = Color::Rgb(239, 68, 68);
const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
const STAT_LOW: Color = Color::Rgb(239, 68, 68);
const STAT_MID: Color = Color::Rgb(234, 179, 8);
const STAT_HIGH: Color = Color::Rgb(34, 197, 94);
const STAT_BAR_WIDTH: usize = 20;
const MOVE_COLUMNS: usize = 4;

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PokedexComponentId {
    Catalog,
    Detail,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PokedexContext {
    Catalog,
    Detail,
    Search,
}

impl EventRoutingState<PokedexComponentId, PokedexContext> for AppState {
    fn focused(&self) -> Option<PokedexComponentId> {
        if self.search.active {
            return Some(PokedexComponentId::Search);
        }
        match self.view {
            View::Catalog => Some(PokedexComponentId::Catalog),
            View::Detail => Some(PokedexComponentId::Detail),
        }
    }

    fn modal(&self) -> Option<PokedexComponentId> {
        if self.search.active {
            Some(PokedexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: PokedexComponentId) -> PokedexContext {
        match id {
            PokedexComponentId::Catalog => PokedexContext::Catalog,
            PokedexComponentId::Detail => PokedexContext::Detail,
            PokedexComponentId::Search => PokedexContext::Search,
        }
    }

    fn default_context(&self) -> PokedexContext {
        PokedexContext::Catalog
    }
}

pub struct PokedexUi {
    catalog_list: SelectList,
    evolution_list: SelectList,
    status_bar: StatusBar,
}

impl Default for PokedexUi {
    fn default() -> Self {
        Self::new()
    }
}

impl PokedexUi {
    pub fn new() -> Self {
        Self {
            catalog_list: SelectList::new(),
            evolution_list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokedexComponentId>,
    ) {
        match state.view {
            View::Catalog => {
                event_ctx.set_component_area(PokedexComponentId::Catalog, area);
                event_ctx.component_areas.remove(&PokedexComponentId::Detail);
            }
            View::Detail => {
                event_ctx.set_component_area(PokedexComponentId::Detail, area);
                event_ctx.component_areas.remove(&PokedexComponentId::Catalog);
            }
        }
        if state.search.active {
            event_ctx.set_component_area(PokedexComponentId::Search, area);
        } else {
            event_ctx.component_areas.remove(&PokedexComponentId::Search);
        }
        self.draw(frame, area, state);
    }

    /// Render without touching event routing.
    pub fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let base = Block::default().style(Style::default().bg(BG_BASE));
        frame.render_widget(base, area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        match state.view {
            View::Catalog => {
                render_catalog_header(frame, layout[0], state);
                render_catalog_body(frame, layout[1], state, &mut self.catalog_list);
            }
            View::Detail => {
                render_detail_header(frame, layout[0], state);
                render_detail_body(frame, layout[1], state, &mut self.evolution_list);
            }
        }
        render_footer(frame, layout[2], state, &mut self.status_bar);
    }

    pub fn handle_catalog_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_catalog_event(event, state, &mut self.catalog_list)
    }

    pub fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_detail_event(event, state, &mut self.evolution_list)
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_search_event(event, state)
    }
}

pub fn handle_catalog_event(
    event: &EventKind,
    state: &AppState,
    catalog_list: &mut SelectList,
) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Enter => state
                .selected_entry()
                .map(|entry| Action::DetailOpen(entry.name.clone()))
                .into_iter()
                .collect(),
            crossterm::event::KeyCode::Char(ch @ '1'..='9') => ch
                .to_digit(10)
                .and_then(|n| state.page_button(n as usize))
                .map(Action::PageGoto)
                .into_iter()
                .collect(),
            crossterm::event::KeyCode::Left
            | crossterm::event::KeyCode::PageUp
            | crossterm::event::KeyCode::Char('h') => vec![Action::PagePrev],
            crossterm::event::KeyCode::Right
            | crossterm::event::KeyCode::PageDown
            | crossterm::event::KeyCode::Char('l') => vec![Action::PageNext],
            crossterm::event::KeyCode::Home => vec![Action::PageFirst],
            crossterm::event::KeyCode::End => vec![Action::PageLast],
            crossterm::event::KeyCode::Char('c') => vec![Action::SearchClear],
            _ => {
                let items = catalog_items(state);
                let props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.selected_index.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::CardSelect,
                    render_item: &|item| item.clone(),
                };
                let actions: Vec<_> = catalog_list.handle_event(event, props).into_iter().collect();
                return handler_response(actions);
            }
        },
        EventKind::Scroll { delta, .. } => vec![Action::CardMove(*delta as i16)],
        _ => vec![],
    };
    handler_response(actions)
}

pub fn handle_detail_event(
    event: &EventKind,
    state: &AppState,
    evolution_list: &mut SelectList,
) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Esc
            | crossterm::event::KeyCode::Backspace
            | crossterm::event::KeyCode::Char('b') => vec![Action::DetailBack],
            crossterm::event::KeyCode::Enter => vec![Action::EvolutionOpen],
            crossterm::event::KeyCode::Char('m') => vec![Action::MovesToggle],
            _ => {
                let items = evolution_items(state);
                if items.is_empty() {
                    return HandlerResponse::ignored();
                }
                let props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state
                        .evolution_selected_index
                        .min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: false,
                        wrap_navigation: false,
                    },
                    on_select: Action::EvolutionSelect,
                    render_item: &|item| item.clone(),
                };
                let actions: Vec<_> = evolution_list
                    .handle_event(event, props)
                    .into_iter()
                    .collect();
                return handler_response(actions);
            }
        },
        _ => vec![],
    };
    handler_response(actions)
}

pub fn handle_search_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Esc => vec![Action::SearchCancel],
            crossterm::event::KeyCode::Enter => vec![Action::SearchSubmit],
            crossterm::event::KeyCode::Backspace => vec![Action::SearchBackspace],
            crossterm::event::KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
            _ => vec![],
        },
        _ => vec![],
    };
    handler_response(actions)
}

/// Keys that work regardless of the focused view.
pub fn handle_global_event(event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
    match event {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(*width, *height)).with_render()
        }
        EventKind::Key(key) if !state.search.active => match key.code {
            crossterm::event::KeyCode::Char('q') => HandlerResponse::action(Action::Quit),
            crossterm::event::KeyCode::Char('/') if state.view == View::Catalog => {
                HandlerResponse::action(Action::SearchStart)
            }
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn render_catalog_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let search = if state.search.active {
        format!("/{}_", state.search.query)
    } else if state.search.query.is_empty() {
        "/ to search".to_string()
    } else {
        format!("/{}", state.search.query)
    };
    let search_style = if state.search.active {
        Style::default().fg(ACCENT_BLUE).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    let text = Text::from(vec![
        Line::from(vec![
            Span::styled(
                "POKÉDEX",
                Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                "Discover and explore your favorite Pokémon",
                Style::default().fg(TEXT_DIM),
            ),
        ]),
        Line::from(vec![
            Span::raw("Search: "),
            Span::styled(search, search_style),
        ]),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_catalog_body(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    catalog_list: &mut SelectList,
) {
    let (list_area, pager_area) = if state.shows_pagination() {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(4)])
            .split(area);
        (layout[0], Some(layout[1]))
    } else {
        (area, None)
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(list_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("CATALOG")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(ACCENT_BLUE));
    let inner = block.inner(columns[0]);
    frame.render_widget(block, columns[0]);

    if state.catalog.is_loading() || state.catalog.is_empty() {
        frame.render_widget(
            Paragraph::new("Loading Pokémon...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(TEXT_DIM)),
            inner,
        );
    } else if state.filtered_indices.is_empty() {
        frame.render_widget(
            Paragraph::new(empty_catalog_text(state))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
    } else {
        let items = catalog_items(state);
        let props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.selected_index.min(items.len().saturating_sub(1)),
            is_focused: !state.search.active,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::CardSelect,
            render_item: &|item| item.clone(),
        };
        catalog_list.render(frame, inner, props);
    }

    render_card(frame, columns[1], state);

    if let Some(pager_area) = pager_area {
        render_pagination(frame, pager_area, state);
    }
}

fn empty_catalog_text(state: &AppState) -> Text<'static> {
    if let Some(error) = state.catalog.error() {
        return Text::from(vec![
            Line::from(Span::styled(
                "Could not load the Pokédex.",
                Style::default().fg(ACCENT_RED),
            )),
            Line::from(Span::styled(error.to_string(), Style::default().fg(TEXT_DIM))),
        ]);
    }
    Text::from(vec![
        Line::from(Span::styled(
            format!("No Pokémon found matching \"{}\"", state.search.query),
            Style::default().fg(TEXT_DIM),
        )),
        Line::from(" "),
        Line::from(Span::styled(
            "press c to clear search",
            Style::default().fg(ACCENT_BLUE),
        )),
    ])
}

fn render_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("CARD")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    let text = match state.selected_entry() {
        Some(entry) => card_text(state, entry),
        None => Text::from(Span::styled(
            "[select a pokemon]",
            Style::default().fg(TEXT_DIM),
        )),
    };
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn card_text(state: &AppState, entry: &CatalogEntry) -> Text<'static> {
    let id = entry.id();
    let sprite = state
        .sprite_url(id)
        .unwrap_or_else(|| "no image available".to_string());
    Text::from(vec![
        Line::from(Span::styled(
            format_dex_number(id),
            Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format_name(&entry.name),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        )),
        Line::from(" "),
        Line::from(Span::styled(sprite, Style::default().fg(TEXT_DIM))),
        Line::from(" "),
        Line::from(Span::styled(
            "Enter to open",
            Style::default().fg(ACCENT_BLUE),
        )),
    ])
}

fn render_pagination(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = Text::from(vec![
        pagination_line(state),
        Line::from(Span::styled(
            format!("Page {} of {}", state.page, state.total_pages()),
            Style::default().fg(TEXT_DIM),
        )),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    frame.render_widget(
        Paragraph::new(text).block(block).alignment(Alignment::Center),
        area,
    );
}

/// Page buttons: `‹`, the page labels with the current page highlighted, `›`.
pub fn pagination_line(state: &AppState) -> Line<'static> {
    let mut spans = Vec::new();
    if state.has_prev_page() {
        spans.push(Span::styled(" ‹ ", Style::default().fg(ACCENT_RED)));
    }
    for label in state.page_labels() {
        let span = match label {
            PageLabel::Number(page) if page == state.page => Span::styled(
                format!("[{page}]"),
                Style::default()
                    .fg(TEXT_MAIN)
                    .bg(ACCENT_BLUE)
                    .add_modifier(Modifier::BOLD),
            ),
            PageLabel::Number(page) => {
                Span::styled(format!(" {page} "), Style::default().fg(TEXT_MAIN))
            }
            PageLabel::Ellipsis => Span::styled(" … ", Style::default().fg(TEXT_DIM)),
        };
        spans.push(span);
    }
    if state.has_next_page() {
        spans.push(Span::styled(" › ", Style::default().fg(ACCENT_RED)));
    }
    Line::from(spans)
}

fn render_detail_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(header_color(state)));
    let name = state.detail_name.as_deref().unwrap_or("");
    let Some(detail) = state.current_detail() else {
        let line = Line::from(Span::styled(
            format_name(name),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    };

    let mut title = vec![
        Span::styled(
            format_dex_number(Some(detail.id)),
            Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format_name(&detail.name),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];
    for type_name in &detail.types {
        title.push(type_badge(type_name));
        title.push(Span::raw(" "));
    }
    let text = Text::from(vec![
        Line::from(title),
        Line::from(vec![
            Span::styled("Height ", Style::default().fg(TEXT_DIM)),
            Span::raw(format!("{} m", detail.height_m())),
            Span::raw("   "),
            Span::styled("Weight ", Style::default().fg(TEXT_DIM)),
            Span::raw(format!("{} kg", detail.weight_kg())),
        ]),
    ]);
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn header_color(state: &AppState) -> Color {
    state
        .current_detail()
        .and_then(|detail| detail.primary_type())
        .map(type_color)
        .unwrap_or(TEXT_DIM)
}

fn render_detail_body(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    evolution_list: &mut SelectList,
) {
    if state.detail.is_loading() || state.detail.is_empty() {
        frame.render_widget(
            Paragraph::new("Loading...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD)),
            area,
        );
        return;
    }
    if state.detail.is_failed() {
        frame.render_widget(
            Paragraph::new("Pokémon not found!")
                .alignment(Alignment::Center)
                .style(Style::default().fg(ACCENT_RED)),
            area,
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(7)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(columns[1]);

    render_stats_panel(frame, columns[0], state);
    render_abilities_panel(frame, right[0], state);
    render_evolution_panel(frame, right[1], state, evolution_list);
    render_moves_panel(frame, rows[1], state);
}

fn render_stats_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = panel_block("BASE STATS");
    let mut lines: Vec<Line> = state
        .current_detail()
        .map(|detail| detail.stats.iter().map(stat_line).collect())
        .unwrap_or_default();
    if let Some(url) = state.current_detail().and_then(|detail| detail.artwork_url.clone()) {
        lines.push(Line::from(" "));
        lines.push(Line::from(Span::styled(
            format!("Artwork: {url}"),
            Style::default().fg(TEXT_DIM),
        )));
    }
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

pub fn stat_line(stat: &PokemonStat) -> Line<'static> {
    let filled = (usize::from(stat.percent()) * STAT_BAR_WIDTH).div_ceil(100);
    let filled = filled.min(STAT_BAR_WIDTH);
    Line::from(vec![
        Span::styled(
            format!("{:<16}", format_name(&stat.name)),
            Style::default().fg(TEXT_DIM),
        ),
        Span::styled(
            format!("{:>3} ", stat.value),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        ),
        Span::styled("█".repeat(filled), Style::default().fg(stat_color(stat.tier()))),
        Span::styled(
            "░".repeat(STAT_BAR_WIDTH - filled),
            Style::default().fg(BG_HIGHLIGHT),
        ),
    ])
}

fn stat_color(tier: StatTier) -> Color {
    match tier {
        StatTier::Low => STAT_LOW,
        StatTier::Mid => STAT_MID,
        StatTier::High => STAT_HIGH,
    }
}

fn render_abilities_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let lines: Vec<Line> = state
        .current_detail()
        .map(|detail| {
            detail
                .abilities
                .iter()
                .map(|ability| Line::from(format!("• {}", format_name(ability))))
                .collect()
        })
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(panel_block("ABILITIES"))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_evolution_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    evolution_list: &mut SelectList,
) {
    let block = panel_block("EVOLUTION CHAIN");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items = evolution_items(state);
    if items.is_empty() {
        let message = if state.evolution.is_loading() {
            "Evolution loading..."
        } else {
            "No evolution data."
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(TEXT_DIM))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);
    frame.render_widget(
        Paragraph::new(evolution_arrow_line(state)).style(Style::default().fg(TEXT_MAIN)),
        layout[0],
    );

    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state
            .evolution_selected_index
            .min(items.len().saturating_sub(1)),
        is_focused: true,
        style: list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: false,
            wrap_navigation: false,
        },
        on_select: Action::EvolutionSelect,
        render_item: &|item| item.clone(),
    };
    evolution_list.render(frame, layout[1], props);
}

/// `Bulbasaur → Ivysaur → Venusaur`, current species in bold.
pub fn evolution_arrow_line(state: &AppState) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, stage) in state.evolution_stages().iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" → ", Style::default().fg(TEXT_DIM)));
        }
        let style = if state.detail_name.as_deref() == Some(stage.name.as_str()) {
            Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_MAIN)
        };
        spans.push(Span::styled(format_name(&stage.name), style));
    }
    Line::from(spans)
}

fn render_moves_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let moves = state.visible_moves();
    let column_width = (area.width.saturating_sub(2) as usize / MOVE_COLUMNS).max(1);
    let mut lines: Vec<Line> = moves
        .chunks(MOVE_COLUMNS)
        .map(|row| {
            let text = row
                .iter()
                .map(|name| {
                    let name = format_name(name);
                    let clipped: String = name.chars().take(column_width.saturating_sub(1)).collect();
                    format!("{clipped:<column_width$}")
                })
                .collect::<String>();
            Line::from(text)
        })
        .collect();
    let hidden = state.hidden_move_count();
    if hidden > 0 {
        lines.push(Line::from(Span::styled(
            format!("m: show {hidden} more moves"),
            Style::default().fg(ACCENT_BLUE),
        )));
    } else if state.show_all_moves {
        lines.push(Line::from(Span::styled(
            "m: show fewer moves",
            Style::default().fg(ACCENT_BLUE),
        )));
    }
    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(panel_block("MOVES")),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = state.message.clone().unwrap_or_else(|| {
        if state.catalog.is_loading() {
            "Loading catalog...".to_string()
        } else if state.detail.is_loading() && state.view == View::Detail {
            "Loading pokemon...".to_string()
        } else if state.evolution.is_loading() && state.view == View::Detail {
            "Loading evolution chain...".to_string()
        } else {
            format!("{} Pokémon", state.filtered_indices.len())
        }
    });
    let hints = status_hints(state);
    let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT_GOLD));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_BLUE)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_BLUE)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&hints).with_separator("  "),
        center: StatusBarSection::empty(),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.search.active {
        return vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Cancel"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
    }
    match state.view {
        View::Catalog => vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("h/l", "Page"),
            StatusBarHint::new("1-9", "Jump"),
            StatusBarHint::new("Enter", "Open"),
            StatusBarHint::new("/", "Search"),
            StatusBarHint::new("c", "Clear"),
            StatusBarHint::new("q", "Quit"),
        ],
        View::Detail => vec![
            StatusBarHint::new("j/k", "Evolution"),
            StatusBarHint::new("Enter", "Open"),
            StatusBarHint::new("m", "Moves"),
            StatusBarHint::new("Esc", "Back"),
            StatusBarHint::new("q", "Quit"),
        ],
    }
}

fn catalog_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .page_entries()
        .into_iter()
        .map(|entry| {
            Line::from(format!(
                "{} {}",
                format_dex_number(entry.id()),
                format_name(&entry.name)
            ))
        })
        .collect()
}

fn evolution_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .evolution_stages()
        .iter()
        .enumerate()
        .map(|(idx, stage)| {
            let sprite = state
                .sprite_url(stage.species_id)
                .unwrap_or_else(|| "no image available".to_string());
            Line::from(format!(
                "{:02} {:<12} {sprite}",
                idx + 1,
                format_name(&stage.name)
            ))
        })
        .collect()
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn panel_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM))
}

fn type_badge(type_name: &str) -> Span<'static> {
    Span::styled(
        format!(" {type_name} "),
        Style::default()
            .fg(Color::White)
            .bg(type_color(type_name))
            .add_modifier(Modifier::BOLD),
    )
}

pub fn type_color(type_name: &str) -> Color {
    match type_name {
        "fire" => Color::Rgb(239, 68, 68),
        "water" => Color::Rgb(59, 130, 246),
        "electric" => Color::Rgb(234, 179, 8),
        "grass" => Color::Rgb(34, 197, 94),
        "ice" => Color::Rgb(147, 197, 253),
        "fighting" => Color::Rgb(185, 28, 28),
        "poison" => Color::Rgb(168, 85, 247),
        "ground" => Color::Rgb(161, 98, 7),
        "flying" => Color::Rgb(165, 180, 252),
        "psychic" => Color::Rgb(236, 72, 153),
        "bug" => Color::Rgb(74, 222, 128),
        "rock" => Color::Rgb(133, 77, 14),
        "ghost" => Color::Rgb(126, 34, 206),
        "dragon" => Color::Rgb(67, 56, 202),
        "dark" => Color::Rgb(31, 41, 55),
        "steel" => Color::Rgb(107, 114, 128),
        "fairy" => Color::Rgb(249, 168, 212),
        _ => Color::Rgb(156, 163, 175),
    }
}

pub fn format_dex_number(id: Option<u32>) -> String {
    match id {
        Some(id) => format!("#{id:03}"),
        None => "#???".to_string(),
    }
}

pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => "".to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::DataResource;

    use crate::evolution::EvolutionStage;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn state_with_pages(count: u32, page: usize) -> AppState {
        let mut state = AppState::default();
        state.catalog = DataResource::Loaded(
            (1..=count)
                .map(|id| CatalogEntry {
                    name: format!("mon-{id}"),
                    url: format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
                })
                .collect(),
        );
        state.rebuild_filtered();
        state.page = page;
        state
    }

    #[test]
    fn pagination_line_marks_current_page() {
        let state = state_with_pages(200, 5);
        assert_eq!(
            line_text(&pagination_line(&state)),
            " ‹  1  …  4 [5] 6  …  10  › "
        );
    }

    #[test]
    fn pagination_line_hides_arrows_at_bounds() {
        let state = state_with_pages(60, 1);
        assert_eq!(line_text(&pagination_line(&state)), "[1] 2  3  › ");
        let state = state_with_pages(60, 3);
        assert_eq!(line_text(&pagination_line(&state)), " ‹  1  2 [3]");
    }

    #[test]
    fn evolution_line_joins_stages() {
        let mut state = AppState::default();
        state.detail_name = Some("ivysaur".to_string());
        state.evolution = DataResource::Loaded(vec![
            EvolutionStage {
                name: "bulbasaur".to_string(),
                species_id: Some(1),
            },
            EvolutionStage {
                name: "ivysaur".to_string(),
                species_id: Some(2),
            },
        ]);
        assert_eq!(
            line_text(&evolution_arrow_line(&state)),
            "Bulbasaur → Ivysaur"
        );
    }

    #[test]
    fn stat_line_bar_has_fixed_width() {
        let stat = PokemonStat {
            name: "special-attack".to_string(),
            value: 255,
        };
        let text = line_text(&stat_line(&stat));
        assert!(text.starts_with("Special Attack"));
        assert_eq!(text.chars().filter(|ch| *ch == '█').count(), STAT_BAR_WIDTH);

        let stat = PokemonStat {
            name: "hp".to_string(),
            value: 0,
        };
        let text = line_text(&stat_line(&stat));
        assert_eq!(text.chars().filter(|ch| *ch == '█').count(), 0);
        assert_eq!(text.chars().filter(|ch| *ch == '░').count(), STAT_BAR_WIDTH);

        let stat = PokemonStat {
            name: "hp".to_string(),
            value: 51,
        };
        let text = line_text(&stat_line(&stat));
        assert_eq!(text.chars().filter(|ch| *ch == '█').count(), 4);
    }

    #[test]
    fn names_and_numbers_format_for_display() {
        assert_eq!(format_name("mr-mime"), "Mr Mime");
        assert_eq!(format_name("pikachu"), "Pikachu");
        assert_eq!(format_dex_number(Some(7)), "#007");
        assert_eq!(format_dex_number(Some(1025)), "#1025");
        assert_eq!(format_dex_number(None), "#???");
    }

    #[test]
    fn unknown_types_use_normal_color() {
        assert_eq!(type_color("shadow"), type_color("normal"));
        assert_ne!(type_color("fire"), type_color("water"));
    }
}
