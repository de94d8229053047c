use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Tabs},
};

use super::Component;
use crate::action::Action;
use crate::details::{DetailItem, DetailView};
use crate::state::DetailTab;

const ACTIVE_TAB: Color = Color::Rgb(0x4a, 0x90, 0xe2);
const GRID_COLUMNS: usize = 2;

pub struct DetailPanel;

pub struct DetailPanelProps<'a> {
    pub view: &'a DetailView,
}

impl Component<Action> for DetailPanel {
    type Props<'a> = DetailPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let view = props.view;
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let grid_rows = view.items.len().div_ceil(GRID_COLUMNS) as u16;
        let chunks = Layout::vertical([
            Constraint::Length(2),                      // Location + date
            Constraint::Length(1),                      // Tabs
            Constraint::Length(1),                      // Spacer
            Constraint::Length(view.headline.len() as u16),
            Constraint::Length(1),                      // Spacer
            Constraint::Length(grid_rows * 2),
        ])
        .flex(Flex::Start)
        .split(inner);

        render_header(frame, chunks[0], view);
        render_tabs(frame, chunks[1], view.tab);
        render_headline(frame, chunks[3], view);
        render_grid(frame, chunks[5], &view.items);
    }
}

fn render_header(frame: &mut Frame, area: Rect, view: &DetailView) {
    let lines = vec![
        Line::from(Span::styled(
            view.location.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            view.date.clone(),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).centered(), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, active: DetailTab) {
    let selected = match active {
        DetailTab::Weather => 0,
        DetailTab::AirQuality => 1,
    };
    let tabs = Tabs::new([DetailTab::Weather.title(), DetailTab::AirQuality.title()])
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(ACTIVE_TAB)
                .add_modifier(Modifier::BOLD),
        );
    let [centered] = Layout::horizontal([Constraint::Length(24)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(tabs, centered);
}

fn render_headline(frame: &mut Frame, area: Rect, view: &DetailView) {
    let color = match view.category {
        Some(category) => {
            let (r, g, b) = category.rgb();
            Color::Rgb(r, g, b)
        }
        None => Color::White,
    };
    let lines: Vec<Line> = view
        .headline
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let mut style = Style::default().fg(color);
            if i == 0 {
                style = style.add_modifier(Modifier::BOLD);
            }
            Line::from(Span::styled(text.clone(), style))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).centered(), area);
}

fn render_grid(frame: &mut Frame, area: Rect, items: &[DetailItem]) {
    let rows = Layout::vertical(
        items
            .chunks(GRID_COLUMNS)
            .map(|_| Constraint::Length(2)),
    )
    .split(area);

    for (row_items, row) in items.chunks(GRID_COLUMNS).zip(rows.iter()) {
        let cells = Layout::horizontal([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row);
        for (item, cell) in row_items.iter().zip(cells.iter()) {
            frame.render_widget(Paragraph::new(item_lines(item)).centered(), *cell);
        }
    }
}

fn item_lines(item: &DetailItem) -> Vec<Line<'static>> {
    let value = match item.unit {
        Some(unit) => format!("{} {unit}", item.value),
        None => item.value.clone(),
    };
    vec![
        Line::from(Span::styled(item.label, Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            value,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
    ]
}
