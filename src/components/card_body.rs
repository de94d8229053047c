use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::card::{CardElement, ElementKind, RenderedCard, StyleHint, Tone};

pub struct CardBody;

pub struct CardBodyProps<'a> {
    pub card: &'a RenderedCard,
    /// Raw temperature, used only to pick the temperature gradient
    pub temperature: Option<f64>,
    pub tick_count: u32,
}

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Rows reserved for the large-font temperature (terminus is 6 tall).
const TEMPERATURE_CAP: u16 = 6;

pub fn spinner_frame(tick_count: u32) -> &'static str {
    SPINNER_FRAMES[tick_count as usize % SPINNER_FRAMES.len()]
}

impl Component<Action> for CardBody {
    type Props<'a> = CardBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let [spinner @ CardElement {
            kind: ElementKind::Spinner,
            ..
        }] = props.card.elements.as_slice()
        {
            render_spinner(frame, inner, spinner, props.tick_count);
            return;
        }

        let constraints = props.card.elements.iter().flat_map(row_constraints);
        let rows = Layout::vertical(constraints).flex(Flex::Center).split(inner);

        // Rows come in (spacer, element) pairs
        for (element, row) in props.card.elements.iter().zip(rows.chunks(2)) {
            let target = row[1];
            match element.kind {
                ElementKind::Temperature => {
                    render_temperature(frame, target, element, props.temperature)
                }
                _ => render_text(frame, target, element),
            }
        }
    }
}

fn row_constraints(element: &CardElement) -> [Constraint; 2] {
    let spacer = match element.kind {
        // The AQI section sits apart from the weather lines
        ElementKind::AqiLabel => Constraint::Length(1),
        _ => Constraint::Length(0),
    };
    let height = match element.kind {
        ElementKind::Temperature => Constraint::Max(TEMPERATURE_CAP),
        _ => Constraint::Length(1),
    };
    [spacer, height]
}

fn render_spinner(frame: &mut Frame, area: Rect, element: &CardElement, tick_count: u32) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);
    let spinner = Line::from(Span::styled(
        spinner_frame(tick_count),
        text_style(&element.style),
    ))
    .centered();
    frame.render_widget(Paragraph::new(spinner), chunks[0]);
}

fn render_text(frame: &mut Frame, area: Rect, element: &CardElement) {
    let Some(text) = element.text.as_deref() else {
        return;
    };
    let line = Line::from(Span::styled(text.to_string(), text_style(&element.style)));
    let alignment = if element.style.centered {
        Alignment::Center
    } else {
        Alignment::Left
    };
    frame.render_widget(Paragraph::new(line).alignment(alignment), area);
}

fn render_temperature(
    frame: &mut Frame,
    area: Rect,
    element: &CardElement,
    temperature: Option<f64>,
) {
    let Some(text) = element.text.as_deref() else {
        return;
    };
    let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(temperature_gradient(temperature));
    frame.render_widget(ArtBox::new(&renderer, text), area);
}

pub fn text_style(hint: &StyleHint) -> Style {
    let mut style = Style::default().fg(tone_color(hint));
    if hint.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

fn tone_color(hint: &StyleHint) -> Color {
    match hint.tone {
        Tone::Normal if hint.font_size >= 24 => Color::White,
        Tone::Normal => Color::Gray,
        Tone::Accent => Color::Rgb(0x4a, 0x90, 0xe2),
        Tone::Error => Color::Rgb(0xd3, 0x2f, 0x2f),
        Tone::Aqi(category) => {
            let (r, g, b) = category.rgb();
            Color::Rgb(r, g, b)
        }
    }
}

fn temperature_gradient(celsius: Option<f64>) -> Fill {
    let (start, end) = match celsius {
        Some(t) if t < 0.0 => (
            ArtColor::rgb(150, 200, 255), // Ice blue
            ArtColor::rgb(200, 230, 255),
        ),
        Some(t) if t < 15.0 => (
            ArtColor::rgb(100, 180, 255), // Cool blue
            ArtColor::rgb(150, 220, 200),
        ),
        Some(t) if t < 25.0 => (
            ArtColor::rgb(100, 200, 150), // Green
            ArtColor::rgb(255, 220, 100),
        ),
        Some(t) if t < 35.0 => (
            ArtColor::rgb(255, 180, 80), // Orange
            ArtColor::rgb(255, 120, 80),
        ),
        Some(_) => (
            ArtColor::rgb(255, 100, 80), // Hot
            ArtColor::rgb(255, 60, 60),
        ),
        None => (
            ArtColor::rgb(180, 180, 180), // No data
            ArtColor::rgb(220, 220, 220),
        ),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}
