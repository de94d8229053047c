use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{CardBody, CardBodyProps, Component, DetailPanel, DetailPanelProps};
use crate::action::Action;
use crate::card::{self, RenderedCard};
use crate::details::present_details;
use crate::state::{AppState, FetchState};

/// Props for CardDisplay - read-only view of state
pub struct CardDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main card screen: the card (or its detail view) plus a help bar
#[derive(Default)]
pub struct CardDisplay;

/// Present `fetch`, showing the failure card when the data is malformed.
/// The reducer has already logged the cause.
pub fn present(fetch: &FetchState) -> RenderedCard {
    card::render(fetch).unwrap_or_else(|_| RenderedCard::failed())
}

impl Component<Action> for CardDisplay {
    type Props<'a> = CardDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::SnapshotLoad),
                KeyCode::Char('d') => Some(Action::UiToggleDetails),
                KeyCode::Char('t') | KeyCode::Tab if props.state.show_details => {
                    Some(Action::UiSwitchTab)
                }
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: CardDisplayProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Card
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let state = props.state;
        let today = chrono::Local::now().date_naive();
        let details = state
            .show_details
            .then(|| present_details(&state.fetch, state.tab, today))
            .flatten();

        match details {
            Some(Ok(view)) => DetailPanel.render(frame, chunks[0], DetailPanelProps { view: &view }),
            // Not ready yet, or malformed: the summary card covers both
            _ => {
                let rendered = present(&state.fetch);
                CardBody.render(
                    frame,
                    chunks[0],
                    CardBodyProps {
                        card: &rendered,
                        temperature: state.fetch.weather().map(|w| w.temperature),
                        tick_count: state.tick_count,
                    },
                );
            }
        }

        let mut hints = vec![
            StatusBarHint::new("r", "reload"),
            StatusBarHint::new("d", if state.show_details { "card" } else { "details" }),
        ];
        if state.show_details {
            hints.push(StatusBarHint::new("t", "tab"));
        }
        hints.push(StatusBarHint::new("q", "quit"));

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
