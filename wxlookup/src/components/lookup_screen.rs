//! Root screen
//!
//! Owns the child components and routes events: global keys first, dropdown
//! navigation while suggestions are open, everything else to the city input.
//! Mouse clicks go to the dropdown rows and the search button.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    SelectList, SelectListBehavior, SelectListProps, SelectListStyle, TextInput, TextInputProps,
    TextInputStyle,
};

use super::{Component, HelpBar, HelpBarProps, SPINNERS, WeatherPanel, WeatherPanelProps};
use crate::action::Action;
use crate::state::AppState;

const PLACEHOLDER: &str = "Enter city name";
const SEARCH_BUTTON: &str = "[ Search ]";
const INPUT_HEIGHT: u16 = 3;

/// Rows shown before the dropdown scrolls
pub const MAX_VISIBLE: u16 = 6;

pub struct LookupScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Rows of the last rendered dropdown, for hit-testing clicks
#[derive(Clone, Copy)]
struct DropdownRows {
    area: Rect,
    offset: usize,
}

#[derive(Default)]
pub struct LookupScreen {
    input: TextInput,
    suggestions: SelectList,
    /// Last query the input produced or was synced to
    input_value: String,
    rows: Option<DropdownRows>,
    button_area: Option<Rect>,
}

impl LookupScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn input_props(value: &str, is_focused: bool) -> TextInputProps<'_, Action> {
        TextInputProps {
            value,
            placeholder: PLACEHOLDER,
            is_focused,
            style: TextInputStyle::minimal(),
            on_change: Action::QueryChange,
            on_submit: |_| Action::SearchSubmit,
            on_cursor_move: None,
        }
    }

    fn list_props<'a>(
        items: &'a [Line<'static>],
        highlighted: Option<usize>,
    ) -> SelectListProps<'a, Line<'static>, Action> {
        let mut style = SelectListStyle::default();
        style.selection.disabled = highlighted.is_none();
        SelectListProps {
            items,
            count: items.len(),
            selected: highlighted.unwrap_or(0),
            is_focused: true,
            style,
            behavior: SelectListBehavior::default(),
            on_select: Action::SuggestSelect,
            render_item: &plain_line,
        }
    }

    fn suggestion_lines(state: &AppState) -> Vec<Line<'static>> {
        state
            .visible_suggestions()
            .iter()
            .map(|name| Line::raw(name.clone()))
            .collect()
    }

    /// Moves the cursor to the end when the query changed outside the input
    /// (a picked suggestion or `--city`)
    fn sync_input(&mut self, value: &str) {
        if self.input_value == value {
            return;
        }
        let end = EventKind::Key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        let _ = self.input.handle_event(&end, Self::input_props(value, true));
        self.input_value = value.to_string();
    }

    fn handle_key(&mut self, event: &EventKind, props: &LookupScreenProps<'_>) -> Vec<Action> {
        let EventKind::Key(key) = event else {
            return vec![];
        };
        let state = props.state;
        let dropdown_open = !state.visible_suggestions().is_empty();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                vec![Action::Quit]
            }
            KeyCode::Esc if dropdown_open => vec![Action::SuggestDismiss],
            KeyCode::Esc => vec![Action::Quit],
            KeyCode::Enter if dropdown_open && state.highlighted.is_some() => {
                let items = Self::suggestion_lines(state);
                self.suggestions
                    .handle_event(event, Self::list_props(&items, state.highlighted))
                    .into_iter()
                    .collect()
            }
            KeyCode::Down if dropdown_open => vec![Action::SuggestHighlightNext],
            KeyCode::Up if dropdown_open => vec![Action::SuggestHighlightPrev],
            _ => {
                self.sync_input(&state.query);
                let actions: Vec<Action> = self
                    .input
                    .handle_event(event, Self::input_props(&state.query, props.is_focused))
                    .into_iter()
                    .collect();
                for action in &actions {
                    if let Action::QueryChange(value) = action {
                        self.input_value = value.clone();
                    }
                }
                actions
            }
        }
    }

    fn handle_mouse(&mut self, event: &EventKind, props: &LookupScreenProps<'_>) -> Vec<Action> {
        let EventKind::Mouse(mouse) = event else {
            return vec![];
        };
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let position = Position::new(mouse.column, mouse.row);

        let count = props.state.visible_suggestions().len();
        if let Some(rows) = self.rows.filter(|rows| count > 0 && rows.area.contains(position)) {
            let index = rows.offset + (mouse.row - rows.area.y) as usize;
            if index < count {
                return vec![Action::SuggestSelect(index)];
            }
            return vec![];
        }

        match self.button_area {
            Some(area) if area.contains(position) => vec![Action::SearchSubmit],
            _ => vec![],
        }
    }

    fn render_dropdown(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let items = Self::suggestion_lines(state);
        if items.is_empty() || area.height < 3 {
            self.rows = None;
            return;
        }

        // Mirrors the list's own scrolling so clicks land on the drawn row
        let rows_area = Block::default().borders(Borders::ALL).inner(area);
        let viewport = rows_area.height as usize;
        let selected = state.highlighted.unwrap_or(0).min(items.len() - 1);
        let mut offset = self.rows.map_or(0, |rows| rows.offset);
        if selected < offset {
            offset = selected;
        } else if selected >= offset + viewport {
            offset = selected + 1 - viewport;
        }
        offset = offset.min(items.len().saturating_sub(viewport));
        self.rows = Some(DropdownRows {
            area: rows_area,
            offset,
        });

        frame.render_widget(Clear, area);
        self.suggestions
            .render(frame, area, Self::list_props(&items, state.highlighted));
    }
}

fn plain_line(line: &Line<'static>) -> Line<'static> {
    line.clone()
}

impl Component<Action> for LookupScreen {
    type Props<'a> = LookupScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return vec![];
        }
        match event {
            EventKind::Key(_) => self.handle_key(event, &props),
            EventKind::Mouse(_) => self.handle_mouse(event, &props),
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        let loading_indicator = if state.is_loading() {
            let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
            format!(" {} ", spinner)
        } else {
            String::new()
        };

        let outer_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" ☁ Weather lookup ({}){}", state.tier.name(), loading_indicator))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);
        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        let [input_area, button_row, body_area, help_area] = Layout::vertical([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let input_border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let input_block = Block::default()
            .borders(Borders::ALL)
            .title(" City ")
            .border_style(input_border);
        let field_area = input_block.inner(input_area);
        frame.render_widget(input_block, input_area);
        self.sync_input(&state.query);
        self.input.render(
            frame,
            field_area,
            Self::input_props(&state.query, props.is_focused),
        );

        let button_width = (SEARCH_BUTTON.chars().count() as u16).min(button_row.width);
        let button_area = Rect {
            x: button_row.x + button_row.width.saturating_sub(button_width),
            width: button_width,
            ..button_row
        };
        self.button_area = Some(button_area);
        let button_style = if state.is_loading() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan).bold()
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(SEARCH_BUTTON, button_style))),
            button_area,
        );

        WeatherPanel.render(frame, body_area, WeatherPanelProps { state });
        HelpBar.render(
            frame,
            help_area,
            HelpBarProps {
                with_suggestions: state.tier.has_suggestions(),
            },
        );

        // Dropdown overlays the rows under the input
        let count = state.visible_suggestions().len() as u16;
        let dropdown_top = input_area.y + input_area.height;
        let room = (inner.y + inner.height).saturating_sub(dropdown_top);
        let dropdown_area = Rect {
            x: input_area.x,
            y: dropdown_top,
            width: input_area.width,
            height: (count.min(MAX_VISIBLE) + 2).min(room),
        };
        self.render_dropdown(frame, dropdown_area, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Fetch, Tier};
    use crossterm::event::MouseEvent;
    use ratatui::{Terminal, backend::TestBackend};
    use tui_dispatch::testing::*;

    fn with_suggestions(highlighted: Option<usize>) -> AppState {
        let mut state = AppState::new(Tier::Autocomplete);
        state.query = "Ber".into();
        state.suggestions = Fetch::Loaded(vec!["Berlin".into(), "Bern".into()]);
        state.highlighted = highlighted;
        state
    }

    fn press(screen: &mut LookupScreen, state: &AppState, event: EventKind) -> Vec<Action> {
        screen
            .handle_event(
                &event,
                LookupScreenProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    fn click(column: u16, row: u16) -> EventKind {
        EventKind::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::empty(),
        })
    }

    fn render_sized(screen: &mut LookupScreen, state: &AppState, width: u16) -> String {
        let mut render = RenderHarness::new(width, 24);
        render.render_to_string_plain(|frame| {
            screen.render(
                frame,
                frame.area(),
                LookupScreenProps {
                    state,
                    is_focused: true,
                },
            );
        })
    }

    fn render(screen: &mut LookupScreen, state: &AppState) -> String {
        render_sized(screen, state, 60)
    }

    fn cursor_after_render(screen: &mut LookupScreen, state: &AppState) -> Position {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|frame| {
                screen.render(
                    frame,
                    frame.area(),
                    LookupScreenProps {
                        state,
                        is_focused: true,
                    },
                );
            })
            .unwrap();
        terminal.get_cursor_position().unwrap()
    }

    #[test]
    fn test_enter_submits_without_highlight() {
        let mut screen = LookupScreen::new();
        let state = with_suggestions(None);
        press(&mut screen, &state, EventKind::Key(key("enter")))
            .assert_first(Action::SearchSubmit);
    }

    #[test]
    fn test_enter_picks_highlighted_suggestion() {
        let mut screen = LookupScreen::new();
        let state = with_suggestions(Some(1));
        press(&mut screen, &state, EventKind::Key(key("enter")))
            .assert_first(Action::SuggestSelect(1));
    }

    #[test]
    fn test_arrows_navigate_open_dropdown() {
        let mut screen = LookupScreen::new();
        let state = with_suggestions(None);
        press(&mut screen, &state, EventKind::Key(key("down")))
            .assert_first(Action::SuggestHighlightNext);
        press(&mut screen, &state, EventKind::Key(key("up")))
            .assert_first(Action::SuggestHighlightPrev);

        let closed = AppState::new(Tier::Autocomplete);
        press(&mut screen, &closed, EventKind::Key(key("down"))).assert_empty();
    }

    #[test]
    fn test_esc_closes_dropdown_then_quits() {
        let mut screen = LookupScreen::new();
        press(&mut screen, &with_suggestions(None), EventKind::Key(key("esc")))
            .assert_first(Action::SuggestDismiss);
        press(
            &mut screen,
            &AppState::new(Tier::Basic),
            EventKind::Key(key("esc")),
        )
        .assert_first(Action::Quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut screen = LookupScreen::new();
        let state = AppState::new(Tier::Basic);
        press(&mut screen, &state, EventKind::Key(ctrl_key('c'))).assert_first(Action::Quit);
    }

    #[test]
    fn test_typing_reaches_input() {
        let mut screen = LookupScreen::new();
        let state = with_suggestions(None);
        press(&mut screen, &state, EventKind::Key(char_key('l')))
            .assert_first(Action::QueryChange("Berl".into()));
    }

    #[test]
    fn test_typing_after_picked_suggestion_appends() {
        let mut screen = LookupScreen::new();
        let mut state = AppState::new(Tier::Autocomplete);
        state.query = "Be".into();
        press(&mut screen, &state, EventKind::Key(char_key('r')))
            .assert_first(Action::QueryChange("Ber".into()));

        // the reducer replaced the text with the picked name
        state.query = "Bern".into();
        press(&mut screen, &state, EventKind::Key(char_key('e')))
            .assert_first(Action::QueryChange("Berne".into()));
    }

    #[test]
    fn test_cursor_follows_query_end() {
        let mut screen = LookupScreen::new();
        let mut state = AppState::new(Tier::Basic);
        state.query = "Oslo".into();

        // outer border, input border, then four characters
        assert_eq!(cursor_after_render(&mut screen, &state), Position::new(6, 2));
    }

    #[test]
    fn test_long_query_stays_inside_input_box() {
        let mut screen = LookupScreen::new();
        let mut state = AppState::new(Tier::Basic);
        state.query = "Llanfairpwllgwyngyllgogerychwyrndrobwllllantysiliogogogoch".into();

        let output = render_sized(&mut screen, &state, 30);
        let input_row = output.lines().nth(2).unwrap();
        assert!(input_row.contains("Llanfair"));
        assert!(input_row.trim_end().ends_with("││"));
        press(&mut screen, &state, EventKind::Key(char_key('!')))
            .assert_first(Action::QueryChange(format!("{}!", state.query)));
    }

    #[test]
    fn test_click_search_button() {
        let mut screen = LookupScreen::new();
        let state = AppState::new(Tier::Basic);
        let output = render(&mut screen, &state);

        let row = output
            .lines()
            .position(|line| line.contains(SEARCH_BUTTON))
            .unwrap();
        let column = output
            .lines()
            .nth(row)
            .and_then(|line| line.chars().position(|c| c == '['))
            .unwrap();

        press(&mut screen, &state, click(column as u16 + 2, row as u16))
            .assert_first(Action::SearchSubmit);
    }

    #[test]
    fn test_click_suggestion_row() {
        let mut screen = LookupScreen::new();
        let state = with_suggestions(None);
        let output = render(&mut screen, &state);

        let row = output
            .lines()
            .position(|line| line.contains("Bern") && !line.contains("Berlin"))
            .unwrap();
        press(&mut screen, &state, click(5, row as u16)).assert_first(Action::SuggestSelect(1));
    }

    #[test]
    fn test_click_scrolled_dropdown_row() {
        let mut screen = LookupScreen::new();
        let mut state = AppState::new(Tier::Autocomplete);
        state.query = "San".into();
        state.suggestions = Fetch::Loaded((0..9).map(|i| format!("San {i}")).collect());
        state.highlighted = Some(8);
        let output = render(&mut screen, &state);

        let row = output
            .lines()
            .position(|line| line.contains("San 8"))
            .unwrap();
        press(&mut screen, &state, click(5, row as u16)).assert_first(Action::SuggestSelect(8));
    }

    #[test]
    fn test_unfocused_ignores_events() {
        let mut screen = LookupScreen::new();
        let state = AppState::new(Tier::Basic);
        screen
            .handle_event(
                &EventKind::Key(key("enter")),
                LookupScreenProps {
                    state: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect::<Vec<_>>()
            .assert_empty();
    }
}
