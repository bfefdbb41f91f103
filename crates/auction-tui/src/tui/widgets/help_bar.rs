// Help bar widget: key hints for the current stage.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::Stage;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        help_text(state.stage),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn help_text(stage: Stage) -> &'static str {
    match stage {
        Stage::Setup => " Enter:Start auction | c:Reload config | q:Quit",
        Stage::Auction => {
            " 1-9,0:Bid | s:Sold | u:Unsold | t:Log | v:Squad | \u{2190}/\u{2192}:Team | e:Export | r:New auction | q:Quit"
        }
        Stage::Results => " \u{2190}/\u{2192}:Team | e:Export | r:New auction | q:Quit",
    }
}
