//! Record list pane, left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
  app::{App, Screen},
  ui::status_color,
};

/// Render the record list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_firs();
  let total = app.firs.len();

  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" FIRs ({}/{}) ", filtered.len(), total)
  } else {
    format!(" FIRs ({}) ", total)
  };

  let border = if app.screen == Screen::FirList {
    Color::Gray
  } else {
    Color::DarkGray
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let items: Vec<ListItem> = filtered
    .iter()
    .map(|fir| {
      let badge = format!("{:<13}", fir.status.to_string());
      let mark = if fir.is_verified { "✓ " } else { "  " };
      ListItem::new(Line::from(vec![
        Span::styled(format!("{} ", fir.id), Style::default().fg(Color::Cyan)),
        Span::styled(badge, Style::default().fg(status_color(fir.status))),
        Span::styled(mark, Style::default().fg(Color::Green)),
        Span::raw(fir.title.clone()),
      ]))
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Filter bar along the bottom of the pane.
  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let mut state = ListState::default();
  state.select(if filtered.is_empty() {
    None
  } else {
    Some(app.list_cursor)
  });

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    inner_area,
    &mut state,
  );
}
