//! Statistics screen, and the same figures as plain text for `fir stats`.

use fir_core::stats::FirStatistics;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

const BAR_WIDTH: usize = 30;

/// A bar of `width * count / max` block characters, at least one for any
/// non-zero count.
pub fn bar(count: usize, max: usize, width: usize) -> String {
  if count == 0 || max == 0 {
    return String::new();
  }
  let len = (count * width).div_ceil(max).clamp(1, width);
  "█".repeat(len)
}

/// `(label, count)` rows for each section, in display order.
fn sections(stats: &FirStatistics) -> [(&'static str, Vec<(String, usize)>); 4] {
  [
    ("Status", vec![
      ("pending".to_string(), stats.pending_count),
      ("investigating".to_string(), stats.investigating_count),
      ("closed".to_string(), stats.closed_count),
    ]),
    (
      "By location",
      stats.firs_by_location.iter().map(|l| (l.location.clone(), l.count)).collect(),
    ),
    (
      "By officer",
      stats.firs_by_officer.iter().map(|o| (o.officer.clone(), o.count)).collect(),
    ),
    (
      "By month",
      stats.firs_by_month.iter().map(|m| (m.month.clone(), m.count)).collect(),
    ),
  ]
}

/// Render the statistics as plain text.
pub fn report(stats: &FirStatistics) -> String {
  let mut out = format!("Total FIRs: {}\n", stats.total());
  for (title, rows) in sections(stats) {
    out.push_str(&format!("\n{title}\n"));
    let max = rows.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    for (label, count) in &rows {
      out.push_str(&format!(
        "  {label:<label_width$}  {count:>4}  {}\n",
        bar(*count, max, BAR_WIDTH)
      ));
    }
  }
  out
}

// ─── TUI ─────────────────────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(stats) = &app.stats else {
    let block = Block::default()
      .title(" Statistics ")
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("No statistics loaded.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  // 2×2 grid of sections.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(area);
  let cells: Vec<Rect> = rows
    .iter()
    .flat_map(|row| {
      Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(*row)
        .to_vec()
    })
    .collect();

  for ((title, rows), cell) in sections(stats).into_iter().zip(cells) {
    draw_section(f, cell, title, &rows, stats.total());
  }
}

fn draw_section(
  f: &mut Frame,
  area: Rect,
  title: &str,
  rows: &[(String, usize)],
  total: usize,
) {
  let block = Block::default()
    .title(format!(" {title} ({total}) "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let max = rows.iter().map(|(_, c)| *c).max().unwrap_or(0);
  let label_width = rows
    .iter()
    .map(|(l, _)| l.chars().count())
    .max()
    .unwrap_or(0)
    .min(inner.width as usize / 2);
  let bar_width = (inner.width as usize)
    .saturating_sub(label_width + 8)
    .max(1);

  let lines: Vec<Line> = rows
    .iter()
    .map(|(label, count)| {
      let label: String = label.chars().take(label_width).collect();
      Line::from(vec![
        Span::styled(
          format!("{label:<label_width$} "),
          Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{count:>4} "), Style::default().fg(Color::Cyan)),
        Span::styled(bar(*count, max, bar_width), Style::default().fg(Color::Blue)),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
  use super::*;
  use fir_core::seed::demo_records;

  #[test]
  fn bar_scales_to_width() {
    assert_eq!(bar(0, 5, 10), "");
    assert_eq!(bar(5, 5, 10).chars().count(), 10);
    assert_eq!(bar(1, 100, 10).chars().count(), 1);
    assert_eq!(bar(1, 2, 10).chars().count(), 5);
  }

  #[test]
  fn report_covers_every_section() {
    let stats = FirStatistics::from_records(&demo_records());
    let out = report(&stats);
    assert!(out.starts_with("Total FIRs: 3\n"));
    for needle in ["Status", "By location", "Mumbai", "Officer Robert Chen", "Nov 2023"] {
      assert!(out.contains(needle), "missing {needle}:\n{out}");
    }
  }
}
