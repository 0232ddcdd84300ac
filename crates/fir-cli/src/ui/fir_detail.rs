//! Record detail pane, right panel.

use fir_core::fir::{EvidenceKind, Fir};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
  app::{App, Screen},
  ui::{format_millis, status_color},
};

/// Render `fir` into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App, fir: &Fir) {
  let border = if app.screen == Screen::FirDetail {
    Color::Gray
  } else {
    Color::DarkGray
  };
  let block = Block::default()
    .title(format!(" {} ", fir.title))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let para = Paragraph::new(lines(fir))
    .wrap(Wrap { trim: false })
    .scroll((app.detail_scroll as u16, 0));
  f.render_widget(para, inner);
}

fn field<'a>(label: &'a str, value: impl Into<String>) -> Line<'a> {
  Line::from(vec![
    Span::styled(
      format!("{label:<16}"),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::raw(value.into()),
  ])
}

fn heading(text: &str) -> Line<'_> {
  Line::from(Span::styled(
    text,
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
  ))
}

/// Every field of `fir`, grouped into sections.
fn lines(fir: &Fir) -> Vec<Line<'_>> {
  let verified = if fir.is_verified {
    Span::styled("verified", Style::default().fg(Color::Green))
  } else {
    Span::styled("unverified", Style::default().fg(Color::Red))
  };

  let mut lines = vec![
    field("id", fir.id.as_str()),
    Line::from(vec![
      Span::styled(
        format!("{:<16}", "status"),
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
      Span::styled(
        fir.status.to_string(),
        Style::default().fg(status_color(fir.status)),
      ),
      Span::raw("  "),
      verified,
    ]),
    field("filed", format_millis(fir.timestamp)),
    field("incident", fir.date_time.as_str()),
    field("location", fir.location.as_str()),
    field("offence", fir.nature_of_offence.as_str()),
    Line::from(""),
    heading("Parties"),
    field("victim", fir.victim_name.as_str()),
    field("complainant", fir.complainant_name.as_str()),
    field("witness", fir.witness_name.as_str()),
    Line::from(""),
    heading("Police"),
    field("officer", fir.police_name.as_str()),
    field("batch", fir.police_batch_id.as_str()),
    field("station", fir.police_station_name.as_str()),
    Line::from(""),
    heading("Description"),
    Line::from(fir.description.as_str()),
    Line::from(""),
    heading("Ledger"),
    field("ipfs cid", fir.ipfs_cid.as_deref().unwrap_or("—")),
    field("tx hash", fir.blockchain_tx_hash.as_deref().unwrap_or("—")),
  ];

  lines.push(Line::from(""));
  match &fir.evidence {
    None => lines.push(Line::from(Span::styled(
      "Evidence withheld or not attached.",
      Style::default().fg(Color::DarkGray),
    ))),
    Some(items) => {
      lines.push(heading("Evidence"));
      if items.is_empty() {
        lines.push(Line::from(Span::styled(
          "No evidence items.",
          Style::default().fg(Color::DarkGray),
        )));
      }
      for item in items {
        let icon = match item.kind {
          EvidenceKind::Text => "✎ ",
          EvidenceKind::Image => "▣ ",
          EvidenceKind::Video => "▶ ",
        };
        lines.push(Line::from(vec![
          Span::styled(icon, Style::default().fg(Color::Yellow)),
          Span::styled(
            item.description.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
          ),
          Span::styled(
            format!("  {}", format_millis(item.timestamp)),
            Style::default().fg(Color::DarkGray),
          ),
        ]));
        lines.push(Line::from(format!("  {}", item.content)));
      }
    }
  }

  lines
}

#[cfg(test)]
mod tests {
  use super::*;
  use fir_core::seed::demo_records;

  fn text(lines: &[Line<'_>]) -> String {
    lines
      .iter()
      .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
      .collect::<Vec<_>>()
      .join("\n")
  }

  #[test]
  fn detail_lists_every_field_and_evidence() {
    let fir = demo_records().remove(2);
    let out = text(&lines(&fir));
    for needle in [
      "FIR-2023-003",
      "investigating",
      "Raj Kumar",
      "Anand Verma",
      "PB-4567",
      "South Zone Police Station",
      "MG Road, Bangalore",
      "QmZ9VxZEEGLBzMYzQnY5q6a54GJy6aMNTXJ6zwrBBqQS1d",
      "CCTV clip from nearby shop",
      "https://example.com/cctv-clip-1.mp4",
    ] {
      assert!(out.contains(needle), "missing {needle}:\n{out}");
    }
  }

  #[test]
  fn redacted_evidence_is_noted() {
    let fir = demo_records().remove(0).without_evidence();
    assert!(text(&lines(&fir)).contains("Evidence withheld"));
  }
}
