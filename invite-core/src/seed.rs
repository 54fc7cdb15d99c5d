//! Seeding a starter design from the host wizard's event details.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::design::{Design, DEFAULT_FONT, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::element::{Element, ElementKind, Frame};

/// Event metadata supplied by the wizard to seed the initial design.
///
/// Every field is optional; absent fields fall back to literal placeholder
/// strings in the seeded text. Seeding is a one-time snapshot: later edits
/// to these details never propagate into an existing design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDetails {
    /// Event title.
    pub title: Option<String>,
    /// Host name.
    pub host: Option<String>,
    /// Event date as an ISO `YYYY-MM-DD` string.
    pub date: Option<String>,
    /// Event time, free-form.
    pub time: Option<String>,
    /// Venue name or address.
    pub venue: Option<String>,
    /// Background chosen by the theme step, used as the canvas background.
    pub theme_background: Option<String>,
    /// Event description. Carried for the host's record; not placed on
    /// the canvas.
    pub description: Option<String>,
}

impl EventDetails {
    /// Title to use in export file names and headings.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("event")
    }
}

impl Design {
    /// Build the deterministic starter design for the given event.
    ///
    /// Five stacked Inter text lines at fixed coordinates with z-indices
    /// 1 through 5, over the theme background (white when none was
    /// chosen).
    #[must_use]
    pub fn seeded(event: &EventDetails) -> Self {
        let background = event
            .theme_background
            .clone()
            .unwrap_or_else(|| "#FFFFFF".to_string());

        let title = event
            .title
            .clone()
            .unwrap_or_else(|| "Event Title".to_string());
        let host = format!(
            "Hosted by {}",
            event.host.as_deref().unwrap_or("Host Name")
        );
        let date = event
            .date
            .as_deref()
            .map_or_else(|| "Event Date".to_string(), format_event_date);
        let time = event
            .time
            .clone()
            .unwrap_or_else(|| "Event Time".to_string());
        let venue = event
            .venue
            .clone()
            .unwrap_or_else(|| "Event Venue".to_string());

        let lines = [
            (title, Frame::new(50.0, 100.0, 700.0, 80.0), 48.0, "#1F2937"),
            (host, Frame::new(50.0, 200.0, 700.0, 40.0), 24.0, "#6B7280"),
            (date, Frame::new(50.0, 300.0, 350.0, 30.0), 18.0, "#374151"),
            (time, Frame::new(450.0, 300.0, 300.0, 30.0), 18.0, "#374151"),
            (venue, Frame::new(50.0, 350.0, 700.0, 60.0), 16.0, "#4B5563"),
        ];

        let mut design = Design::new("main_design", DEFAULT_WIDTH, DEFAULT_HEIGHT)
            .with_background(background);

        for (index, (content, frame, font_size, fill)) in lines.into_iter().enumerate() {
            let element = Element::new(
                ElementKind::Text {
                    content,
                    font_size,
                    font_family: DEFAULT_FONT.to_string(),
                },
                frame,
                fill,
            )
            .with_z_index(i32::try_from(index + 1).unwrap_or(i32::MAX));
            design.elements.push(element);
        }

        design
    }
}

/// Format an ISO date as US long form, e.g. "Saturday, March 1, 2025".
///
/// Strings that do not parse as `YYYY-MM-DD` are passed through verbatim so
/// a hand-typed date still shows up on the invitation.
fn format_event_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_or_else(
        |_| date.to_string(),
        |parsed| parsed.format("%A, %B %-d, %Y").to_string(),
    )
}
