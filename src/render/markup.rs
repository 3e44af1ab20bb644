//! HTML markup for the itinerary preview and print document.

use crate::model::{Day, Itinerary};
use std::fmt::Write;

/// Stylesheet embedded in the print document.
pub const PRINT_STYLESHEET: &str = "body{font-family:Inter,sans-serif;padding:20px;} \
.border{border:1px solid #e5e7eb;border-radius:6px;padding:10px;margin-bottom:12px;}";

/// Escape text for inclusion in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render multi-line text with `<br>` between lines.
fn escape_multiline(text: &str) -> String {
    text.lines().map(escape_html).collect::<Vec<_>>().join("<br>")
}

fn or_dash(text: &str) -> String {
    if text.trim().is_empty() {
        "-".to_string()
    } else {
        escape_html(text)
    }
}

/// Render the preview fragment shown on screen and captured for export.
pub fn to_preview_markup(itinerary: &Itinerary) -> String {
    let mut out = String::new();

    out.push_str("<div class=\"itinerary\">\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(&itinerary.title));
    let _ = writeln!(
        out,
        "<p class=\"overview\">{} &middot; {} traveller{}</p>",
        or_dash(&itinerary.total_duration),
        itinerary.travellers,
        if itinerary.travellers == 1 { "" } else { "s" }
    );
    let _ = writeln!(
        out,
        "<p class=\"route\"><strong>Departure:</strong> {} &nbsp; <strong>Arrival:</strong> {}</p>",
        or_dash(&itinerary.departure),
        or_dash(&itinerary.arrival)
    );

    let hotel = &itinerary.hotel;
    out.push_str("<div class=\"border hotel\">\n<h2>Hotel</h2>\n");
    let _ = writeln!(
        out,
        "<p>{}, {}</p>",
        or_dash(&hotel.name),
        or_dash(&hotel.city)
    );
    let _ = writeln!(
        out,
        "<p>Check-in: {} &nbsp; Check-out: {} &nbsp; Nights: {}</p>",
        hotel
            .check_in
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
        hotel
            .check_out
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
        hotel.stay_nights()
    );
    out.push_str("</div>\n");

    out.push_str("<div class=\"border payments\">\n<h2>Payment Plan</h2>\n<table>\n");
    out.push_str("<tr><th>#</th><th>Amount</th><th>Due Date</th></tr>\n");
    for (idx, payment) in itinerary.payments.iter().enumerate() {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            idx + 1,
            or_dash(&payment.amount),
            payment
                .due_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
    out.push_str("</table>\n</div>\n");

    out.push_str("<div class=\"border terms\">\n");
    let _ = writeln!(
        out,
        "<h2>Inclusions</h2>\n<p>{}</p>",
        escape_multiline(&itinerary.inclusions)
    );
    let _ = writeln!(
        out,
        "<h2>Exclusions</h2>\n<p>{}</p>",
        escape_multiline(&itinerary.exclusions)
    );
    out.push_str("</div>\n");

    for day in &itinerary.days {
        render_day(&mut out, day);
    }

    out.push_str("</div>\n");
    out
}

fn render_day(out: &mut String, day: &Day) {
    out.push_str("<div class=\"border day\">\n");
    let _ = writeln!(out, "<h3>{}</h3>", escape_html(&day.title));
    for (label, text) in [
        ("Morning", &day.morning),
        ("Afternoon", &day.afternoon),
        ("Evening", &day.evening),
    ] {
        let _ = writeln!(
            out,
            "<p><strong>{}:</strong> {}</p>",
            label,
            escape_multiline(text)
        );
    }

    let legs: Vec<_> = day
        .transports
        .iter()
        .filter(|t| !t.kind.label().is_empty() || !t.details.trim().is_empty())
        .collect();
    if !legs.is_empty() {
        out.push_str("<h4>Transports / Transfers</h4>\n<ul>\n");
        for leg in legs {
            let _ = writeln!(
                out,
                "<li><strong>{}</strong> {}</li>",
                escape_html(leg.kind.label()),
                escape_html(&leg.details)
            );
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</div>\n");
}

/// Wrap the preview fragment into a standalone, printable HTML document.
pub fn to_print_document(itinerary: &Itinerary) -> String {
    let mut out = String::new();
    out.push_str("<html><head><title>Itinerary</title>");
    let _ = write!(out, "<style>{}</style>", PRINT_STYLESHEET);
    out.push_str("</head><body>");
    out.push_str(&to_preview_markup(itinerary));
    out.push_str("</body></html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransportKind;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>Tom & \"Jerry\"</b>"),
            "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_preview_contains_sections() {
        let trip = Itinerary::default()
            .with_day_added()
            .with_transport_updated(1, 0, |t| {
                t.kind = TransportKind::Train;
                t.details = "Mumbai -> Pune".to_string();
            });
        let html = to_preview_markup(&trip);

        assert!(html.contains("<h1>Vigovia Sample Trip</h1>"));
        assert!(html.contains("2 travellers"));
        assert!(html.contains("Payment Plan"));
        assert!(html.contains("<h3>Day 1 - Arrival</h3>"));
        assert!(html.contains("<h3>Day 2</h3>"));
        assert!(html.contains("<strong>Train</strong> Mumbai -&gt; Pune"));
    }

    #[test]
    fn test_untouched_transport_rows_are_skipped() {
        let trip = Itinerary::default().with_day_added();
        let html = to_preview_markup(&trip);
        // day 1 has a Flight row, day 2 only an unspecified empty row
        assert_eq!(html.matches("Transports / Transfers").count(), 1);
    }

    #[test]
    fn test_print_document_wraps_preview() {
        let html = to_print_document(&Itinerary::default());
        assert!(html.starts_with("<html><head><title>Itinerary</title>"));
        assert!(html.contains(PRINT_STYLESHEET));
        assert!(html.ends_with("</body></html>"));
    }
}
