//! Slip message rendering (Telegram HTML parse mode).

use common::Proposition;

/// Format a shortlist and its deep-link as a Telegram message.
pub fn format_slip_message(shortlist: &[Proposition], link: &str) -> String {
    let total_edge: f64 = shortlist.iter().map(Proposition::edge_percent).sum();

    let mut msg = String::from("🎯 <b>New +EV Slip Found!</b>\n\n");

    for (i, prop) in shortlist.iter().enumerate() {
        msg.push_str(&format!(
            "{}. <b>{}</b> - {}\n",
            i + 1,
            html_escape(prop.subject_name()),
            html_escape(prop.category())
        ));
        msg.push_str(&format!(
            "   {} {} ({:+.1}% EV)\n\n",
            prop.direction().label(),
            prop.line(),
            prop.edge_percent()
        ));
    }

    msg.push_str(&format!("<b>Total EV:</b> {:+.1}%\n", total_edge));
    msg.push_str(&format!("<b>Legs:</b> {}\n\n", shortlist.len()));
    msg.push_str(&format!(
        "<a href=\"{}\">🔗 Click to Bet</a>",
        html_escape(link)
    ));

    msg
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Direction;

    fn leg(id: &str, direction: Direction, line: f64, edge: f64, name: &str, stat: &str) -> Proposition {
        Proposition::new(id, direction, line)
            .unwrap()
            .with_edge_percent(edge)
            .with_subject_name(name)
            .with_category(stat)
    }

    #[test]
    fn test_message_lists_legs_and_totals() {
        let legs = vec![
            leg("555", Direction::Over, 24.5, 18.3, "J. Doe", "points"),
            leg("9", Direction::Under, 6.5, 7.0, "A. Roe", "rebounds"),
        ];
        let msg = format_slip_message(&legs, "https://x.test/board?projections=555-o-24.5,9-u-6.5");

        assert!(msg.contains("1. <b>J. Doe</b> - points\n   Over 24.5 (+18.3% EV)"));
        assert!(msg.contains("2. <b>A. Roe</b> - rebounds\n   Under 6.5 (+7.0% EV)"));
        assert!(msg.contains("<b>Total EV:</b> +25.3%"));
        assert!(msg.contains("<b>Legs:</b> 2"));
        assert!(msg.contains(
            "<a href=\"https://x.test/board?projections=555-o-24.5,9-u-6.5\">"
        ));
    }

    #[test]
    fn test_escapes_markup_in_names_and_link() {
        let legs = vec![leg("1", Direction::Over, 1.5, 6.0, "<Tom & Jerry>", "goals")];
        let msg = format_slip_message(&legs, "https://x.test/?a=1&b=2");
        assert!(msg.contains("&lt;Tom &amp; Jerry&gt;"));
        assert!(msg.contains("href=\"https://x.test/?a=1&amp;b=2\""));
    }
}
