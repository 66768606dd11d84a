use super::view::{FormView, OrderGroup, SelectField, COMMENT_MAX_CHARS};

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

fn push_select(out: &mut String, id: &str, label: &str, field: &SelectField) {
    out.push_str(&format!(
        "      <label for=\"{id}\">{}</label>\n      <select id=\"{id}\" name=\"{id}\" required>\n",
        escape_html(label)
    ));
    for (index, option) in field.options.iter().enumerate() {
        let selected = if index == field.selected { " selected" } else { "" };
        out.push_str(&format!(
            "        <option value=\"{}\"{selected}>{}</option>\n",
            escape_html(&option.value),
            escape_html(&option.text)
        ));
    }
    out.push_str("      </select>\n");
}

/// `extra` is inserted verbatim and must not carry user data
fn push_input(
    out: &mut String,
    id: &str,
    label: &str,
    kind: &str,
    value: &str,
    extra: Option<&str>,
) {
    let extra = extra.map(|attrs| format!(" {attrs}")).unwrap_or_default();
    out.push_str(&format!(
        "      <label for=\"{id}\">{}</label>\n      <input type=\"{kind}\" id=\"{id}\" name=\"{id}\" value=\"{}\"{extra} required>\n",
        escape_html(label),
        escape_html(value)
    ));
}

fn push_group(out: &mut String, group: &OrderGroup) {
    let id = escape_html(group.display_id());
    out.push_str(&format!(
        "    <section class=\"order-card\" data-order-id=\"{id}\">\n      <h5>{}</h5>\n      <p class=\"muted\">KW: {}</p>\n",
        escape_html(&group.heading()),
        escape_html(&group.cw)
    ));

    push_input(
        out,
        &format!("wagons-{id}"),
        "Wagons (Qty.)",
        "number",
        &group.wagons.to_string(),
        Some("min=\"1\""),
    );
    push_input(out, &format!("date-{id}"), "Transport Date", "date", &group.transport_date, None);
    push_select(out, &format!("profile-{id}"), "Wagon Profile", &group.profile);
    push_select(out, &format!("type-{id}"), "Wagon Type", &group.wagon_type);

    out.push_str(&format!(
        "      <h6>Departure Time Slots ({})</h6>\n",
        escape_html(&group.departure)
    ));
    push_select(
        out,
        &format!("departure-arrival-slot-{id}"),
        "Arrival Time Slot",
        &group.departure_arrival_slot,
    );
    push_select(out, &format!("departure-time-{id}"), "Departure Time", &group.departure_time);

    out.push_str(&format!(
        "      <h6>Destination Time Slots ({})</h6>\n",
        escape_html(&group.destination)
    ));
    push_input(
        out,
        &format!("delivery-date-{id}"),
        "Delivery Date",
        "date",
        &group.delivery_date,
        None,
    );
    push_select(
        out,
        &format!("destination-arrival-slot-{id}"),
        "Arrival Time Slot",
        &group.destination_arrival_slot,
    );
    push_select(
        out,
        &format!("destination-departure-time-{id}"),
        "Departure Time",
        &group.destination_departure_time,
    );

    push_select(out, &format!("reason-{id}"), "Reason for Underdelivery", &group.reason);
    out.push_str(&format!(
        "      <label for=\"comment-{id}\">Comment (Free Text)</label>\n      <textarea id=\"comment-{id}\" name=\"comment-{id}\" maxlength=\"{COMMENT_MAX_CHARS}\">{}</textarea>\n",
        escape_html(&group.comment)
    ));
    out.push_str("    </section>\n");
}

/// Render the form as a standalone HTML page
pub fn render_html(view: &FormView) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"de\">\n<head>\n  <meta charset=\"UTF-8\">\n  <title>Auftragsbestätigung</title>\n</head>\n<body>\n");

    match view {
        FormView::Orders(groups) => {
            out.push_str("  <form id=\"orderForm\">\n");
            for group in groups {
                push_group(&mut out, group);
            }
            out.push_str("    <button type=\"submit\" id=\"submitBtn\">Absenden</button>\n  </form>\n");
        }
        FormView::Empty(notice) => {
            out.push_str(&format!(
                "  <div class=\"alert alert-danger\" role=\"alert\">\n    <strong>{}</strong> {}<br>\n    <small>{}</small>\n  </div>\n",
                escape_html(notice.title),
                escape_html(notice.message),
                escape_html(notice.hint)
            ));
            out.push_str("  <button type=\"submit\" id=\"submitBtn\" disabled>Absenden</button>\n");
        }
    }

    out.push_str("</body>\n</html>\n");
    out
}
