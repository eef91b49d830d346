//! Subject and body rendering for reminder mail.

use chime_core::Notification;

/// Subject line for `notification`.
pub fn subject(notification: &Notification) -> String {
    format!("Reminder: {}", notification.title)
}

/// HTML body for `notification`.
///
/// Interpolated fields pass through [`escape_html`] so a title like
/// `Lunch & <review>` cannot break the markup.
pub fn body_html(notification: &Notification) -> String {
    format!(
        "<html>\n\
         <body>\n\
         <h2>Schedule Reminder</h2>\n\
         <p>You have an upcoming item: <strong>{title}</strong></p>\n\
         <p>Time: {time}</p>\n\
         <p>Details: {details}</p>\n\
         <p>Please be prepared!</p>\n\
         </body>\n\
         </html>\n",
        title = escape_html(&notification.title),
        time = escape_html(&notification.occurs_at),
        details = escape_html(&notification.details),
    )
}

/// Escape text for interpolation into an HTML body.
///
/// Escapes: `& < > " '`
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
