//! Alert fragments for displaying error messages to users.
//!
//! Alerts are swapped into the `#alert-container` element by htmx when a
//! form post fails, so the page keeps whatever the user already typed.

use maud::{Markup, html};

/// Renders an error alert with a bold `message` line and smaller `details`.
pub fn alert_error(message: &str, details: &str) -> Markup {
    html!(
        div
            id="alert"
            role="alert"
            class="p-4 mb-4 text-red-800 border border-red-300 rounded-lg bg-red-50"
        {
            p class="font-semibold" { (message) }

            @if !details.is_empty() {
                p class="text-sm" { (details) }
            }

            button
                type="button"
                class="mt-2 text-xs underline"
                onclick="document.getElementById('alert').remove()"
            {
                "ปิด"
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::alert_error;

    #[test]
    fn renders_message_and_details() {
        let markup = alert_error("บันทึกข้อมูลไม่สำเร็จ", "ลองใหม่อีกครั้ง");
        let html = Html::parse_fragment(&markup.into_string());

        let alert = html
            .select(&Selector::parse("div[role='alert']").unwrap())
            .next()
            .expect("No alert element found");
        let text = alert.text().collect::<String>();

        assert!(text.contains("บันทึกข้อมูลไม่สำเร็จ"));
        assert!(text.contains("ลองใหม่อีกครั้ง"));
    }

    #[test]
    fn omits_details_paragraph_when_empty() {
        let markup = alert_error("บันทึกข้อมูลไม่สำเร็จ", "");
        let html = Html::parse_fragment(&markup.into_string());

        let paragraphs = html
            .select(&Selector::parse("p").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(paragraphs.len(), 1);
    }
}
