//! The base page template, shared styles, and formatting helpers.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::Date;

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 underline";

// Form styles
pub const FORM_TEXT_INPUT_STYLE: &str =
    "px-3 py-2 border rounded-md focus:ring-2 focus:ring-blue-400";
pub const FORM_SELECT_STYLE: &str = "px-3 py-2 border rounded-md focus:ring-2 focus:ring-blue-400";
pub const BUTTON_PRIMARY_STYLE: &str =
    "px-4 py-2 bg-blue-500 hover:bg-blue-600 text-white font-semibold rounded-md";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "bg-gray-100 text-gray-600 uppercase text-xs font-medium";
pub const TABLE_CELL_STYLE: &str = "px-4 py-3";

// Category badge style
pub const CATEGORY_BADGE_STYLE: &str =
    "px-2 py-1 bg-blue-100 text-blue-800 rounded-full text-xs";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "w-full max-w-6xl mx-auto px-6 py-8 text-gray-900";

/// An extra element to place in the `<head>` of a page.
pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

/// Wrap `content` in the shared page scaffolding (head, scripts, alert
/// container) and set the tab title to `title`.
pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="th"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - ExpenseTracker" }
                link href="/static/main.css" rel="stylesheet";

                script src="/static/htmx-2.0.8-min.js" {}
                script src="/static/htmx-ext-response-targets-2.0.4.js" {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50"
            {
                (content)

                // Alert container for out-of-band swaps
                div
                    id="alert-container"
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

/// A full error page with a large status `header`, e.g. "404".
pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="bg-white"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1 class="mb-4 text-7xl tracking-tight font-extrabold lg:text-9xl text-blue-600"
                    {
                        (header)
                    }

                    p class="mb-4 text-3xl md:text-4xl tracking-tight font-bold text-gray-900"
                    {
                        (description)
                    }

                    p class="mb-4 text-1xl md:text-2xl tracking-tight text-gray-900"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600 hover:bg-blue-800
                            font-medium rounded text-sm px-5 py-2.5 text-center my-4"
                    {
                        "กลับหน้าหลัก"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// Format an amount of money in baht, e.g. `1234.5` becomes `"฿1,234.50"`.
pub fn format_baht(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("฿")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-฿")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "฿0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}

/// Format a calendar date the way the original UI did with the th-TH locale:
/// day/month/year with the year in the Buddhist era, e.g. `1/2/2567`.
///
/// Display only. Grouping and comparisons always use the raw [Date].
pub fn format_thai_date(date: Date) -> String {
    const BUDDHIST_ERA_OFFSET: i32 = 543;

    format!(
        "{}/{}/{}",
        date.day(),
        date.month() as u8,
        date.year() + BUDDHIST_ERA_OFFSET
    )
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE)
        {
          (text)
        }
    )
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{format_baht, format_thai_date};

    #[test]
    fn formats_positive_amounts_with_thousands_separator() {
        assert_eq!(format_baht(1234.5), "฿1,234.50");
    }

    #[test]
    fn formats_negative_amounts_with_leading_sign() {
        assert_eq!(format_baht(-45.0), "-฿45.00");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_baht(0.0), "฿0.00");
    }

    #[test]
    fn keeps_trailing_zero() {
        assert_eq!(format_baht(12.3), "฿12.30");
    }

    #[test]
    fn thai_dates_use_buddhist_era() {
        assert_eq!(format_thai_date(date!(2024 - 01 - 01)), "1/1/2567");
        assert_eq!(format_thai_date(date!(2025 - 12 - 31)), "31/12/2568");
    }
}
