//! The form for recording a new expense.

use maud::{Markup, html};
use time::Date;

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The create-expense form: title, amount, category, and date, pre-filled
/// with today's date.
///
/// Posts to the expense API via htmx; on failure an alert is swapped into
/// `#alert-container` so the user keeps what they typed.
pub fn expense_form(today: Date) -> Markup {
    html! {
        div class="p-6 mb-12 w-full border-b border-gray-400"
        {
            h2 class="text-xl font-bold mb-4 text-gray-700" { "เพิ่มรายการค่าใช้จ่าย" }

            form
                hx-post=(endpoints::EXPENSES_API)
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                class="grid grid-cols-1 md:grid-cols-5 gap-3"
            {
                input
                    type="text"
                    name="title"
                    placeholder="รายการ"
                    class=(FORM_TEXT_INPUT_STYLE);

                input
                    type="number"
                    name="amount"
                    step="0.01"
                    placeholder="จำนวนเงิน"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                input
                    type="text"
                    name="category"
                    placeholder="หมวดหมู่"
                    class=(FORM_TEXT_INPUT_STYLE);

                input
                    type="date"
                    name="spent_at"
                    value=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                button
                    type="submit"
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    "เพิ่ม"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use super::expense_form;

    #[test]
    fn form_posts_to_expense_api_with_all_fields() {
        let markup = expense_form(date!(2024 - 01 - 15));
        let html = Html::parse_fragment(&markup.into_string());

        let form = html
            .select(&Selector::parse("form").unwrap())
            .next()
            .expect("No form found");
        assert_eq!(form.value().attr("hx-post"), Some("/api/expenses"));

        for name in ["title", "amount", "category", "spent_at"] {
            let selector = Selector::parse(&format!("input[name='{name}']")).unwrap();
            assert!(
                html.select(&selector).next().is_some(),
                "No input named {name}"
            );
        }
    }

    #[test]
    fn date_field_defaults_to_today() {
        let markup = expense_form(date!(2024 - 01 - 15));
        let html = Html::parse_fragment(&markup.into_string());

        let date_input = html
            .select(&Selector::parse("input[name='spent_at']").unwrap())
            .next()
            .expect("No date input found");
        assert_eq!(date_input.value().attr("value"), Some("2024-01-15"));
    }
}
