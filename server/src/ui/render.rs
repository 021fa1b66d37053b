//! HTML rendering for the web form and results.
//!
//! The page is a registered Handlebars template, so every `{{value}}` is
//! HTML-escaped. Model output goes through pulldown-cmark first and is
//! inserted raw with `{{{...}}}`.

use handlebars::{Handlebars, RenderError, TemplateError};
use pulldown_cmark::{html, CowStr, Event, Options, Parser};
use restaurateur_core::{Cuisine, Dietary, MealType, RestaurantIdea, UNSET_SENTINEL};
use serde::Serialize;

const PAGE_TEMPLATE: &str = "page";

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AI Restaurant Generator</title>
<style>
body { margin: 0; font-family: system-ui, sans-serif; color: #f5f5f5;
       background: linear-gradient(rgba(0,0,0,0.3), rgba(0,0,0,0.3)), #3b2a1f; }
.layout { display: flex; min-height: 100vh; }
aside { width: 18rem; padding: 1.5rem; background: rgba(25, 55, 20, 0.3); border-radius: 10px; margin: 10px; }
aside label { display: block; margin: 1rem 0 0.3rem; font-weight: 600; }
aside select, aside button { width: 100%; padding: 0.4rem; font-size: 1rem; }
aside button { margin-top: 1.5rem; cursor: pointer; }
main { flex: 1; padding: 1.5rem 3rem; }
.warning { background: #7a5c00; padding: 0.8rem 1rem; border-radius: 6px; }
.failure { background: #7a1f1f; padding: 0.8rem 1rem; border-radius: 6px; }
</style>
</head>
<body>
<div class="layout">
<aside>
<form method="post" action="/generate">
{{#each selects}}
<label for="{{name}}">{{label}}</label>
<select id="{{name}}" name="{{name}}">
{{#each options}}
  <option value="{{value}}"{{#if selected}} selected{{/if}}>{{value}}</option>
{{/each}}
</select>
{{/each}}
<button type="submit">Generate Restaurant</button>
</form>
</aside>
<main>
<h1>&#127837; AI Restaurant Generator</h1>
<p>Generate a restaurant name, tagline, and menu with a hosted Llama model.</p>
{{#if warning}}<p class="warning">{{warning}}</p>{{/if}}
{{#if failure}}<p class="failure">{{failure}}</p>{{/if}}
{{#with idea}}
<section id="restaurant-name"><h2>&#127869;&#65039; Restaurant Name</h2>{{{name_html}}}</section>
<section id="tagline"><h2>&#128172; Tagline</h2>{{{tagline_html}}}</section>
<section id="menu"><h2>&#128220; Menu</h2>{{{menu_html}}}</section>
{{/with}}
</main>
</div>
</body>
</html>
"#;

/// What the selectors currently hold, as raw form values.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub cuisine: String,
    pub meal_type: String,
    pub dietary: String,
}

/// What to show below the form.
#[derive(Debug)]
pub enum Outcome<'a> {
    Empty,
    Warning(&'a str),
    Failure(&'a str),
    Idea(&'a RestaurantIdea),
}

#[derive(Serialize)]
struct PageData<'a> {
    selects: Vec<SelectData>,
    warning: Option<&'a str>,
    failure: Option<&'a str>,
    idea: Option<IdeaHtml>,
}

#[derive(Serialize)]
struct SelectData {
    name: &'static str,
    label: &'static str,
    options: Vec<ChoiceData>,
}

#[derive(Serialize)]
struct ChoiceData {
    value: &'static str,
    selected: bool,
}

#[derive(Serialize)]
struct IdeaHtml {
    name_html: String,
    tagline_html: String,
    menu_html: String,
}

/// Compiled page templates.
pub struct Pages {
    handlebars: Handlebars<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string(PAGE_TEMPLATE, PAGE)?;
        Ok(Self { handlebars })
    }

    /// The whole page: selectors in a sidebar, results in the main column.
    pub fn render(&self, form: &FormState, outcome: &Outcome<'_>) -> Result<String, RenderError> {
        self.handlebars
            .render(PAGE_TEMPLATE, &PageData::new(form, outcome))
    }
}

impl<'a> PageData<'a> {
    fn new(form: &FormState, outcome: &Outcome<'a>) -> Self {
        let selects = vec![
            select(
                "cuisine",
                "Select a cuisine:",
                Cuisine::ALL.iter().map(Cuisine::label),
                &form.cuisine,
            ),
            select(
                "meal_type",
                "Select meal type:",
                MealType::ALL.iter().map(MealType::label),
                &form.meal_type,
            ),
            select(
                "dietary",
                "Select dietary preference:",
                Dietary::ALL.iter().map(Dietary::label),
                &form.dietary,
            ),
        ];

        let (warning, failure, idea) = match *outcome {
            Outcome::Empty => (None, None, None),
            Outcome::Warning(message) => (Some(message), None, None),
            Outcome::Failure(message) => (None, Some(message), None),
            Outcome::Idea(idea) => (
                None,
                None,
                Some(IdeaHtml {
                    name_html: markdown_to_html(&idea.restaurant_name),
                    tagline_html: markdown_to_html(&idea.tagline),
                    menu_html: markdown_to_html(&idea.menu),
                }),
            ),
        };

        Self {
            selects,
            warning,
            failure,
            idea,
        }
    }
}

/// Render model output as markdown. Raw HTML in the text is escaped.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(CowStr::from(raw.into_string())),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// The sentinel comes first and is selected when nothing else matches.
fn select(
    name: &'static str,
    label: &'static str,
    choices: impl Iterator<Item = &'static str>,
    selected: &str,
) -> SelectData {
    let options = std::iter::once(UNSET_SENTINEL)
        .chain(choices)
        .map(|value| ChoiceData {
            value,
            selected: value.eq_ignore_ascii_case(selected)
                || (selected.is_empty() && value == UNSET_SENTINEL),
        })
        .collect();

    SelectData {
        name,
        label,
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(form: &FormState, outcome: &Outcome<'_>) -> String {
        Pages::new().unwrap().render(form, outcome).unwrap()
    }

    #[test]
    fn test_markdown_is_rendered() {
        let html = markdown_to_html("## Desserts\n- **Kulfi**: frozen milk");
        assert!(html.contains("<h2>Desserts</h2>"));
        assert!(html.contains("<strong>Kulfi</strong>"));
    }

    #[test]
    fn test_raw_html_from_model_is_escaped() {
        let html = markdown_to_html("Try our <script>alert(1)</script> special");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_warning_text_is_escaped() {
        let page = render(
            &FormState::default(),
            &Outcome::Warning("<b>Tom & Jerry</b>"),
        );
        assert!(!page.contains("<b>Tom"));
        assert!(page.contains("&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;"));
    }

    #[test]
    fn test_page_preselects_sentinel() {
        let page = render(&FormState::default(), &Outcome::Empty);
        assert!(page.contains("<option value=\"None\" selected>None</option>"));
        assert!(page.contains("<option value=\"Central African\">Central African</option>"));
        assert!(page.contains("<option value=\"Gluten-Free\">Gluten-Free</option>"));
        assert!(!page.contains("class=\"warning\""));
        assert!(!page.contains("id=\"menu\""));
    }

    #[test]
    fn test_page_keeps_selection() {
        let form = FormState {
            cuisine: "Indian".to_string(),
            meal_type: "Lunch".to_string(),
            dietary: "None".to_string(),
        };
        let page = render(&form, &Outcome::Empty);
        assert!(page.contains("<option value=\"Indian\" selected>Indian</option>"));
        assert!(page.contains("<option value=\"Lunch\" selected>Lunch</option>"));
        assert!(page.contains("<option value=\"None\">None</option>"));
    }

    #[test]
    fn test_page_shows_failure() {
        let page = render(&FormState::default(), &Outcome::Failure("Try again later."));
        assert!(page.contains("<p class=\"failure\">Try again later.</p>"));
    }

    #[test]
    fn test_page_shows_idea() {
        let idea = RestaurantIdea {
            restaurant_name: "Spice Route".to_string(),
            tagline: "A journey in every bite.".to_string(),
            menu: "## Beverages\n- Lassi".to_string(),
        };
        let page = render(&FormState::default(), &Outcome::Idea(&idea));
        assert!(page.contains("<p>Spice Route</p>"));
        assert!(page.contains("<h2>Beverages</h2>"));
    }
}
