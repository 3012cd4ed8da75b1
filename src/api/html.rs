//! Server-side markup for the search and recommendations pages.

use askama::Template;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::{
    error::AppResult,
    workflow::{Card, PageView, Panel, SEARCH_CONTROL_ID},
};

const APP_NAME: &str = "CineMatch";
const TAGLINE: &str = "Discover your next favorite movie with AI-powered recommendations";

struct SuggestionLink {
    label: String,
    href: String,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{{ app_name }}</title>
  </head>
  <body>
    <main class="container mx-auto px-4 py-12">
      <header class="text-center mb-12">
        <h1 class="text-5xl font-bold">{{ app_name }}</h1>
        <p class="text-xl">{{ tagline }}</p>
      </header>
      <section id="{{ search_control_id }}" class="max-w-2xl mx-auto mb-12">
        <form method="get" action="/">
          <label for="search-input" class="block font-medium mb-3 text-lg">Choose a movie you love</label>
          <input id="search-input" type="text" name="q" value="{{ view.search.text }}" placeholder="{{ view.search.placeholder }}"{% if view.search.disabled %} disabled{% endif %}>
        </form>
        {% if show_suggestions %}
        <ul class="suggestions mt-3 max-h-48 overflow-y-auto rounded-lg">
          {% for link in suggestions %}
          <li><a class="block px-4 py-3" href="{{ link.href }}">{{ link.label }}</a></li>
          {% endfor %}
          {% if suggestions.is_empty() %}
          <li class="px-4 py-3">No movies found</li>
          {% endif %}
        </ul>
        {% endif %}
        {% if let Some(selected) = view.selected %}
        <div class="selected p-4 rounded-lg"><span class="font-medium">Selected:</span> <span>{{ selected }}</span></div>
        {% endif %}
        {% if let Some(href) = recommend_href %}
        <a class="button w-full h-14 text-lg font-semibold" href="{{ href }}">Get Recommendations</a>
        {% else %}
        <button class="button w-full h-14 text-lg font-semibold" disabled>Get Recommendations</button>
        {% endif %}
      </section>
      {% if let Some(banner) = view.banner %}
      <div class="alert max-w-2xl mx-auto mb-8 rounded-lg p-4 text-center" role="alert">{{ banner }}</div>
      {% endif %}
    </main>
  </body>
</html>"#,
    ext = "html"
)]
struct SearchPage<'a> {
    app_name: &'a str,
    tagline: &'a str,
    search_control_id: &'a str,
    view: &'a PageView,
    show_suggestions: bool,
    suggestions: Vec<SuggestionLink>,
    recommend_href: Option<String>,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{{ app_name }} - {{ movie }}</title>
  </head>
  <body>
    <main class="container mx-auto px-4 py-12">
      <nav class="mb-8"><a class="button ghost" href="/">Back to Search</a></nav>
      <header class="text-center mb-12">
        <h1 class="text-3xl font-bold">Recommendations for</h1>
        <p class="text-2xl font-semibold">{{ movie }}</p>
      </header>
      {% if let Some(message) = loading %}
      <div class="loading text-center py-12"><div class="spinner animate-spin"></div><p>{{ message }}</p></div>
      {% endif %}
      {% if let Some(message) = error %}
      <div class="alert max-w-2xl mx-auto mb-8 rounded-lg p-4 text-center" role="alert">{{ message }}</div>
      {% endif %}
      {% if !cards.is_empty() %}
      <div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 xl:grid-cols-5 gap-6">
        {% for card in cards %}
        <article class="card overflow-hidden">
          <div class="aspect-[2/3]"><img src="{{ card.poster }}" alt="{{ card.title }}" onerror="this.onerror=null;this.src=this.dataset.fallback" data-fallback="{{ card.fallback }}"></div>
          <h3 class="p-4 font-semibold text-sm">{{ card.title }}</h3>
        </article>
        {% endfor %}
      </div>
      {% endif %}
      {% if let Some(message) = empty %}
      <div class="empty text-center py-12">
        <p class="text-xl">{{ message }}</p>
        <p>Try selecting a different movie</p>
        <a class="button mt-6" href="/">Choose Another Movie</a>
      </div>
      {% endif %}
      {% if let Some(prompt) = idle %}
      <div class="idle text-center py-12"><p>{{ prompt }}</p></div>
      {% endif %}
    </main>
  </body>
</html>"#,
    ext = "html"
)]
struct ResultsPage<'a> {
    app_name: &'a str,
    movie: &'a str,
    loading: Option<&'a str>,
    error: Option<&'a str>,
    cards: &'a [Card],
    empty: Option<&'a str>,
    idle: Option<&'a str>,
}

impl<'a> ResultsPage<'a> {
    fn new(movie: &'a str, panel: &'a Panel) -> Self {
        let mut page = Self {
            app_name: APP_NAME,
            movie,
            loading: None,
            error: None,
            cards: &[],
            empty: None,
            idle: None,
        };
        match panel {
            Panel::Loading { message } => page.loading = Some(message.as_str()),
            Panel::Error { message } => page.error = Some(message.as_str()),
            Panel::Populated { cards } => page.cards = cards.as_slice(),
            Panel::Empty { message } => page.empty = Some(message.as_str()),
            Panel::Idle { prompt } => page.idle = Some(prompt.as_str()),
        }
        page
    }
}

pub fn search_page(view: &PageView) -> AppResult<String> {
    let suggestions = view
        .search
        .suggestions
        .iter()
        .flat_map(|panel| panel.items.iter())
        .map(|item| SuggestionLink {
            label: item.clone(),
            href: format!(
                "/?q={}&pick={}",
                encode_component(&view.search.text),
                encode_component(item)
            ),
        })
        .collect();

    let recommend_href = view
        .selected
        .as_deref()
        .filter(|_| view.trigger_enabled)
        .map(|selected| format!("/recommendations?movie={}", encode_component(selected)));

    let page = SearchPage {
        app_name: APP_NAME,
        tagline: TAGLINE,
        search_control_id: SEARCH_CONTROL_ID,
        view,
        show_suggestions: view.search.suggestions.is_some(),
        suggestions,
        recommend_href,
    };
    Ok(page.render()?)
}

pub fn recommendations_page(movie: &str, view: &PageView) -> AppResult<String> {
    Ok(ResultsPage::new(movie, &view.panel).render()?)
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}
