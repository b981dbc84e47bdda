use axum::response::Html;

use super::escape_html;
use crate::models::{MovieResult, SearchOutcome};

const IMDB_TITLE_URL: &str = "https://www.imdb.com/title/";

/// Renders the search page: form, then results, message, or nothing.
pub fn render_search_page(outcome: &SearchOutcome) -> Html<String> {
    let query = escape_html(&outcome.query);

    let body = if outcome.has_results() {
        let cards: String = outcome.results.iter().map(result_card).collect();
        format!(
            r#"<p class="summary">{} result(s) for &ldquo;{}&rdquo;</p>
        <ul class="results">{}</ul>"#,
            outcome.results.len(),
            query,
            cards
        )
    } else if let Some(message) = &outcome.message {
        format!(r#"<p class="message">{}</p>"#, escape_html(message))
    } else {
        String::new()
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Movie Search</title>
</head>
<body>
    <main>
        <h1>Movie Search</h1>
        <form method="get" action="/movies">
            <input type="search" name="searchTerm" value="{}" placeholder="Search for a title" autofocus>
            <button type="submit">Search</button>
        </form>
        {}
    </main>
</body>
</html>"#,
        query, body
    ))
}

fn result_card(result: &MovieResult) -> String {
    let poster = if result.poster_url.starts_with("http") {
        format!(
            r#"<img src="{}" alt="Poster for {}" loading="lazy">"#,
            escape_html(&result.poster_url),
            escape_html(&result.title)
        )
    } else {
        String::new()
    };

    format!(
        r#"
            <li class="movie">
                {}
                <h2><a href="{}{}">{}</a> <span class="year">({})</span></h2>
                <p class="genre">{}</p>
                <p class="lead-actor">Starring {}</p>
                <p class="plot">{}</p>
            </li>"#,
        poster,
        IMDB_TITLE_URL,
        escape_html(&result.imdb_id),
        escape_html(&result.title),
        escape_html(&result.year),
        escape_html(&result.genre),
        escape_html(&result.lead_actor),
        escape_html(&result.plot),
    )
}
