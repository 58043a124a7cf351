//! Page chrome: the HTML shell around rendered content.
//!
//! The shell carries the sidebar (profile picture, display name, social
//! links, navigation tree, source link), the content container, and a
//! small script that swaps fragments in place for sidebar clicks.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use quill_site::FrontMatter;

use crate::state::AppState;

/// Inline script: sidebar links load fragments with the AJAX marker
/// header instead of full page loads, falling back to navigation on any
/// failure.
const NAV_SCRIPT: &str = r"
document.addEventListener('click', function (event) {
  var link = event.target.closest('.folder-tree a');
  if (!link || link.classList.contains('home-link')) return;
  event.preventDefault();
  var href = link.getAttribute('href');
  fetch(href, { headers: { 'X-Requested-With': 'XMLHttpRequest' } })
    .then(function (res) {
      if (!res.ok) throw new Error(res.status);
      return res.text();
    })
    .then(function (html) {
      document.getElementById('content').innerHTML = html;
      history.pushState(null, '', href);
    })
    .catch(function () { window.location = href; });
});
window.addEventListener('popstate', function () { window.location.reload(); });
";

/// Render the full page shell around a content fragment.
pub(crate) fn page(state: &AppState, tree_html: &str, content_html: &str) -> Markup {
    let config = &state.config;
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (config.site_name) }
                link rel="stylesheet" href="/assets/style.css";
                link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";
                link rel="alternate" type="application/rss+xml" title=(config.site_name) href="/rss.xml";
            }
            body {
                aside class="sidebar" {
                    @if config.profile_image.is_some() {
                        img class="profile-pic" src="/profile-pic" alt=(config.site_name);
                    }
                    h1 class="site-name" { (config.site_name) }
                    @if !config.social_links.is_empty() {
                        ul class="social-links" {
                            @for link in &config.social_links {
                                li {
                                    a href=(link.url) rel="me" {
                                        i class={ "fab " (link.icon) } {}
                                    }
                                }
                            }
                        }
                    }
                    nav class="folder-tree" { (PreEscaped(tree_html)) }
                    @if let Some(repo) = &config.source_repo {
                        p class="source-link" { a href=(repo) { "Source" } }
                    }
                }
                main id="content" { (PreEscaped(content_html)) }
                script { (PreEscaped(NAV_SCRIPT)) }
            }
        }
    }
}

/// The metadata block shown above a document: one span per recognized
/// display field, a non-breaking space standing in for missing values.
pub(crate) fn metadata_block(matter: &FrontMatter) -> Markup {
    let fields = [
        ("title", matter.title.as_deref()),
        ("author", matter.author.as_deref()),
        ("date", matter.date.as_deref()),
    ];
    html! {
        div class="metadata" {
            @for (name, value) in fields {
                span class={ "meta-" (name) " " (name) } {
                    @if let Some(value) = value { (value) } @else { (PreEscaped("&nbsp;")) }
                }
            }
        }
    }
}
