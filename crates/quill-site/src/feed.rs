//! Syndication items and RSS channel assembly.
//!
//! A flat, unfiltered walk over the content root: every eligible file
//! becomes one item, with its category derived from the ancestor
//! directory names. The walk visits entries in name order so output is
//! deterministic, but items are not sorted by date, deduplicated, or
//! capped - readers wanting chronology sort on their side.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, TimeZone, Utc};
use rss::{CategoryBuilder, Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder};

use crate::util::{display_title, encode_href_path, relative_url_path};
use crate::{IgnoreList, SiteError, front_matter, is_content_path};

/// A single syndication entry derived from one content file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedItem {
    /// Front-matter title, or the humanized file stem.
    pub title: String,
    /// Front-matter description, when present.
    pub description: Option<String>,
    /// Absolute URL of the content page.
    pub url: String,
    /// Resolved publish date (`YYYY-MM-DD`).
    pub date: String,
    /// Ancestor directory names joined with `/`; empty for root files.
    pub category: String,
}

/// Collect every eligible file under `root` as a feed item.
///
/// Eligibility matches the navigation tree (no dotfiles, no ignore-listed
/// stems, recognized extensions only) but nothing is pruned - only files
/// matter here.
///
/// # Errors
///
/// Returns [`SiteError`] if a directory listing, file read, or stat call
/// fails.
pub fn collect_items(
    root: &Path,
    ignore: &IgnoreList,
    base_url: &str,
) -> Result<Vec<FeedItem>, SiteError> {
    let mut items = Vec::new();
    walk(root, root, ignore, base_url, &mut items)?;
    Ok(items)
}

fn walk(
    dir: &Path,
    root: &Path,
    ignore: &IgnoreList,
    base_url: &str,
    items: &mut Vec<FeedItem>,
) -> Result<(), SiteError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| SiteError::io(e, dir))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SiteError::io(e, dir))?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if ignore.contains(&stem) {
            continue;
        }

        if entry
            .file_type()
            .map_err(|e| SiteError::io(e, &path))?
            .is_dir()
        {
            walk(&path, root, ignore, base_url, items)?;
        } else if is_content_path(&path) {
            items.push(build_item(&path, root, &stem, base_url)?);
        }
    }
    Ok(())
}

fn build_item(path: &Path, root: &Path, stem: &str, base_url: &str) -> Result<FeedItem, SiteError> {
    let text = fs::read_to_string(path).map_err(|e| SiteError::io(e, path))?;
    let (matter, _) = front_matter::split(&text);
    let date = front_matter::resolve_date(matter.date.as_deref(), path)?;

    let rel = relative_url_path(root, path);
    let category = rel
        .rsplit_once('/')
        .map_or_else(String::new, |(dirs, _)| dirs.to_owned());

    Ok(FeedItem {
        title: matter.title.unwrap_or_else(|| display_title(stem)),
        description: matter.description,
        url: format!("{base_url}/content/{}", encode_href_path(&rel)),
        date,
        category,
    })
}

/// Assemble the RSS 2.0 channel for a list of feed items.
#[must_use]
pub fn build_channel(site_name: &str, base_url: &str, items: &[FeedItem]) -> Channel {
    let items: Vec<Item> = items.iter().map(channel_item).collect();

    ChannelBuilder::default()
        .title(site_name)
        .link(base_url)
        .description(format!("Latest posts from {site_name}"))
        .items(items)
        .build()
}

fn channel_item(item: &FeedItem) -> Item {
    let mut builder = ItemBuilder::default();
    builder
        .title(item.title.clone())
        .link(item.url.clone())
        .description(item.description.clone())
        .guid(
            GuidBuilder::default()
                .value(item.url.clone())
                .permalink(true)
                .build(),
        )
        .pub_date(rfc2822_date(&item.date));

    if !item.category.is_empty() {
        builder.categories(vec![
            CategoryBuilder::default().name(item.category.clone()).build(),
        ]);
    }
    builder.build()
}

/// Convert a `YYYY-MM-DD` date to RFC 2822 at UTC midnight. Unparseable
/// dates yield no `pubDate` rather than an invalid one.
fn rfc2822_date(date: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).to_rfc2822())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_file(path: &Path, content: &str) {
        fs::write(path, content).unwrap();
    }

    const BASE: &str = "http://blog.example";

    #[test]
    fn test_collect_items_covers_every_eligible_file() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("a.md"), "---\ndate: 2024-01-01\n---\nx");
        fs::create_dir_all(dir.path().join("notes/deep")).unwrap();
        write_file(&dir.path().join("notes/deep/c.txt"), "---\ndate: 2024-02-01\n---\ny");
        write_file(&dir.path().join("notes/skip.png"), "bytes");

        let items = collect_items(dir.path(), &IgnoreList::default(), BASE).unwrap();

        let urls: Vec<&str> = items.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://blog.example/content/a.md",
                "http://blog.example/content/notes/deep/c.txt",
            ]
        );
    }

    #[test]
    fn test_collect_items_category_from_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("root.md"), "x");
        fs::create_dir_all(dir.path().join("notes/deep")).unwrap();
        write_file(&dir.path().join("notes/deep/c.txt"), "y");

        let items = collect_items(dir.path(), &IgnoreList::default(), BASE).unwrap();

        // name-ordered walk visits notes/ before root.md
        assert_eq!(items[0].category, "notes/deep");
        assert_eq!(items[1].category, "");
    }

    #[test]
    fn test_collect_items_title_precedence() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            &dir.path().join("custom.md"),
            "---\ntitle: Explicit Title\n---\nx",
        );
        write_file(&dir.path().join("my-fallback-post.md"), "x");

        let items = collect_items(dir.path(), &IgnoreList::default(), BASE).unwrap();

        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Explicit Title", "My Fallback Post"]);
    }

    #[test]
    fn test_collect_items_walks_unpruned() {
        // An empty directory is harmless to the feed - only files matter.
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        write_file(&dir.path().join("post.md"), "x");

        let items = collect_items(dir.path(), &IgnoreList::default(), BASE).unwrap();

        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_build_channel_is_rss_2_0() {
        let items = vec![FeedItem {
            title: "Post".to_owned(),
            description: Some("About things".to_owned()),
            url: "http://blog.example/content/post.md".to_owned(),
            date: "2024-03-01".to_owned(),
            category: "notes".to_owned(),
        }];

        let channel = build_channel("My Blog", BASE, &items);
        let xml = channel.to_string();

        assert!(xml.contains(r#"<rss version="2.0""#));
        eprintln!("XML: {xml}");
        assert!(xml.contains("<title>My Blog</title>"));
        assert!(xml.contains("<title>Post</title>"));
        assert!(xml.contains("<category>notes</category>"));
        assert!(xml.contains("<description>About things</description>"));
        assert!(xml.contains("Fri, 1 Mar 2024 00:00:00 +0000"));
    }

    #[test]
    fn test_build_channel_omits_empty_category() {
        let items = vec![FeedItem {
            title: "Root Post".to_owned(),
            description: None,
            url: "http://blog.example/content/root.md".to_owned(),
            date: "2024-03-01".to_owned(),
            category: String::new(),
        }];

        let channel = build_channel("My Blog", BASE, &items);

        assert!(channel.items()[0].categories().is_empty());
    }

    #[test]
    fn test_rfc2822_date() {
        assert_eq!(
            rfc2822_date("2024-03-01").unwrap(),
            "Fri, 1 Mar 2024 00:00:00 +0000"
        );
        assert!(rfc2822_date("not-a-date").is_none());
    }
}
