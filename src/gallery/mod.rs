//! Server-rendered gallery page.
//!
//! The page shows the listing as thumbnail cards, newest first, and embeds
//! the same listing as `PHOTOS` for the inline lightbox script.

pub mod lightbox;
mod template;

use serde::Serialize;
use std::fmt::Write;

use crate::store::PhotoEntry;
use crate::utils::{escape_html, human_size};

pub use lightbox::{Lightbox, Viewer};

/// Entry of the embedded `PHOTOS` array.
#[derive(Debug, Serialize)]
struct GalleryItem<'a> {
    filename: &'a str,
    url: &'a str,
    date: String,
    size: u64,
    prev: usize,
    next: usize,
}

/// Render the full gallery document.
#[must_use]
pub fn render_page(title: &str, photos: &[PhotoEntry]) -> String {
    let title = escape_html(title);
    let count = match photos.len() {
        1 => "1 photo".to_string(),
        n => format!("{n} photos"),
    };

    let mut body = String::new();
    if photos.is_empty() {
        body.push_str(
            "<section class=\"empty\"><h2>No photos yet</h2>\
             <p>Photos from the booth will appear here.</p></section>",
        );
    } else {
        body.push_str("<main class=\"grid\">");
        for (index, photo) in photos.iter().enumerate() {
            let _ = write!(
                body,
                "<figure class=\"card\" data-index=\"{index}\">\
                 <img src=\"{url}\" alt=\"{name}\" loading=\"lazy\">\
                 <figcaption class=\"meta\"><span>{date}</span><span>{size}</span></figcaption>\
                 </figure>",
                url = escape_html(&photo.url),
                name = escape_html(&photo.filename),
                date = display_date(photo),
                size = human_size(photo.size),
            );
        }
        body.push_str("</main>");
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n\
         <header><h1>{title}</h1><span class=\"count\">{count}</span></header>\n\
         {body}\n{lightbox}\n\
         <script>const PHOTOS = {data};</script>\n<script>{script}</script>\n\
         </body>\n</html>\n",
        style = template::STYLE,
        lightbox = template::LIGHTBOX,
        data = embedded_data(photos),
        script = template::SCRIPT,
    )
}

fn display_date(photo: &PhotoEntry) -> String {
    photo.modified.format("%Y-%m-%d %H:%M").to_string()
}

/// JSON for `PHOTOS`, safe to place inside a `<script>` element.
fn embedded_data(photos: &[PhotoEntry]) -> String {
    let len = photos.len();
    let items: Vec<GalleryItem<'_>> = photos
        .iter()
        .enumerate()
        .map(|(i, photo)| GalleryItem {
            filename: &photo.filename,
            url: &photo.url,
            date: display_date(photo),
            size: photo.size,
            prev: lightbox::prev_index(i, len),
            next: lightbox::next_index(i, len),
        })
        .collect();

    serde_json::to_string(&items)
        .unwrap_or_else(|_| "[]".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
