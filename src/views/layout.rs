//! Shared page chrome: document head, site header and footer.

use chrono::{Datelike, Utc};

pub const SITE_NAME: &str = "QuickAV";

/// Wrap `body` in a full HTML document.
pub fn document(title: &str, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "{head}\n",
            "<body class=\"bg-gray-50 min-h-screen flex flex-col\">\n",
            "{header}\n",
            "{body}\n",
            "{footer}\n",
            "</body>\n",
            "</html>\n"
        ),
        head = head(title),
        header = header(),
        body = body,
        footer = footer(Utc::now().year()),
    )
}

fn head(title: &str) -> String {
    format!(
        r#"<head>
  <meta charset="utf-8">
  <title>{site} - {title}</title>
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <script src="https://cdn.tailwindcss.com"></script>
  <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600&display=swap" rel="stylesheet">
  <style>
    body {{ font-family: 'Inter', sans-serif; }}
    .gradient-text {{ background-clip: text; -webkit-background-clip: text; color: transparent; }}
  </style>
</head>"#,
        site = SITE_NAME,
        title = html_escape(title),
    )
}

fn header() -> String {
    format!(
        r#"<header class="bg-white shadow-sm">
  <div class="container mx-auto px-4 py-3 sm:py-4 flex justify-center items-center">
    <a href="/" class="flex items-center">
      <span class="text-lg sm:text-xl font-bold bg-gradient-to-r from-blue-600 to-purple-600 gradient-text">{site}</span>
    </a>
  </div>
</header>"#,
        site = SITE_NAME,
    )
}

fn footer(year: i32) -> String {
    format!(
        r#"<footer class="bg-gray-800 text-white py-6 sm:py-8">
  <div class="container mx-auto px-4">
    <div class="flex flex-col md:flex-row justify-between items-center">
      <div class="mb-4 md:mb-0">
        <span class="text-lg sm:text-xl font-bold bg-gradient-to-r from-blue-400 to-purple-400 gradient-text">{site}</span>
        <p class="text-gray-400 mt-1 sm:mt-2 text-xs sm:text-sm">Fast and secure file sharing</p>
      </div>
    </div>
    <div class="border-t border-gray-700 mt-4 sm:mt-6 pt-4 sm:pt-6 text-center text-gray-400 text-xs sm:text-sm">
      <p>&copy; {year} {site}. All rights reserved.</p>
    </div>
  </div>
</footer>"#,
        site = SITE_NAME,
        year = year,
    )
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
