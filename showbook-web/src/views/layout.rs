//! Page shell and HTML helpers

/// Escape text for HTML element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap page content in the site shell
///
/// `notice` is the one-shot flash message shown after a successful create.
pub fn page(title: &str, notice: Option<&str>, body: &str) -> String {
    let notice = notice
        .map(|message| format!(r#"<div class="notice">{}</div>"#, escape(message)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Showbook</title>
<link rel="stylesheet" href="/static/app.css">
</head>
<body>
<nav class="topnav">
  <a class="brand" href="/">Showbook</a>
  <a href="/venues">Venues</a>
  <a href="/artists">Artists</a>
  <a href="/shows">Shows</a>
  <span class="spacer"></span>
  <a href="/venues/create">Post a venue</a>
  <a href="/artists/create">Post an artist</a>
  <a href="/shows/create">Post a show</a>
</nav>
<main>
{notice}
{body}
</main>
<script src="/static/app.js"></script>
</body>
</html>
"#,
        title = escape(title),
        notice = notice,
        body = body,
    )
}

/// Image tag, or nothing when no link is stored
pub fn image(link: Option<&str>, alt: &str) -> String {
    match link {
        Some(link) if !link.is_empty() => format!(
            r#"<img src="{}" alt="{}">"#,
            escape(link),
            escape(alt)
        ),
        _ => String::new(),
    }
}
