//! HTML rendering for the index page

use recipebox_core::Recipe;
use std::fmt::Write;

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Render the recipe list and the create/update form
pub fn index_page(recipes: &[Recipe]) -> String {
    let mut body = String::new();

    if recipes.is_empty() {
        body.push_str("    <p class=\"empty\">No recipes yet.</p>\n");
    } else {
        body.push_str("    <ul class=\"recipes\">\n");
        for recipe in recipes {
            let _ = writeln!(
                body,
                "      <li data-id=\"{id}\"><span class=\"id\">#{id}</span> <strong>{name}</strong>",
                id = recipe.id,
                name = escape_html(&recipe.name),
            );
            body.push_str("        <ol>\n");
            for item in &recipe.ingredients {
                let _ = writeln!(body, "          <li>{}</li>", escape_html(item));
            }
            body.push_str("        </ol>\n      </li>\n");
        }
        body.push_str("    </ul>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Recipes</title>
    <link rel="stylesheet" href="/static/style.css">
  </head>
  <body>
    <h1>Recipes</h1>
{body}    <form method="post" action="/recipes">
      <label>Id (leave blank to create) <input name="id" inputmode="numeric"></label>
      <label>Name <input name="name"></label>
      <label>Ingredients, separated by | <input name="ingredients"></label>
      <button type="submit">Save</button>
    </form>
  </body>
</html>
"#
    )
}
