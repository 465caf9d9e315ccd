//! HTML pages for the form and the result view.

use crate::domain::model::{DishImage, DishReport};

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n\
         </head>\n\
         <body>\n{}</body>\n\
         </html>\n",
        escape_html(title),
        body
    )
}

fn dish_form() -> &'static str {
    "<form method=\"post\" action=\"/\">\n\
     <label for=\"food_name\">Chinese dish name</label>\n\
     <input type=\"text\" id=\"food_name\" name=\"food_name\" required>\n\
     <label for=\"zip_code\">Zip code (optional)</label>\n\
     <input type=\"text\" id=\"zip_code\" name=\"zip_code\">\n\
     <button type=\"submit\">Explore</button>\n\
     </form>\n"
}

/// 空白表單；`error` 有值時顯示驗證訊息
pub fn render_form(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Chinese Dish Explorer</h1>\n");
    if let Some(message) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(message)));
    }
    body.push_str(dish_form());
    page("Chinese Dish Explorer", &body)
}

pub fn render_result(report: &DishReport) -> String {
    let dish_name = escape_html(&report.dish_name);
    let mut body = format!("<h1>{}</h1>\n", dish_name);

    body.push_str("<section class=\"description\">\n<dl>\n");
    for entry in &report.description {
        body.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>\n",
            escape_html(&entry.title),
            escape_html(&entry.content)
        ));
    }
    body.push_str("</dl>\n</section>\n");

    match &report.image {
        DishImage::Generated { url } => {
            body.push_str(&format!(
                "<img class=\"dish-image\" src=\"{}\" alt=\"{}\">\n",
                escape_html(url),
                dish_name
            ));
        }
        DishImage::Unavailable => body.push_str("<p class=\"no-image\">No image available.</p>\n"),
    }

    if report.restaurants.is_requested() {
        body.push_str("<section class=\"restaurants\">\n<h2>Nearby Chinese Restaurants</h2>\n<ul>\n");
        for line in report.restaurants.display_lines() {
            body.push_str(&format!("<li>{}</li>\n", escape_html(&line)));
        }
        body.push_str("</ul>\n</section>\n");
    }

    body.push_str("<a href=\"/\">Search another dish</a>\n");
    page(&report.dish_name, &body)
}
