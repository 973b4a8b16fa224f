use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::cards::card_record::CardRecord;
use crate::cards::mana::convert_mana_symbols_to_html;
use crate::cards::taxonomy::CardType;
use crate::decklist::deck::Deck;
use crate::decklist::line_parser::DecklistLineRequest;
use crate::utilities::constants::PROXY_FILE_PREFIX;
use crate::utilities::string_manipulators::{date_time_as_string, newlines_to_breaks};

const NOT_FOUND_MESSAGE: &str = "Card not found";

/// Writes the proxy page for `deck` to `output_dir` and returns its path.
pub fn save_proxy_page(deck: &Deck, output_dir: &str, title: &str) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(output_dir)?;
    let file_name = format!(
        "{}{}.html",
        PROXY_FILE_PREFIX,
        date_time_as_string(None, None)
    );
    let path = Path::new(output_dir).join(file_name);
    fs::write(&path, generate_proxy_page(deck, title))?;
    info!("Saved {} proxies to {}", deck.len(), path.display());
    Ok(path)
}

pub fn generate_proxy_page(deck: &Deck, title: &str) -> String {
    let title = html_escape::encode_text(title);
    let mut content = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/mana-font@latest/css/mana.min.css">
    <style>
        {style}
    </style>
</head>
<body>
    <div class="print-section">
"#,
        title = title,
        style = include_str!("../static/proxy_page/style.css"),
    );

    for slot in deck.slots() {
        match slot.card() {
            Some(card) => content.push_str(&card_to_html(card)),
            None => content.push_str(&not_found_to_html(slot.request())),
        }
    }

    content.push_str(
        r#"    </div>
</body>
</html>
"#,
    );
    content
}

pub fn card_to_html(card: &CardRecord) -> String {
    let (footer, text_classes) = match footer_html(card) {
        Some(footer) => (footer, " has-footer"),
        None => (String::new(), ""),
    };

    format!(
        r#"        <div class='{card_classes}'>
            <div class='card-content'>
                <div class='card-header'>
                    <div class='card-name auto-resize'>{name}</div>
                    <div class='mana-cost'>{mana_cost}</div>
                </div>
                <div class='card-image'>{image}</div>
                <div class='card-type auto-resize'>{type_line}</div>
                <div class='card-text auto-resize{text_classes}'>{text}</div>
                {footer}
            </div>
        </div>
"#,
        card_classes = card_classes(card.colour_label().as_str()),
        name = convert_mana_symbols_to_html(&html_escape::encode_text(card.name())),
        mana_cost = convert_mana_symbols_to_html(&html_escape::encode_text(card.mana_cost())),
        image = image_icon_html(card.card_types()),
        type_line = convert_mana_symbols_to_html(&html_escape::encode_text(card.type_line())),
        text_classes = text_classes,
        text = convert_mana_symbols_to_html(&newlines_to_breaks(&html_escape::encode_text(
            card.oracle_text()
        ))),
        footer = footer,
    )
}

pub fn not_found_to_html(request: &DecklistLineRequest) -> String {
    format!(
        r#"        <div class='card not-found'>
            <div class='card-content'>
                <div class='card-header'>
                    <div class='card-name auto-resize'>{name}</div>
                </div>
                <div class='card-error'>{message}</div>
            </div>
        </div>
"#,
        name = html_escape::encode_text(&request.name),
        message = NOT_FOUND_MESSAGE,
    )
}

fn card_classes(colour_label: &str) -> String {
    if colour_label.is_empty() {
        "card".to_string()
    } else {
        format!(
            "card {}",
            html_escape::encode_single_quoted_attribute(colour_label)
        )
    }
}

/// Planeswalker loyalty wins over power and toughness.
fn footer_html(card: &CardRecord) -> Option<String> {
    let stats = if card.is_planeswalker() {
        card.loyalty().unwrap_or_default().to_string()
    } else if card.is_creature() {
        format!(
            "{} / {}",
            card.power().unwrap_or_default(),
            card.toughness().unwrap_or_default()
        )
    } else {
        return None;
    };
    Some(format!(
        "<div class='card-footer'><div class='power-block'>{}</div></div>",
        html_escape::encode_text(&stats)
    ))
}

fn image_icon_html(card_types: &[CardType]) -> String {
    match card_types {
        [single] => single_image_icon(single, None),
        [first, second] => format!(
            "{}{}",
            single_image_icon(first, Some("split")),
            single_image_icon(second, Some("split"))
        ),
        _ => String::new(),
    }
}

fn single_image_icon(card_type: &CardType, extra_class: Option<&str>) -> String {
    let classes = match extra_class {
        Some(extra) => format!("image-icon {}", extra),
        None => "image-icon".to_string(),
    };
    format!(
        "<div class='{}'><img src='svg/{}.svg' /></div>",
        classes,
        card_type.icon_name()
    )
}
