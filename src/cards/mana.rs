const PHYREXIAN_MARKER: &str = "P";

/// A `{...}` group from a mana cost or rules text.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ManaSymbol {
    /// `{W}`, `{2}`, `{Q}`
    Plain(String),
    /// `{W/P}` or `{P/W}`
    Phyrexian(String),
    /// `{2/U}`, `{W/B}`
    Hybrid(String, String),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ManaSegment<'a> {
    Text(&'a str),
    Symbol(ManaSymbol),
}

impl ManaSymbol {
    /// Parses the text between the braces. Returns `None` if it does not match
    /// `SYMBOL ( / SYMBOL )?` with alphanumeric symbols.
    pub fn parse(inner: &str) -> Option<Self> {
        let (first, second) = match inner.split_once('/') {
            Some((first, second)) => (first, Some(second)),
            None => (inner, None),
        };

        if !is_symbol(first) {
            return None;
        }

        match second {
            None => Some(ManaSymbol::Plain(first.to_string())),
            Some(second) if !is_symbol(second) => None,
            Some(PHYREXIAN_MARKER) => Some(ManaSymbol::Phyrexian(first.to_string())),
            Some(second) if first == PHYREXIAN_MARKER => {
                Some(ManaSymbol::Phyrexian(second.to_string()))
            }
            Some(second) => Some(ManaSymbol::Hybrid(first.to_string(), second.to_string())),
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            ManaSymbol::Plain(symbol) => {
                format!("<i class='mi mi-{} mi-mana'></i>", symbol_class(symbol))
            }
            ManaSymbol::Phyrexian(symbol) => {
                format!("<i class='mi mi-p mi-mana-{}'></i>", symbol_class(symbol))
            }
            ManaSymbol::Hybrid(first, second) => format!(
                "<div class='mi-split'>{}{}</div>",
                split_half_html(first),
                split_half_html(second)
            ),
        }
    }
}

fn is_symbol(symbol: &str) -> bool {
    !symbol.is_empty() && symbol.chars().all(|c| c.is_ascii_alphanumeric())
}

fn symbol_class(symbol: &str) -> String {
    let symbol = symbol.to_lowercase();
    if symbol == "q" {
        "untap".to_string()
    } else {
        symbol
    }
}

fn split_half_html(symbol: &str) -> String {
    format!("<i class='mi mi-{}'></i>", symbol_class(symbol))
}

/// Splits text into literal runs and mana symbols. Brace groups that are not
/// valid symbols stay part of the surrounding text.
pub fn tokenize(input: &str) -> Vec<ManaSegment<'_>> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(open_offset) = input[cursor..].find('{') {
        let open = cursor + open_offset;
        let after_open = open + 1;

        let close = input[after_open..]
            .find(&['{', '}'][..])
            .map(|i| after_open + i)
            .filter(|&i| input[i..].starts_with('}'));

        let Some(close) = close else {
            cursor = after_open;
            continue;
        };

        if let Some(symbol) = ManaSymbol::parse(&input[after_open..close]) {
            if text_start < open {
                segments.push(ManaSegment::Text(&input[text_start..open]));
            }
            segments.push(ManaSegment::Symbol(symbol));
            text_start = close + 1;
        }
        cursor = close + 1;
    }

    if text_start < input.len() {
        segments.push(ManaSegment::Text(&input[text_start..]));
    }

    segments
}

/// Rewrites every mana symbol in `input` as icon markup.
pub fn convert_mana_symbols_to_html(input: &str) -> String {
    tokenize(input)
        .into_iter()
        .map(|segment| match segment {
            ManaSegment::Text(text) => text.to_string(),
            ManaSegment::Symbol(symbol) => symbol.to_html(),
        })
        .collect()
}
