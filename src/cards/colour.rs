use std::{fmt, str::FromStr};

use log::warn;

/// One of the five colours, parsed from Scryfall's single-letter codes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Colour {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Colour {
    pub fn label(&self) -> &'static str {
        match self {
            Colour::White => "white",
            Colour::Blue => "blue",
            Colour::Black => "black",
            Colour::Red => "red",
            Colour::Green => "green",
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Colour::White => write!(f, "White"),
            Colour::Blue => write!(f, "Blue"),
            Colour::Black => write!(f, "Black"),
            Colour::Red => write!(f, "Red"),
            Colour::Green => write!(f, "Green"),
        }
    }
}

impl FromStr for Colour {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "W" => Ok(Colour::White),
            "U" => Ok(Colour::Blue),
            "B" => Ok(Colour::Black),
            "R" => Ok(Colour::Red),
            "G" => Ok(Colour::Green),
            _ => Err(()),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Guild {
    Azorius,
    Dimir,
    Rakdos,
    Gruul,
    Selesnya,
    Orzhov,
    Izzet,
    Golgari,
    Boros,
    Simic,
}

impl Guild {
    /// Guild for an unordered pair of distinct colours.
    pub fn from_pair(a: Colour, b: Colour) -> Option<Self> {
        let pair = if a <= b { (a, b) } else { (b, a) };
        match pair {
            (Colour::White, Colour::Blue) => Some(Guild::Azorius),
            (Colour::Blue, Colour::Black) => Some(Guild::Dimir),
            (Colour::Black, Colour::Red) => Some(Guild::Rakdos),
            (Colour::Red, Colour::Green) => Some(Guild::Gruul),
            (Colour::White, Colour::Green) => Some(Guild::Selesnya),
            (Colour::White, Colour::Black) => Some(Guild::Orzhov),
            (Colour::Blue, Colour::Red) => Some(Guild::Izzet),
            (Colour::Black, Colour::Green) => Some(Guild::Golgari),
            (Colour::White, Colour::Red) => Some(Guild::Boros),
            (Colour::Blue, Colour::Green) => Some(Guild::Simic),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Guild::Azorius => "azorius",
            Guild::Dimir => "dimir",
            Guild::Rakdos => "rakdos",
            Guild::Gruul => "gruul",
            Guild::Selesnya => "selesnya",
            Guild::Orzhov => "orzhov",
            Guild::Izzet => "izzet",
            Guild::Golgari => "golgari",
            Guild::Boros => "boros",
            Guild::Simic => "simic",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ColourLabel {
    Colorless,
    Mono(Colour),
    /// A single code that is not one of the five colours, kept lowercased.
    OtherMono(String),
    Guild(Guild),
    Multicolored,
    /// Two codes that do not form a guild.
    Unclassified,
}

impl ColourLabel {
    pub fn as_str(&self) -> &str {
        match self {
            ColourLabel::Colorless => "colorless",
            ColourLabel::Mono(colour) => colour.label(),
            ColourLabel::OtherMono(code) => code.as_str(),
            ColourLabel::Guild(guild) => guild.label(),
            ColourLabel::Multicolored => "multicolored",
            ColourLabel::Unclassified => "",
        }
    }
}

impl fmt::Display for ColourLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn classify_colours<S: AsRef<str>>(colours: &[S]) -> ColourLabel {
    match colours {
        [] => ColourLabel::Colorless,
        [single] => match single.as_ref().parse::<Colour>() {
            Ok(colour) => ColourLabel::Mono(colour),
            Err(_) => ColourLabel::OtherMono(single.as_ref().to_lowercase()),
        },
        [first, second] => {
            let guild = match (first.as_ref().parse(), second.as_ref().parse()) {
                (Ok(a), Ok(b)) => Guild::from_pair(a, b),
                _ => None,
            };
            match guild {
                Some(guild) => ColourLabel::Guild(guild),
                None => {
                    warn!(
                        "No guild for colour pair {} and {}",
                        first.as_ref(),
                        second.as_ref()
                    );
                    ColourLabel::Unclassified
                }
            }
        }
        _ => ColourLabel::Multicolored,
    }
}
