use chrono::{DateTime, Local};

pub fn date_time_as_string(dt: Option<DateTime<Local>>, format: Option<&str>) -> String {
    dt.unwrap_or(Local::now())
        .format(format.unwrap_or("%d_%m_%Y-%H-%M"))
        .to_string()
}

/// Replaces every newline with a paragraph break, the way printed rules text spaces abilities.
pub fn newlines_to_breaks(input: &str) -> String {
    input
        .replace("\r\n", "\n")
        .split('\n')
        .collect::<Vec<&str>>()
        .join("<br /><br />")
}
