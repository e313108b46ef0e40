use serde::{Deserialize, Serialize};

pub mod reporter;

pub use reporter::Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

pub fn add_file_extension(path: &str, format: &OutputFormat) -> String {
    let extension = match format {
        OutputFormat::Text => ".txt",
        OutputFormat::Json => ".json",
    };

    if path.ends_with(extension) {
        path.to_string()
    } else {
        format!("{}{}", path, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_leniently() {
        assert_eq!(OutputFormat::from("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::from("anything else"), OutputFormat::Text);
    }

    #[test]
    fn extension_is_added_once() {
        assert_eq!(
            add_file_extension("board", &OutputFormat::Json),
            "board.json"
        );
        assert_eq!(
            add_file_extension("board.json", &OutputFormat::Json),
            "board.json"
        );
        assert_eq!(add_file_extension("board", &OutputFormat::Text), "board.txt");
    }
}
