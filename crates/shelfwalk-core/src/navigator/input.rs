#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Back,
    Open,
    Edit,
    Exit,
    Tags,
    Search,
}

impl Keyword {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "back" => Some(Self::Back),
            "open" => Some(Self::Open),
            "edit" => Some(Self::Edit),
            "exit" => Some(Self::Exit),
            "tags" => Some(Self::Tags),
            "search" => Some(Self::Search),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Open => "open",
            Self::Edit => "edit",
            Self::Exit => "exit",
            Self::Tags => "tags",
            Self::Search => "search",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Keyword(Keyword),
    /// 1-based, digits only.
    Index(usize),
    Text(String),
}

impl Input {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if let Some(keyword) = Keyword::parse(trimmed) {
            return Self::Keyword(keyword);
        }
        match parse_index(trimmed) {
            Some(index) => Self::Index(index),
            None => Self::Text(trimmed.to_string()),
        }
    }

    /// Text form used when a keyword or number is read as a name.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Keyword(keyword) => keyword.as_str().to_string(),
            Self::Index(index) => index.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

#[must_use]
pub fn parse_index(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // overflowing digit strings still count as numbers, just never in range
    Some(raw.parse::<usize>().unwrap_or(usize::MAX))
}

/// Maps a 1-based pick onto a list of `len` entries.
#[must_use]
pub const fn zero_based(index: usize, len: usize) -> Option<usize> {
    if index >= 1 && index <= len {
        Some(index - 1)
    } else {
        None
    }
}
