/// One normalized feed entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub author: String,
    pub text: String,
}

impl Topic {
    pub fn new(name: impl Into<String>, author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            text: text.into(),
        }
    }

    /// Build a topic from the raw fields a feed parser hands back.
    ///
    /// Full content wins over the description; an empty string counts as
    /// absent for both.
    pub fn from_entry(
        title: Option<String>,
        author: Option<String>,
        description: Option<String>,
        content: Option<String>,
    ) -> Self {
        let text = content
            .filter(|c| !c.is_empty())
            .or_else(|| description.filter(|d| !d.is_empty()))
            .unwrap_or_default();

        Self {
            name: title.unwrap_or_default(),
            author: author.unwrap_or_default(),
            text,
        }
    }
}
