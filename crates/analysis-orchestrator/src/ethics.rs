use analysis_core::EthicsGate;

pub const DEFAULT_ETHICS_KEYWORDS: &[&str] = &[
    "tobacco",
    "weapons",
    "gambling",
    "casino",
    "philip morris",
    "altria",
    "firearms",
    "defense contractor",
    "raytheon",
    "lockheed",
    "northrop",
];

/// Excludes any company whose name or description mentions a listed keyword
#[derive(Debug, Clone)]
pub struct KeywordEthicsGate {
    keywords: Vec<String>,
}

impl KeywordEthicsGate {
    /// Keywords are matched case-insensitively; blanks are dropped
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// First keyword found in the company text, if any
    pub fn violation(&self, company_name: &str, description: &str) -> Option<&str> {
        let text = format!("{} {}", company_name, description).to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| text.contains(keyword.as_str()))
            .map(String::as_str)
    }
}

impl Default for KeywordEthicsGate {
    fn default() -> Self {
        Self::new(DEFAULT_ETHICS_KEYWORDS)
    }
}

impl EthicsGate for KeywordEthicsGate {
    fn passes(&self, company_name: &str, description: &str) -> bool {
        match self.violation(company_name, description) {
            Some(keyword) => {
                tracing::debug!("{} matched exclusion keyword '{}'", company_name, keyword);
                false
            }
            None => true,
        }
    }
}
