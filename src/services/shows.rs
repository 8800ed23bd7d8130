/// A curated talk show and the title fragments that identify it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowDefinition {
    /// Canonical name, reported as the show `type`
    pub name: &'static str,
    /// Lowercase substrings; any one matching is enough
    pub patterns: &'static [&'static str],
    pub url: Option<&'static str>,
}

const fn show(
    name: &'static str,
    patterns: &'static [&'static str],
    url: Option<&'static str>,
) -> ShowDefinition {
    ShowDefinition { name, patterns, url }
}

/// Known shows in priority order. The first definition with a matching
/// pattern wins, so the broad "talk" entry shadows every later entry
/// whose title also contains "talk".
pub static TALKSHOWS: &[ShowDefinition] = &[
    show("hart aber fair", &["hart aber fair"], None),
    show("maischberger", &["maischberger"], None),
    show("markus lanz", &["markus lanz"], None),
    show("anne will", &["anne will"], None),
    show("unter den linden", &["unter den linden"], None),
    show("talk", &["talk"], None),
    show(
        "caren miosga",
        &["caren miosga"],
        Some("https://www.daserste.de/information/talk/caren-miosga/index.html"),
    ),
    show("talking business", &["talking business"], None),
    show("talkwerk", &["talkwerk"], None),
    show("meet your master", &["meet your master"], None),
    show("talk spezial", &["talk spezial"], None),
    show("bbc hard talk", &["bbc hard talk"], None),
    show("ndr talk show", &["ndr talk show"], None),
    show("sky talk", &["sky talk"], None),
    // OR semantics: either fragment alone matches
    show("erf jess - talkwerk", &["erf jess", "talkwerk"], None),
];

impl ShowDefinition {
    /// `lower_title` must already be lowercased
    pub fn matches(&self, lower_title: &str) -> bool {
        self.patterns.iter().any(|p| lower_title.contains(p))
    }
}

/// Find the first registry entry matching a raw title
pub fn find_matching_show(title: &str) -> Option<&'static ShowDefinition> {
    find_in(TALKSHOWS, title)
}

/// First-match scan over an arbitrary ordered registry
pub fn find_in<'a>(registry: &'a [ShowDefinition], title: &str) -> Option<&'a ShowDefinition> {
    let lower_title = title.to_lowercase();
    registry.iter().find(|show| show.matches(&lower_title))
}
