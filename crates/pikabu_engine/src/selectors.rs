//! Named selector rules used by the extractor.

use std::fmt;

use scraper::Selector;

/// The fixed set of lookups the extractor performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorRule {
    /// One post summary on the listing page.
    StoryBlock,
    /// The link carrying a post's title text and page URL.
    TitleLink,
    /// Node holding the publish timestamp in its `datetime` attribute.
    DatetimeAttr,
    /// One topic tag attached to a post.
    TagChip,
    /// First anchor read on the page fetched during identity resolution.
    IdentityAnchor,
}

impl SelectorRule {
    pub const ALL: [SelectorRule; 5] = [
        SelectorRule::StoryBlock,
        SelectorRule::TitleLink,
        SelectorRule::DatetimeAttr,
        SelectorRule::TagChip,
        SelectorRule::IdentityAnchor,
    ];
}

impl fmt::Display for SelectorRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectorRule::StoryBlock => "story block",
            SelectorRule::TitleLink => "title link",
            SelectorRule::DatetimeAttr => "datetime",
            SelectorRule::TagChip => "tag chip",
            SelectorRule::IdentityAnchor => "identity anchor",
        };
        f.write_str(name)
    }
}

/// Selector strings, one per [`SelectorRule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSet {
    pub story_block: String,
    pub title_link: String,
    pub datetime_attr: String,
    pub tag_chip: String,
    pub identity_anchor: String,
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            story_block: ".story".to_string(),
            title_link: ".story__title-link".to_string(),
            datetime_attr: ".story__datetime[datetime]".to_string(),
            tag_chip: ".story__tags .tags__tag".to_string(),
            identity_anchor: "a".to_string(),
        }
    }
}

impl SelectorSet {
    pub fn pattern(&self, rule: SelectorRule) -> &str {
        match rule {
            SelectorRule::StoryBlock => &self.story_block,
            SelectorRule::TitleLink => &self.title_link,
            SelectorRule::DatetimeAttr => &self.datetime_attr,
            SelectorRule::TagChip => &self.tag_chip,
            SelectorRule::IdentityAnchor => &self.identity_anchor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {} selector {pattern:?}: {message}", OptionalRule(.rule))]
pub struct SelectorError {
    /// `None` for excluded-tag selectors.
    pub rule: Option<SelectorRule>,
    pub pattern: String,
    pub message: String,
}

/// Parsed form of a [`SelectorSet`] plus the excluded-tag selectors.
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub story_block: Selector,
    pub title_link: Selector,
    pub datetime_attr: Selector,
    pub tag_chip: Selector,
    pub identity_anchor: Selector,
    pub excluded: Vec<(String, Selector)>,
}

impl CompiledSelectors {
    pub fn compile(set: &SelectorSet, excluded_tags: &[String]) -> Result<Self, SelectorError> {
        let rule = |rule: SelectorRule| parse(Some(rule), set.pattern(rule));
        let excluded = excluded_tags
            .iter()
            .map(|pattern| parse(None, pattern).map(|sel| (pattern.clone(), sel)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            story_block: rule(SelectorRule::StoryBlock)?,
            title_link: rule(SelectorRule::TitleLink)?,
            datetime_attr: rule(SelectorRule::DatetimeAttr)?,
            tag_chip: rule(SelectorRule::TagChip)?,
            identity_anchor: rule(SelectorRule::IdentityAnchor)?,
            excluded,
        })
    }
}

fn parse(rule: Option<SelectorRule>, pattern: &str) -> Result<Selector, SelectorError> {
    Selector::parse(pattern).map_err(|err| SelectorError {
        rule,
        pattern: pattern.to_string(),
        message: err.to_string(),
    })
}

struct OptionalRule<'a>(&'a Option<SelectorRule>);

impl fmt::Display for OptionalRule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(rule) => write!(f, "{rule}"),
            None => f.write_str("excluded tag"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_compiles() {
        let compiled = CompiledSelectors::compile(&SelectorSet::default(), &[]).unwrap();
        assert!(compiled.excluded.is_empty());
        for rule in SelectorRule::ALL {
            assert!(!SelectorSet::default().pattern(rule).is_empty());
        }
    }

    #[test]
    fn bad_excluded_selector_is_reported() {
        let err = CompiledSelectors::compile(&SelectorSet::default(), &["[[".to_string()])
            .unwrap_err();
        assert_eq!(err.rule, None);
        assert_eq!(err.pattern, "[[");
    }

    #[test]
    fn bad_rule_selector_names_the_rule() {
        let set = SelectorSet {
            tag_chip: "div[".to_string(),
            ..SelectorSet::default()
        };
        let err = CompiledSelectors::compile(&set, &[]).unwrap_err();
        assert_eq!(err.rule, Some(SelectorRule::TagChip));
        assert!(err.to_string().contains("tag chip"));
    }
}
