use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::shared::SharedContent;
use crate::options::ContentOptions;

/// A built-in presentational component that a custom tag can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Embedded YouTube player.
    YoutubeIframe,
    /// Term/definition list.
    DefinitionList,
    /// Note/warning/tip callout.
    Admonition,
    /// Code samples switched by tabs.
    CodeTabs,
    /// Grid of icon cards linking to pages.
    DetailIconCards,
    /// Language/framework navigation widget.
    TechnologyNavigation,
    /// Community (Discord) banner.
    CommunityBanner,
    /// Tab container.
    Tabs,
    /// Single tab panel.
    TabItem,
    /// Information callout.
    InfoBlock,
    /// List of doc links.
    DocsList,
    /// Region request form.
    RegionRequest,
    /// Call to action used on use-case pages.
    CtaBlock,
    /// Call to action used in docs.
    DocCta,
    /// Customer quote.
    Testimonial,
    /// Layout wrapper around testimonials.
    TestimonialsWrapper,
    /// Use-case bullet list.
    UseCaseList,
    /// Use-case context sidebar.
    UseCaseContext,
    /// Compute cost calculator.
    ComputeCalculator,
    /// Newsletter subscription form.
    SubscriptionForm,
}

impl ComponentKind {
    /// Every component kind.
    pub const ALL: [ComponentKind; 20] = [
        ComponentKind::YoutubeIframe,
        ComponentKind::DefinitionList,
        ComponentKind::Admonition,
        ComponentKind::CodeTabs,
        ComponentKind::DetailIconCards,
        ComponentKind::TechnologyNavigation,
        ComponentKind::CommunityBanner,
        ComponentKind::Tabs,
        ComponentKind::TabItem,
        ComponentKind::InfoBlock,
        ComponentKind::DocsList,
        ComponentKind::RegionRequest,
        ComponentKind::CtaBlock,
        ComponentKind::DocCta,
        ComponentKind::Testimonial,
        ComponentKind::TestimonialsWrapper,
        ComponentKind::UseCaseList,
        ComponentKind::UseCaseContext,
        ComponentKind::ComputeCalculator,
        ComponentKind::SubscriptionForm,
    ];

    /// Component name.
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::YoutubeIframe => "YoutubeIframe",
            ComponentKind::DefinitionList => "DefinitionList",
            ComponentKind::Admonition => "Admonition",
            ComponentKind::CodeTabs => "CodeTabs",
            ComponentKind::DetailIconCards => "DetailIconCards",
            ComponentKind::TechnologyNavigation => "TechnologyNavigation",
            ComponentKind::CommunityBanner => "CommunityBanner",
            ComponentKind::Tabs => "Tabs",
            ComponentKind::TabItem => "TabItem",
            ComponentKind::InfoBlock => "InfoBlock",
            ComponentKind::DocsList => "DocsList",
            ComponentKind::RegionRequest => "RegionRequest",
            ComponentKind::CtaBlock => "CtaBlock",
            ComponentKind::DocCta => "DocCta",
            ComponentKind::Testimonial => "Testimonial",
            ComponentKind::TestimonialsWrapper => "TestimonialsWrapper",
            ComponentKind::UseCaseList => "UseCaseList",
            ComponentKind::UseCaseContext => "UseCaseContext",
            ComponentKind::ComputeCalculator => "ComputeCalculator",
            ComponentKind::SubscriptionForm => "SubscriptionForm",
        }
    }

    /// Tag authors write for this component. Both CTA variants share `CTA`.
    pub fn tag(self) -> &'static str {
        match self {
            ComponentKind::CtaBlock | ComponentKind::DocCta => "CTA",
            other => other.name(),
        }
    }

    /// CSS class of the component's root element (kebab-cased name).
    pub fn class_name(self) -> String {
        kebab_case(self.name())
    }
}

/// Converts `camelCase` / `PascalCase` to `kebab-case`.
pub(crate) fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// What a registered tag renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagTarget {
    /// A built-in presentational component.
    Component(ComponentKind),
    /// Shared content loaded from the URL and inlined.
    Include(String),
}

/// Tag name to component mapping for a single render call.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    entries: BTreeMap<String, TagTarget>,
}

impl DispatchTable {
    /// Builds the table from the flags and the shared-content map.
    ///
    /// Shared entries are registered last and replace a built-in tag of the
    /// same name.
    pub fn build(options: &ContentOptions, shared: &SharedContent) -> Self {
        let mut entries = BTreeMap::new();
        for kind in ComponentKind::ALL {
            let selected = match kind {
                ComponentKind::CtaBlock => options.is_use_case,
                ComponentKind::DocCta => !options.is_use_case,
                _ => true,
            };
            if selected {
                entries.insert(kind.tag().to_string(), TagTarget::Component(kind));
            }
        }

        for (name, url) in shared.iter() {
            if let Some(TagTarget::Component(kind)) =
                entries.insert(name.to_string(), TagTarget::Include(url.to_string()))
            {
                log::warn!(
                    "Shared content '{}' replaces built-in component {}",
                    name,
                    kind.name()
                );
            }
        }

        Self { entries }
    }

    /// Looks up the target registered for a tag.
    pub fn resolve(&self, tag: &str) -> Option<&TagTarget> {
        self.entries.get(tag)
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no tags are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cta_follows_use_case_flag() {
        let shared = SharedContent::default();
        let docs = DispatchTable::build(&ContentOptions::default(), &shared);
        assert_eq!(
            docs.resolve("CTA"),
            Some(&TagTarget::Component(ComponentKind::DocCta))
        );

        let use_case = DispatchTable::build(
            &ContentOptions {
                is_use_case: true,
                ..Default::default()
            },
            &shared,
        );
        assert_eq!(
            use_case.resolve("CTA"),
            Some(&TagTarget::Component(ComponentKind::CtaBlock))
        );
    }

    #[test]
    fn test_base_registry_size() {
        let table = DispatchTable::build(&ContentOptions::default(), &SharedContent::default());
        assert_eq!(table.len(), 19);
        assert!(table.resolve("CtaBlock").is_none());
        assert!(table.resolve("DocCta").is_none());
        assert!(table.resolve("Admonition").is_some());
    }

    #[test]
    fn test_shared_entries_registered() {
        let shared = SharedContent::new()
            .with("NeedHelp", "shared-content/need-help")
            .with("Tabs", "shared-content/tabs");
        let table = DispatchTable::build(&ContentOptions::default(), &shared);
        assert_eq!(
            table.resolve("NeedHelp"),
            Some(&TagTarget::Include("shared-content/need-help".to_string()))
        );
        assert_eq!(
            table.resolve("Tabs"),
            Some(&TagTarget::Include("shared-content/tabs".to_string()))
        );
        assert_eq!(table.len(), 20);
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(ComponentKind::DetailIconCards.class_name(), "detail-icon-cards");
        assert_eq!(ComponentKind::Tabs.class_name(), "tabs");
        assert_eq!(kebab_case("embedId"), "embed-id");
    }
}
