// Keyword-based URL classification
use crate::models::Category;
use std::collections::BTreeMap;

/// Built-in rules, tested top to bottom. Order matters: a URL that hits
/// keywords from two categories lands in whichever comes first here.
const DEFAULT_RULES: &[(Category, &[&str])] = &[
    (Category::News, &["news", "times", "post", "journal"]),
    (Category::Sports, &["sports", "nba", "fifa", "olympic"]),
    (Category::Education, &["edu", "course", "academy", "learning"]),
    (Category::Technology, &["tech", "gadget", "software", "ai"]),
    (Category::Shopping, &["shop", "store", "buy", "deal"]),
    (
        Category::SocialMedia,
        &["facebook", "twitter", "instagram", "linkedin"],
    ),
];

/// Classify with the built-in rules only
pub fn classify(url: &str) -> Category {
    Classifier::default().classify(url)
}

#[derive(Debug, Clone)]
struct Rule {
    category: Category,
    keywords: Vec<String>,
}

/// Priority-ordered keyword matcher.
///
/// Pure and total: any string maps to some category, falling through to
/// [`Category::Other`] when nothing matches.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(category, keywords)| Rule {
                category: *category,
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        Self { rules }
    }
}

impl Classifier {
    /// Built-in rules plus user-supplied keywords.
    ///
    /// Keywords for a category that already has a rule are appended to it,
    /// so priority doesn't move. Categories without a built-in rule get a
    /// fresh one tested after all built-ins, in tab order.
    pub fn with_extra_keywords(extra: &BTreeMap<Category, Vec<String>>) -> Self {
        let mut classifier = Self::default();

        for category in Category::ALL {
            let Some(keywords) = extra.get(&category) else {
                continue;
            };
            let keywords: Vec<String> = keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if keywords.is_empty() {
                continue;
            }

            match classifier.rules.iter_mut().find(|r| r.category == category) {
                Some(rule) => rule.keywords.extend(keywords),
                None => classifier.rules.push(Rule { category, keywords }),
            }
        }

        classifier
    }

    pub fn classify(&self, url: &str) -> Category {
        let url = url.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| url.contains(k.as_str())))
            .map(|rule| rule.category)
            .unwrap_or(Category::Other)
    }

    /// Categories in the order they're tested
    pub fn priority(&self) -> Vec<Category> {
        self.rules.iter().map(|r| r.category).collect()
    }
}
