//! Shared reports for the formatter tests.

use crate::document::{Content, parse_document};
use crate::facts::Fact;
use crate::linter::{Linter, Report};

use super::DocumentReport;

const CLEAN_BODY: &str = "Googlebot follows five redirect hops in a single chain before the crawl \
stops. Each hop costs one extra request against the crawl budget of the site. A permanent redirect \
passes link equity to the target URL. Site owners keep chains short by pointing every legacy URL \
straight at the final destination. Server logs show each hop with the status code.";

fn report(content: &Content, key_facts: Vec<Fact>) -> Report {
    let linter = Linter::default();
    let document = parse_document(content).with_facts(key_facts.clone());
    let issues = linter.lint(&document, &key_facts);
    let score = linter.score(&document, &issues, &key_facts, 5);
    Report {
        document,
        key_facts,
        issues,
        score,
    }
}

/// Scores 100 with no issues.
pub fn clean_report() -> DocumentReport {
    let fact = Fact::new("fact-0", "Googlebot", "follows", "five redirect hops")
        .with_evidence("Googlebot follows five redirect hops in a single chain");
    let content = Content::new("Googlebot Redirect Handling")
        .with_section("Permanent Redirect Rules for Googlebot", CLEAN_BODY);
    DocumentReport::new("clean.json", report(&content, vec![fact]))
}

/// Pronoun openers, generic headers and no key facts: blocking errors plus warnings.
pub fn failing_report() -> DocumentReport {
    let content = Content::new("Redirects")
        .with_answer_box("It is important for SEO. This helps rankings.")
        .with_section("Overview", "It helps websites rank better.\n\nThis is powerful.");
    DocumentReport::new("docs/failing.json", report(&content, Vec::new()))
}
