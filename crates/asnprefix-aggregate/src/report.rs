use crate::merge::merge;
use asnprefix_core::{Asn, Prefix, SourceResult};
use serde::Serialize;
use std::fmt;

/// What one source returned for one ASN
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    /// Short source identifier
    pub source: &'static str,

    /// Human-readable source name
    #[serde(skip)]
    pub display_name: &'static str,

    /// Outcome of the query
    #[serde(flatten)]
    pub result: SourceResult,
}

/// Aggregated prefixes of one ASN together with the per-source trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AsnReport {
    /// The ASN that was resolved
    pub asn: Asn,

    /// Per-source outcomes, in source order
    pub sources: Vec<SourceReport>,

    /// Deduplicated union of all sources, sorted ascending
    pub prefixes: Vec<Prefix>,
}

impl AsnReport {
    /// Build a report, merging the prefixes of all source outcomes
    #[must_use]
    pub fn new(asn: Asn, sources: Vec<SourceReport>) -> Self {
        let prefixes = merge(sources.iter().map(|s| &s.result));
        Self {
            asn,
            sources,
            prefixes,
        }
    }

    /// Number of sources that could not be queried
    #[must_use]
    pub fn failed_sources(&self) -> usize {
        self.sources.iter().filter(|s| s.result.is_failure()).count()
    }
}

/// Renders the operator trail: one block per source followed by the
/// combined list.
impl fmt::Display for AsnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, report) in self.sources.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "Fetching from {} for {}...", report.display_name, self.asn)?;
            if let Some(cause) = report.result.cause() {
                writeln!(f, "{cause}")?;
            }
            let prefixes = report.result.prefixes();
            if prefixes.is_empty() {
                writeln!(f, "No results from {}.", report.display_name)?;
            } else {
                writeln!(f, "{} results:", report.display_name)?;
                for prefix in prefixes {
                    writeln!(f, "  {prefix}")?;
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "Combined unique IP ranges for {}:", self.asn)?;
        for prefix in &self.prefixes {
            writeln!(f, "  {prefix}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &'static str, result: SourceResult) -> SourceReport {
        SourceReport {
            source: name,
            display_name: name,
            result,
        }
    }

    fn sample() -> AsnReport {
        AsnReport::new(
            Asn::normalize("62419"),
            vec![
                source(
                    "A",
                    SourceResult::from_prefixes(vec![Prefix::new("203.0.113.0/24")]),
                ),
                source(
                    "B",
                    SourceResult::from_prefixes(vec![
                        Prefix::new("203.0.113.0/24"),
                        Prefix::new("198.51.100.0/24"),
                    ]),
                ),
                source("C", SourceResult::failed("Invalid ASN format: AS62419")),
            ],
        )
    }

    #[test]
    fn test_prefixes_merged() {
        let report = sample();
        let prefixes: Vec<_> = report.prefixes.iter().map(Prefix::as_str).collect();
        assert_eq!(prefixes, ["198.51.100.0/24", "203.0.113.0/24"]);
        assert_eq!(report.failed_sources(), 1);
    }

    #[test]
    fn test_trail_rendering() {
        let expected = "\
Fetching from A for AS62419...
A results:
  203.0.113.0/24

Fetching from B for AS62419...
B results:
  203.0.113.0/24
  198.51.100.0/24

Fetching from C for AS62419...
Invalid ASN format: AS62419
No results from C.

Combined unique IP ranges for AS62419:
  198.51.100.0/24
  203.0.113.0/24
";
        assert_eq!(sample().to_string(), expected);
    }

    #[test]
    fn test_empty_report() {
        let report = AsnReport::new(
            Asn::normalize("AS64512"),
            vec![source("A", SourceResult::Empty)],
        );
        assert!(report.prefixes.is_empty());
        assert!(report.to_string().ends_with("Combined unique IP ranges for AS64512:\n"));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["asn"], "AS62419");
        assert_eq!(json["sources"][0]["source"], "A");
        assert_eq!(json["sources"][0]["outcome"], "found");
        assert_eq!(json["sources"][2]["cause"], "Invalid ASN format: AS62419");
        assert_eq!(json["prefixes"][0], "198.51.100.0/24");
    }
}
