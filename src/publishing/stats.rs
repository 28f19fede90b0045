use serde::{Deserialize, Serialize};

use super::validator::{FindingLevel, PublishingValidator, ReadinessRule};
use crate::content::ContentRecord;

/// Readiness counts over a collection of records.
///
/// Counters are independent: one record can land in several `missing_*`
/// buckets at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishingStats {
    pub total: usize,
    pub publishable: usize,
    pub missing_seo: usize,
    pub missing_geo: usize,
    pub missing_faq: usize,
}

impl PublishingValidator {
    pub fn stats<'a, I>(&self, records: I) -> PublishingStats
    where
        I: IntoIterator<Item = &'a ContentRecord>,
    {
        records
            .into_iter()
            .fold(PublishingStats::default(), |mut stats, record| {
                let findings = self.check(&record.publishing);
                let blocking = |rule: ReadinessRule| {
                    findings
                        .iter()
                        .any(|f| f.rule == rule && f.level == FindingLevel::Blocking)
                };

                stats.total += 1;
                if !findings.iter().any(|f| f.level == FindingLevel::Blocking) {
                    stats.publishable += 1;
                }
                if blocking(ReadinessRule::Seo) {
                    stats.missing_seo += 1;
                }
                if blocking(ReadinessRule::Geo) {
                    stats.missing_geo += 1;
                }
                if findings.iter().any(|f| f.rule == ReadinessRule::Faq) {
                    stats.missing_faq += 1;
                }
                stats
            })
    }
}

/// Fold `validate` over records using the default thresholds
pub fn stats<'a, I>(records: I) -> PublishingStats
where
    I: IntoIterator<Item = &'a ContentRecord>,
{
    PublishingValidator::default().stats(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentKind, FaqEntry, GeoConfig, PublishingConfig, SeoConfig};

    fn record(id: &str, publishing: PublishingConfig) -> ContentRecord {
        ContentRecord::new_draft(id, ContentKind::Lesson, id).with_publishing(publishing)
    }

    fn complete() -> PublishingConfig {
        PublishingConfig {
            slug: "past-tense".to_string(),
            seo: SeoConfig {
                title: "The past tense".to_string(),
                description: "x".repeat(60),
            },
            geo: GeoConfig {
                snippet: "Add -ed to regular verbs.".to_string(),
                key_points: vec!["a".into(), "b".into(), "c".into()],
            },
            faq: vec![FaqEntry {
                question: "Irregular verbs?".to_string(),
                answer: "Memorise them.".to_string(),
            }],
        }
    }

    #[test]
    fn test_counts_each_bucket_independently() {
        let mut no_seo_no_faq = complete();
        no_seo_no_faq.seo.title.clear();
        no_seo_no_faq.faq.clear();

        let mut no_geo = complete();
        no_geo.geo.snippet.clear();

        let records = vec![
            record("a", complete()),
            record("b", no_seo_no_faq),
            record("c", no_geo),
            record("d", PublishingConfig::default()),
        ];

        let stats = stats(&records);
        assert_eq!(
            stats,
            PublishingStats {
                total: 4,
                publishable: 1,
                missing_seo: 2,
                missing_geo: 2,
                missing_faq: 2,
            }
        );
    }

    #[test]
    fn test_long_title_warning_is_not_missing_seo() {
        let mut long_title = complete();
        long_title.seo.title = "t".repeat(90);

        let stats = stats(&[record("a", long_title)]);
        assert_eq!(stats.publishable, 1);
        assert_eq!(stats.missing_seo, 0);
    }

    #[test]
    fn test_empty_collection() {
        assert_eq!(stats(Vec::<ContentRecord>::new().iter()), PublishingStats::default());
    }
}
