use crate::error::ConsoleError;
use crate::model::{contains_ignore_case, ListQuery, Record};

/// Derives the visible rows of a list view from its full collection.
pub struct ListFilterEvaluator;

impl ListFilterEvaluator {
    /// Filter records by search term and active filters, keeping their order.
    ///
    /// Filters are checked against a blank record first, so a bad key or value
    /// is reported even when nothing in the collection would reach it.
    pub fn filter_records<R: Record>(records: &[R], query: &ListQuery) -> Result<Vec<R>, ConsoleError> {
        Self::validate::<R>(query)?;

        let mut visible = Vec::new();
        for record in records {
            if Self::evaluate(record, query)? {
                visible.push(record.clone());
            }
        }
        Ok(visible)
    }

    pub fn validate<R: Record>(query: &ListQuery) -> Result<(), ConsoleError> {
        let blank = R::from_draft(0, R::Draft::default());
        for (key, value) in query.active_filters() {
            blank.matches_filter(key, value)?;
        }
        Ok(())
    }

    /// Evaluate search and every active filter against one record
    pub fn evaluate<R: Record>(record: &R, query: &ListQuery) -> Result<bool, ConsoleError> {
        if let Some(term) = query.search_term() {
            if !Self::matches_search(record, term) {
                return Ok(false);
            }
        }

        for (key, value) in query.active_filters() {
            if !record.matches_filter(key, value)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    pub fn matches_search<R: Record>(record: &R, term: &str) -> bool {
        record
            .search_fields()
            .into_iter()
            .any(|field| contains_ignore_case(field, term))
    }
}

pub fn filter_records<R: Record>(records: &[R], query: &ListQuery) -> Result<Vec<R>, ConsoleError> {
    ListFilterEvaluator::filter_records(records, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Id, Image, NewImage, NewProvider, Provider, ProviderKind};
    use crate::seed;

    fn ids<R: Record>(records: &[R]) -> Vec<Id> {
        records.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_over_both_fields() {
        let images = seed::images();

        let by_name = filter_records(&images, &ListQuery::new().search("UBUNTU")).unwrap();
        assert_eq!(ids(&by_name), vec![1]);

        let by_version = filter_records(&images, &ListQuery::new().search("lat")).unwrap();
        assert_eq!(ids(&by_version), vec![2]);
    }

    #[test]
    fn test_search_results_are_subset_containing_term() {
        let images = seed::images();
        for term in ["u", "E", "dev", "22", "zzz"] {
            let visible = filter_records(&images, &ListQuery::new().search(term)).unwrap();
            assert!(visible.len() <= images.len());
            for image in &visible {
                assert!(images.contains(image));
                assert!(image
                    .search_fields()
                    .iter()
                    .any(|f| f.to_lowercase().contains(&term.to_lowercase())));
            }
        }
    }

    #[test]
    fn test_empty_filter_value_is_noop() {
        let images = seed::images();
        let query = ListQuery::new().filter("type", "").filter("status", "");
        let visible = filter_records(&images, &query).unwrap();
        assert_eq!(visible, images);

        let visible = filter_records(&images, &ListQuery::new().search("")).unwrap();
        assert_eq!(visible, images);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let images = seed::images();

        let ami = filter_records(&images, &ListQuery::new().filter("type", "ami")).unwrap();
        assert_eq!(ids(&ami), vec![1]);

        let ami_disabled = filter_records(
            &images,
            &ListQuery::new().filter("type", "ami").filter("status", "disabled"),
        )
        .unwrap();
        assert!(ami_disabled.is_empty());

        let docker_disabled = filter_records(
            &images,
            &ListQuery::new()
                .search("node")
                .filter("type", "docker")
                .filter("status", "disabled"),
        )
        .unwrap();
        assert_eq!(ids(&docker_disabled), vec![2]);
    }

    #[test]
    fn test_order_is_preserved() {
        let images: Vec<Image> = (1..=5)
            .map(|id| {
                Image::from_draft(
                    id,
                    NewImage {
                        technical_name: format!("base-{}", id),
                        os_version: "22.04".to_string(),
                        ..NewImage::default()
                    },
                )
            })
            .rev()
            .collect();

        let visible = filter_records(&images, &ListQuery::new().search("base")).unwrap();
        assert_eq!(ids(&visible), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_unknown_filter_key_is_rejected() {
        let images = seed::images();
        let err = filter_records(&images, &ListQuery::new().filter("colour", "red")).unwrap_err();
        assert_eq!(err, ConsoleError::invalid_filter("colour", "red"));
    }

    #[test]
    fn test_bad_filter_rejected_on_empty_collection() {
        let images: Vec<Image> = Vec::new();
        assert!(filter_records(&images, &ListQuery::new().filter("type", "iso")).is_err());
        assert!(filter_records(&images, &ListQuery::new().filter("type", "ami"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_provider_region_filter() {
        let mut providers = seed::providers();
        providers.push(Provider::from_draft(
            3,
            NewProvider {
                provider: ProviderKind::Aws,
                region: "us-east-1".to_string(),
                role_name: "second-aws-role".to_string(),
                ..NewProvider::default()
            },
        ));

        let query = ListQuery::new().filter("provider", "aws").filter("region", "us-east-1");
        let visible = filter_records(&providers, &query).unwrap();
        assert_eq!(ids(&visible), vec![1, 3]);

        let visible = filter_records(&providers, &ListQuery::new().search("GCP-ROLE")).unwrap();
        assert_eq!(ids(&visible), vec![2]);
    }
}
