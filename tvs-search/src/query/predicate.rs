//! Composable curation predicates
//!
//! Filters are expressed as a small boolean tree (a conjunction of optional
//! leaf constraints) and rendered once into a `WHERE` fragment with bound
//! parameters. Every leaf constrains a single curation row, so two dancer
//! leaves in one conjunction mean "both dancers linked to the same
//! curation".

use sqlx::{QueryBuilder, Sqlite};

use super::filters::{FilterValue, VideoFilters};

/// Constraint on a curation row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Conjunction of children; empty means no constraint
    All(Vec<Predicate>),
    /// Curation links at least one dancer
    HasAnyDancer,
    /// Curation links the dancer with this normalized key
    HasDancer(String),
    /// Curation's orchestra has this normalized key
    OrchestraIs(String),
}

impl Predicate {
    /// Empty conjunction
    pub fn all() -> Self {
        Predicate::All(Vec::new())
    }

    /// Base constraint for anything browsable: a curation with linked dancers
    pub fn filterable() -> Self {
        Predicate::All(vec![Predicate::HasAnyDancer])
    }

    /// AND another constraint, flattening nested conjunctions
    pub fn and(self, other: Predicate) -> Self {
        let mut children = match self {
            Predicate::All(children) => children,
            leaf => vec![leaf],
        };
        match other {
            Predicate::All(more) => children.extend(more),
            leaf => children.push(leaf),
        }
        Predicate::All(children)
    }

    /// AND a constraint only when present
    pub fn and_optional(self, other: Option<Predicate>) -> Self {
        match other {
            Some(other) => self.and(other),
            None => self,
        }
    }

    /// Dancer leaf for a filter axis; `None` for "any"
    pub fn dancer(filter: &FilterValue) -> Option<Self> {
        filter.normalized().map(Predicate::HasDancer)
    }

    /// Orchestra leaf for a filter axis; `None` for "any"
    pub fn orchestra(filter: &FilterValue) -> Option<Self> {
        filter.normalized().map(Predicate::OrchestraIs)
    }

    /// Full video predicate: filterable AND dancer1 AND dancer2 AND orchestra
    pub fn for_videos(filters: &VideoFilters) -> Self {
        Predicate::filterable()
            .and_optional(Predicate::dancer(&filters.dancer1))
            .and_optional(Predicate::dancer(&filters.dancer2))
            .and_optional(Predicate::orchestra(&filters.orchestra))
    }

    /// Number of leaf constraints
    pub fn leaf_count(&self) -> usize {
        match self {
            Predicate::All(children) => children.iter().map(Predicate::leaf_count).sum(),
            _ => 1,
        }
    }

    /// Render as SQL against the curation table aliased `curation`
    pub fn push_sql(&self, qb: &mut QueryBuilder<'_, Sqlite>, curation: &str) {
        match self {
            Predicate::All(children) if children.is_empty() => {
                qb.push("1 = 1");
            }
            Predicate::All(children) => {
                qb.push("(");
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        qb.push(" AND ");
                    }
                    child.push_sql(qb, curation);
                }
                qb.push(")");
            }
            Predicate::HasAnyDancer => {
                qb.push(format!(
                    "EXISTS (SELECT 1 FROM dancers_to_curations any_dc \
                     WHERE any_dc.curation_id = {curation}.id)"
                ));
            }
            Predicate::HasDancer(key) => {
                qb.push(format!(
                    "EXISTS (SELECT 1 FROM dancers_to_curations pdc \
                     JOIN dancers pd ON pd.id = pdc.dancer_id \
                     WHERE pdc.curation_id = {curation}.id AND pd.normalized = "
                ));
                qb.push_bind(key.clone());
                qb.push(")");
            }
            Predicate::OrchestraIs(key) => {
                qb.push(format!(
                    "EXISTS (SELECT 1 FROM orchestras po \
                     WHERE po.id = {curation}.orchestra_id AND po.normalized = "
                ));
                qb.push_bind(key.clone());
                qb.push(")");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(predicate: &Predicate) -> String {
        let mut qb = QueryBuilder::<Sqlite>::new("");
        predicate.push_sql(&mut qb, "c");
        qb.sql().to_string()
    }

    #[test]
    fn test_empty_conjunction_is_true() {
        assert_eq!(render(&Predicate::all()), "1 = 1");
        assert_eq!(Predicate::all().leaf_count(), 0);
    }

    #[test]
    fn test_any_filters_add_no_leaves() {
        let predicate = Predicate::for_videos(&VideoFilters::default());
        assert_eq!(predicate, Predicate::All(vec![Predicate::HasAnyDancer]));
    }

    #[test]
    fn test_leaves_use_normalized_keys() {
        let predicate = Predicate::for_videos(&VideoFilters::new("JUAN", "María", "DI SARLI "));
        assert_eq!(
            predicate,
            Predicate::All(vec![
                Predicate::HasAnyDancer,
                Predicate::HasDancer("juan".to_string()),
                Predicate::HasDancer("maria".to_string()),
                Predicate::OrchestraIs("di sarli".to_string()),
            ])
        );
    }

    #[test]
    fn test_and_flattens_nested_conjunctions() {
        let left = Predicate::all().and(Predicate::HasAnyDancer);
        let right = Predicate::all().and(Predicate::OrchestraIs("x".to_string()));
        let combined = left.and(right);
        assert_eq!(combined.leaf_count(), 2);
        assert!(matches!(&combined, Predicate::All(children) if children.len() == 2));
    }

    #[test]
    fn test_both_dancers_constrain_the_same_curation() {
        let sql = render(&Predicate::for_videos(&VideoFilters::new("Juan", "Maria", "any")));

        assert_eq!(sql.matches("pdc.curation_id = c.id").count(), 2);
        assert_eq!(sql.matches("pd.normalized = ?").count(), 2);
        assert!(sql.starts_with('(') && sql.ends_with(')'));
        assert!(!sql.contains("juan"), "values must be bound, not inlined");
    }

    #[test]
    fn test_orchestra_leaf_targets_curation_alias() {
        let sql = render(&Predicate::all().and_optional(Predicate::orchestra(&"Pugliese".into())));
        assert!(sql.contains("po.id = c.orchestra_id AND po.normalized = ?"));
    }
}
